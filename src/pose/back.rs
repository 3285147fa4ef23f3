use glam::vec2;

use crate::exercise::ViewMode;
use crate::skeleton::Joint::*;
use crate::skeleton::{Equipment, Skeleton, Support};

pub(super) fn pull_up(view: ViewMode, rep: f32) -> Skeleton {
    let mut s = Skeleton::base(view).with_equipment(Equipment::Barbell);
    let lift = rep * 15.0;
    s[Head].y = 30.0 - lift;
    s[TorsoStart].y = 36.0 - lift;
    s[TorsoEnd].y = 65.0 - lift;
    match view {
        ViewMode::Front => {
            s[LeftShoulder].y = 36.0 - lift;
            s[RightShoulder].y = 36.0 - lift;
            s[LeftHip].y = 65.0 - lift;
            s[RightHip].y = 65.0 - lift;
            s[LeftKnee].y = 85.0 - lift;
            s[RightKnee].y = 85.0 - lift;
            s[LeftFoot].y = 95.0 - lift;
            s[RightFoot].y = 95.0 - lift;
            s[LeftElbow] = vec2(25.0, 20.0 + rep * 10.0);
            s[RightElbow] = vec2(75.0, 20.0 + rep * 10.0);
            s[LeftHand] = vec2(30.0, 10.0);
            s[RightHand] = vec2(70.0, 10.0);
        }
        ViewMode::Side => {
            s[RightShoulder] = s[TorsoStart];
            s[RightHip] = s[TorsoEnd];
            s[RightKnee] = vec2(55.0, 85.0 - lift);
            s[RightFoot] = vec2(55.0, 95.0 - lift);
            s[RightElbow] = vec2(60.0, 25.0 + rep * 5.0);
            s[RightHand] = vec2(50.0, 10.0);
        }
    }
    s
}

/// Lat and straight-arm pulldowns on a seated machine
pub(super) fn pulldown(view: ViewMode, rep: f32) -> Skeleton {
    let mut s = Skeleton::base(view).with_equipment(Equipment::Barbell);
    let pull = rep * 30.0;
    match view {
        ViewMode::Front => {
            s.support = Some(Support::rect(40.0, 55.0, 20.0, 40.0));
            s[LeftElbow] = vec2(25.0, 15.0 + pull);
            s[RightElbow] = vec2(75.0, 15.0 + pull);
            s[LeftHand] = vec2(30.0, 10.0 + pull);
            s[RightHand] = vec2(70.0, 10.0 + pull);
        }
        ViewMode::Side => {
            s.support = Some(Support::rect(45.0, 60.0, 15.0, 35.0));
            s[RightElbow] = vec2(60.0, 15.0 + pull);
            s[RightHand] = vec2(50.0, 10.0 + pull);
        }
    }
    s
}

/// Deadlifts and good mornings: `rep` 0 is the bottom of the hinge
pub(super) fn hip_hinge(view: ViewMode, rep: f32) -> Skeleton {
    let mut s = Skeleton::base(view).with_equipment(Equipment::Barbell);
    match view {
        ViewMode::Front => {
            let drop = (1.0 - rep) * 25.0;
            s[Head].y = 20.0 + drop;
            s[TorsoStart].y = 26.0 + drop;
            s[TorsoEnd].y = 55.0 + drop / 2.0;
            s[LeftShoulder].y = 26.0 + drop;
            s[RightShoulder].y = 26.0 + drop;
            s[LeftHand] = vec2(40.0, 55.0 + drop * 1.5);
            s[RightHand] = vec2(60.0, 55.0 + drop * 1.5);
            s[LeftElbow] = vec2(39.0, 40.0 + drop * 1.2);
            s[RightElbow] = vec2(61.0, 40.0 + drop * 1.2);
        }
        ViewMode::Side => {
            let drop = (1.0 - rep) * 30.0;
            s[Head] = vec2(50.0 + drop * 0.5, 20.0 + drop);
            s[TorsoStart] = vec2(50.0 + drop * 0.5, 26.0 + drop);
            s[TorsoEnd] = vec2(50.0 - drop * 0.5, 55.0 + drop / 3.0);
            s[RightShoulder] = s[TorsoStart];
            s[RightHip] = s[TorsoEnd];
            s[RightKnee] = vec2(55.0, 75.0);
            s[RightFoot] = vec2(55.0, 95.0);
            s[RightElbow] = vec2(50.0 + drop * 0.2, 45.0 + drop * 1.2);
            s[RightHand] = vec2(50.0, 55.0 + drop * 1.3);
        }
    }
    s
}

/// Bent-over rows, also claims any exercise with "row" in its name
pub(super) fn row(view: ViewMode, rep: f32) -> Skeleton {
    let mut s = Skeleton::base(view).with_equipment(Equipment::Barbell);
    match view {
        ViewMode::Front => {
            s[Head].y = 40.0;
            s[TorsoStart].y = 45.0;
            s[TorsoEnd].y = 65.0;
            s[LeftShoulder].y = 45.0;
            s[RightShoulder].y = 45.0;
            s[LeftElbow] = vec2(35.0 + rep * 5.0, 60.0 - rep * 10.0);
            s[RightElbow] = vec2(65.0 - rep * 5.0, 60.0 - rep * 10.0);
            s[LeftHand] = vec2(40.0, 75.0 - rep * 25.0);
            s[RightHand] = vec2(60.0, 75.0 - rep * 25.0);
        }
        ViewMode::Side => {
            s[Head] = vec2(30.0, 35.0);
            s[TorsoStart] = vec2(35.0, 40.0);
            s[TorsoEnd] = vec2(55.0, 55.0);
            s[RightShoulder] = s[TorsoStart];
            s[RightHip] = s[TorsoEnd];
            s[RightKnee] = vec2(60.0, 75.0);
            s[RightFoot] = vec2(55.0, 95.0);
            s[RightElbow] = vec2(45.0 - rep * 15.0, 60.0 - rep * 15.0);
            s[RightHand] = vec2(40.0 + rep * 5.0, 75.0 - rep * 30.0);
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_up_lifts_whole_body() {
        let hang = pull_up(ViewMode::Front, 0.0);
        let top = pull_up(ViewMode::Front, 1.0);
        for joint in [Head, TorsoStart, LeftHip, RightKnee, LeftFoot] {
            assert_eq!(hang[joint].y - top[joint].y, 15.0, "{:?}", joint);
        }
        // Hands stay on the bar
        assert_eq!(hang[LeftHand], top[LeftHand]);
    }

    #[test]
    fn test_hinge_stands_tall_at_lockout() {
        let lockout = hip_hinge(ViewMode::Side, 1.0);
        assert_eq!(lockout[Head], vec2(50.0, 20.0));
        assert_eq!(lockout[TorsoEnd], vec2(50.0, 55.0));

        let bottom = hip_hinge(ViewMode::Side, 0.0);
        assert_eq!(bottom[TorsoStart], vec2(65.0, 56.0));
        assert!(bottom[RightHand].distance(vec2(50.0, 94.0)) < 1e-4);
    }

    #[test]
    fn test_pulldown_has_seat() {
        let s = pulldown(ViewMode::Side, 0.5);
        assert_eq!(s.support, Some(Support::rect(45.0, 60.0, 15.0, 35.0)));
        assert_eq!(s[RightHand], vec2(50.0, 25.0));
    }
}

use glam::vec2;

use crate::exercise::ViewMode;
use crate::skeleton::Joint::*;
use crate::skeleton::{Equipment, Skeleton};

pub(super) fn lateral_raise(view: ViewMode, rep: f32) -> Skeleton {
    let mut s = Skeleton::base(view).with_equipment(Equipment::Dumbbells);
    match view {
        ViewMode::Front => {
            s[LeftElbow] = vec2(33.0 - rep * 20.0, 40.0 - rep * 15.0);
            s[RightElbow] = vec2(67.0 + rep * 20.0, 40.0 - rep * 15.0);
            s[LeftHand] = vec2(30.0 - rep * 20.0, 55.0 - rep * 30.0);
            s[RightHand] = vec2(70.0 + rep * 20.0, 55.0 - rep * 30.0);
        }
        ViewMode::Side => {
            // Arms move in the frontal plane, so the profile barely changes
            s[RightElbow] = vec2(50.0, 40.0);
            s[RightHand] = vec2(50.0, 55.0);
        }
    }
    s
}

pub(super) fn front_raise(view: ViewMode, rep: f32) -> Skeleton {
    let mut s = Skeleton::base(view).with_equipment(Equipment::Dumbbells);
    match view {
        ViewMode::Front => {
            s[LeftElbow] = vec2(38.0, 40.0 - rep * 15.0);
            s[RightElbow] = vec2(62.0, 40.0 - rep * 15.0);
            s[LeftHand] = vec2(45.0, 55.0 - rep * 30.0);
            s[RightHand] = vec2(55.0, 55.0 - rep * 30.0);
        }
        ViewMode::Side => {
            s[RightElbow] = vec2(50.0 + rep * 15.0, 40.0 - rep * 10.0);
            s[RightHand] = vec2(50.0 + rep * 35.0, 55.0 - rep * 25.0);
        }
    }
    s
}

pub(super) fn overhead_press(view: ViewMode, rep: f32) -> Skeleton {
    let mut s = Skeleton::base(view).with_equipment(Equipment::Dumbbells);
    match view {
        ViewMode::Front => {
            s[LeftElbow] = vec2(25.0 + rep * 5.0, 35.0 - rep * 15.0);
            s[RightElbow] = vec2(75.0 - rep * 5.0, 35.0 - rep * 15.0);
            s[LeftHand] = vec2(25.0 + rep * 15.0, 25.0 - rep * 20.0);
            s[RightHand] = vec2(75.0 - rep * 15.0, 25.0 - rep * 20.0);
        }
        ViewMode::Side => {
            s[RightElbow] = vec2(50.0, 35.0 - rep * 15.0);
            s[RightHand] = vec2(50.0, 25.0 - rep * 20.0);
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lateral_raise_is_symmetric() {
        let s = lateral_raise(ViewMode::Front, 0.5);
        assert_eq!(s[LeftHand].x + s[RightHand].x, 100.0);
        assert_eq!(s[LeftHand].y, s[RightHand].y);
    }

    #[test]
    fn test_press_lockout_above_head() {
        let s = overhead_press(ViewMode::Front, 1.0);
        assert_eq!(s[LeftHand], vec2(40.0, 5.0));
        assert!(s[LeftHand].y < s[Head].y);
    }
}

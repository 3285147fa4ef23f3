use glam::vec2;

use crate::exercise::ViewMode;
use crate::skeleton::Joint::*;
use crate::skeleton::{Equipment, Skeleton, Support};

/// Lying on a bench seen from the side: shared by presses and lying extensions
pub(super) fn lying_side(s: &mut Skeleton) {
    s.support = Some(Support::line(20.0, 65.0, 80.0, 65.0));
    s[Head] = vec2(25.0, 60.0);
    s[TorsoStart] = vec2(35.0, 62.0);
    s[TorsoEnd] = vec2(60.0, 62.0);
    s[RightShoulder] = s[TorsoStart];
    s[RightHip] = s[TorsoEnd];
    s[RightKnee] = vec2(70.0, 75.0);
    s[RightFoot] = vec2(70.0, 95.0);
}

pub(super) fn incline_bench(view: ViewMode, rep: f32) -> Skeleton {
    let mut s = Skeleton::base(view).with_equipment(Equipment::Barbell);
    match view {
        ViewMode::Front => {
            s.support = Some(Support::rect(40.0, 15.0, 20.0, 70.0));
            s[Head].y = 25.0;
            s[TorsoStart].y = 31.0;
            s[LeftElbow] = vec2(25.0 + rep * 10.0, 40.0);
            s[RightElbow] = vec2(75.0 - rep * 10.0, 40.0);
            s[LeftHand] = vec2(35.0, 35.0);
            s[RightHand] = vec2(65.0, 35.0);
        }
        ViewMode::Side => {
            s.support = Some(Support::line(20.0, 75.0, 65.0, 40.0));
            s[Head] = vec2(60.0, 40.0);
            s[TorsoStart] = vec2(55.0, 48.0);
            s[TorsoEnd] = vec2(30.0, 68.0);
            s[RightShoulder] = s[TorsoStart];
            s[RightHip] = s[TorsoEnd];
            s[RightKnee] = vec2(20.0, 75.0);
            s[RightFoot] = vec2(25.0, 95.0);
            s[RightElbow] = vec2(50.0, 65.0 - rep * 10.0);
            s[RightHand] = vec2(50.0, 55.0 - rep * 35.0);
        }
    }
    s
}

pub(super) fn decline_press(view: ViewMode, rep: f32) -> Skeleton {
    let mut s = Skeleton::base(view).with_equipment(Equipment::Barbell);
    match view {
        ViewMode::Front => {
            s.support = Some(Support::rect(35.0, 10.0, 30.0, 80.0));
            s[LeftElbow] = vec2(25.0 + rep * 10.0, 30.0);
            s[RightElbow] = vec2(75.0 - rep * 10.0, 30.0);
            s[LeftHand] = vec2(35.0, 40.0);
            s[RightHand] = vec2(65.0, 40.0);
        }
        ViewMode::Side => {
            s.support = Some(Support::line(20.0, 50.0, 80.0, 70.0));
            s[Head] = vec2(30.0, 70.0);
            s[TorsoStart] = vec2(35.0, 65.0);
            s[TorsoEnd] = vec2(65.0, 55.0);
            s[RightShoulder] = s[TorsoStart];
            s[RightHip] = s[TorsoEnd];
            s[RightKnee] = vec2(75.0, 50.0);
            s[RightFoot] = vec2(70.0, 75.0);
            s[RightElbow] = vec2(45.0, 80.0 - rep * 15.0);
            s[RightHand] = vec2(40.0, 60.0 - rep * 35.0);
        }
    }
    s
}

pub(super) fn flat_bench(view: ViewMode, rep: f32) -> Skeleton {
    let mut s = Skeleton::base(view).with_equipment(Equipment::Barbell);
    match view {
        ViewMode::Front => {
            s.support = Some(Support::rect(35.0, 10.0, 30.0, 80.0));
            s[LeftElbow] = vec2(25.0 + rep * 10.0, 35.0);
            s[RightElbow] = vec2(75.0 - rep * 10.0, 35.0);
            s[LeftHand] = vec2(35.0, 35.0);
            s[RightHand] = vec2(65.0, 35.0);
        }
        ViewMode::Side => {
            lying_side(&mut s);
            s[RightElbow] = vec2(35.0, 75.0 - rep * 10.0);
            s[RightHand] = vec2(35.0, 60.0 - rep * 35.0);
        }
    }
    s
}

/// Cable fly and pec deck: hands sweep together in an arc
pub(super) fn fly(view: ViewMode, rep: f32) -> Skeleton {
    let mut s = Skeleton::base(view).with_equipment(Equipment::Cables);
    match view {
        ViewMode::Front => {
            s[LeftElbow] = vec2(15.0 + rep * 30.0, 35.0);
            s[RightElbow] = vec2(85.0 - rep * 30.0, 35.0);
            s[LeftHand] = vec2(10.0 + rep * 38.0, 35.0);
            s[RightHand] = vec2(90.0 - rep * 38.0, 35.0);
        }
        ViewMode::Side => {
            s[RightElbow] = vec2(40.0 + rep * 10.0, 35.0);
            s[RightHand] = vec2(30.0 + rep * 20.0, 35.0);
        }
    }
    s
}

pub(super) fn push_up(view: ViewMode, rep: f32) -> Skeleton {
    let mut s = Skeleton::base(view).with_equipment(Equipment::None);
    match view {
        ViewMode::Front => {
            s[LeftElbow] = vec2(25.0 + rep * 10.0, 40.0);
            s[RightElbow] = vec2(75.0 - rep * 10.0, 40.0);
            s[LeftHand] = vec2(30.0, 25.0);
            s[RightHand] = vec2(70.0, 25.0);
        }
        ViewMode::Side => {
            s[Head] = vec2(20.0, 75.0 + rep * 15.0);
            s[TorsoStart] = vec2(30.0, 80.0 + rep * 12.0);
            s[TorsoEnd] = vec2(60.0, 88.0 + rep * 3.0);
            s[RightShoulder] = s[TorsoStart];
            s[RightHip] = s[TorsoEnd];
            s[RightKnee] = vec2(75.0, 92.0 + rep);
            s[RightFoot] = vec2(90.0, 95.0);
            s[RightElbow] = vec2(35.0 + rep * 5.0, 85.0 + rep * 5.0);
            s[RightHand] = vec2(30.0, 95.0);
        }
    }
    s
}

use glam::vec2;

use super::chest::lying_side;
use crate::exercise::ViewMode;
use crate::skeleton::Joint::*;
use crate::skeleton::{Equipment, Skeleton, Support};

// --- Biceps ---

pub(super) fn preacher_curl(view: ViewMode, rep: f32) -> Skeleton {
    let mut s = Skeleton::base(view).with_equipment(Equipment::Barbell);
    match view {
        ViewMode::Front => {
            s.support = Some(Support::rect(30.0, 45.0, 40.0, 55.0));
            s[LeftElbow] = vec2(40.0, 45.0);
            s[RightElbow] = vec2(60.0, 45.0);
            s[LeftHand] = vec2(40.0, 55.0 - rep * 25.0);
            s[RightHand] = vec2(60.0, 55.0 - rep * 25.0);
        }
        ViewMode::Side => {
            s.support = Some(Support::line(45.0, 55.0, 65.0, 35.0));
            s[RightElbow] = vec2(55.0, 45.0);
            s[RightHand] = vec2(65.0 - rep * 20.0, 55.0 - rep * 35.0);
        }
    }
    s
}

/// Standing curl with elbows pinned to the sides
fn standing_curl(view: ViewMode, rep: f32, equipment: Equipment) -> Skeleton {
    let mut s = Skeleton::base(view).with_equipment(equipment);
    match view {
        ViewMode::Front => {
            s[LeftElbow] = vec2(35.0, 45.0);
            s[RightElbow] = vec2(65.0, 45.0);
            s[LeftHand] = vec2(30.0, 55.0 - rep * 25.0);
            s[RightHand] = vec2(70.0, 55.0 - rep * 25.0);
        }
        ViewMode::Side => {
            s[RightElbow] = vec2(50.0, 45.0);
            s[RightHand] = vec2(50.0 + rep * 15.0, 55.0 - rep * 25.0);
        }
    }
    s
}

pub(super) fn barbell_curl(view: ViewMode, rep: f32) -> Skeleton {
    standing_curl(view, rep, Equipment::Barbell)
}

pub(super) fn dumbbell_curl(view: ViewMode, rep: f32) -> Skeleton {
    standing_curl(view, rep, Equipment::Dumbbells)
}

// --- Triceps ---

/// Skullcrushers and overhead extensions, performed lying on a flat bench
pub(super) fn lying_extension(view: ViewMode, rep: f32) -> Skeleton {
    let mut s = Skeleton::base(view).with_equipment(Equipment::Barbell);
    match view {
        ViewMode::Front => {
            s.support = Some(Support::rect(35.0, 10.0, 30.0, 80.0));
            s[LeftElbow] = vec2(40.0, 30.0);
            s[RightElbow] = vec2(60.0, 30.0);
            s[LeftHand] = vec2(40.0, 20.0 + rep * 15.0);
            s[RightHand] = vec2(60.0, 20.0 + rep * 15.0);
        }
        ViewMode::Side => {
            lying_side(&mut s);
            s[RightElbow] = vec2(25.0, 40.0);
            s[RightHand] = vec2(15.0 + rep * 15.0, 50.0 - rep * 30.0);
        }
    }
    s
}

pub(super) fn dip(view: ViewMode, rep: f32) -> Skeleton {
    let mut s = Skeleton::base(view).with_equipment(Equipment::None);
    let sink = rep * 15.0;
    s[Head].y = 20.0 + sink;
    s[TorsoStart].y = 26.0 + sink;
    s[TorsoEnd].y = 55.0 + sink;
    match view {
        ViewMode::Front => {
            s.support = Some(Support::line(20.0, 50.0, 30.0, 50.0));
            s[LeftShoulder].y = 26.0 + sink;
            s[RightShoulder].y = 26.0 + sink;
            s[LeftHand] = vec2(35.0, 50.0);
            s[RightHand] = vec2(65.0, 50.0);
            s[LeftElbow] = vec2(25.0, 40.0 + rep * 10.0);
            s[RightElbow] = vec2(75.0, 40.0 + rep * 10.0);
        }
        ViewMode::Side => {
            s[RightShoulder] = s[TorsoStart];
            s[RightHand] = vec2(50.0, 50.0);
            s[RightElbow] = vec2(40.0, 40.0 + rep * 10.0);
        }
    }
    s
}

/// Cable pushdowns; also the generic triceps pose
pub(super) fn pushdown(view: ViewMode, rep: f32) -> Skeleton {
    let mut s = Skeleton::base(view).with_equipment(Equipment::Cables);
    match view {
        ViewMode::Front => {
            s[LeftElbow] = vec2(40.0, 40.0);
            s[RightElbow] = vec2(60.0, 40.0);
            s[LeftHand] = vec2(45.0, 35.0 + rep * 20.0);
            s[RightHand] = vec2(55.0, 35.0 + rep * 20.0);
        }
        ViewMode::Side => {
            s[RightElbow] = vec2(50.0, 40.0);
            s[RightHand] = vec2(55.0, 35.0 + rep * 20.0);
        }
    }
    s
}

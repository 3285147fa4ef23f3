use glam::vec2;
use std::f32::consts::FRAC_PI_2;

use crate::exercise::ViewMode;
use crate::skeleton::Joint::*;
use crate::skeleton::{Equipment, Skeleton, Support};

/// Static hold; `rep` does not move any joint
pub(super) fn plank(view: ViewMode, _rep: f32) -> Skeleton {
    let mut s = Skeleton::base(view).with_equipment(Equipment::None);
    match view {
        ViewMode::Front => {
            s[Head].y = 80.0;
            s[TorsoStart].y = 80.0;
            s[TorsoEnd].y = 80.0;
            s[LeftElbow] = vec2(40.0, 95.0);
            s[RightElbow] = vec2(60.0, 95.0);
            s[LeftHand] = vec2(45.0, 95.0);
            s[RightHand] = vec2(55.0, 95.0);
        }
        ViewMode::Side => {
            s[Head] = vec2(25.0, 85.0);
            s[TorsoStart] = vec2(30.0, 85.0);
            s[TorsoEnd] = vec2(55.0, 85.0);
            s[RightShoulder] = s[TorsoStart];
            s[RightHip] = s[TorsoEnd];
            s[RightKnee] = vec2(70.0, 85.0);
            s[RightFoot] = vec2(85.0, 95.0);
            s[RightElbow] = vec2(30.0, 95.0);
            s[RightHand] = vec2(40.0, 95.0);
        }
    }
    s
}

pub(super) fn leg_raise(view: ViewMode, rep: f32) -> Skeleton {
    let mut s = Skeleton::base(view).with_equipment(Equipment::None);
    match view {
        ViewMode::Front => {
            s.support = Some(Support::rect(30.0, 20.0, 40.0, 70.0));
            s[LeftFoot] = vec2(45.0, 95.0 - rep * 40.0);
            s[RightFoot] = vec2(55.0, 95.0 - rep * 40.0);
        }
        ViewMode::Side => {
            s.support = Some(Support::line(10.0, 95.0, 90.0, 95.0));
            s[Head] = vec2(20.0, 92.0);
            s[TorsoStart] = vec2(30.0, 92.0);
            s[TorsoEnd] = vec2(55.0, 92.0);
            s[RightShoulder] = s[TorsoStart];
            s[RightHip] = s[TorsoEnd];
            s[RightHand] = vec2(35.0, 95.0);
            s[RightElbow] = vec2(45.0, 95.0);
            // Straight leg pivots about the hip
            let (sin, cos) = (rep * FRAC_PI_2).sin_cos();
            s[RightKnee] = vec2(55.0 + 15.0 * cos, 92.0 - 15.0 * sin);
            s[RightFoot] = vec2(55.0 + 35.0 * cos, 92.0 - 35.0 * sin);
        }
    }
    s
}

/// Crunch: generic abs pose. Keeps the default equipment.
pub(super) fn crunch(view: ViewMode, rep: f32) -> Skeleton {
    let mut s = Skeleton::base(view);
    match view {
        ViewMode::Front => {
            s.support = Some(Support::rect(30.0, 20.0, 40.0, 70.0));
            s[Head].y -= rep * 5.0;
            s[LeftHand] = vec2(45.0, 20.0);
            s[RightHand] = vec2(55.0, 20.0);
        }
        ViewMode::Side => {
            s.support = Some(Support::line(10.0, 95.0, 90.0, 95.0));
            s[Head] = vec2(20.0 + rep * 15.0, 90.0 - rep * 20.0);
            s[TorsoStart] = vec2(30.0 + rep * 10.0, 92.0 - rep * 10.0);
            s[TorsoEnd] = vec2(55.0, 92.0);
            s[RightShoulder] = s[TorsoStart];
            s[RightHip] = s[TorsoEnd];
            s[RightKnee] = vec2(70.0, 75.0);
            s[RightFoot] = vec2(85.0, 95.0);
            s[RightHand] = vec2(25.0 + rep * 15.0, 85.0 - rep * 20.0);
            s[RightElbow] = vec2(35.0 + rep * 10.0, 80.0 - rep * 15.0);
        }
    }
    s
}

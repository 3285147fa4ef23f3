use glam::vec2;
use std::f32::consts::FRAC_PI_2;

use crate::exercise::ViewMode;
use crate::skeleton::Joint::*;
use crate::skeleton::{Equipment, GuidePath, Skeleton, Support};

pub(super) fn squat(view: ViewMode, rep: f32) -> Skeleton {
    let mut s = Skeleton::base(view).with_equipment(Equipment::Barbell);
    let drop = rep * 20.0;
    match view {
        ViewMode::Front => {
            s.shift_y(
                &[
                    Head,
                    TorsoStart,
                    TorsoEnd,
                    LeftShoulder,
                    RightShoulder,
                    LeftHip,
                    RightHip,
                ],
                drop,
            );
            s[LeftKnee] = vec2(35.0 - rep * 5.0, 75.0 + drop / 2.0);
            s[RightKnee] = vec2(65.0 + rep * 5.0, 75.0 + drop / 2.0);
            s[LeftHand] = vec2(30.0, 26.0 + drop);
            s[RightHand] = vec2(70.0, 26.0 + drop);
            s[LeftElbow] = vec2(25.0, 35.0 + drop);
            s[RightElbow] = vec2(75.0, 35.0 + drop);
        }
        ViewMode::Side => {
            s.shift_y(&[Head, TorsoStart, RightShoulder], drop);
            s[TorsoEnd] = vec2(40.0, 55.0 + drop);
            s[RightHip] = s[TorsoEnd];
            s[RightKnee] = vec2(65.0, 75.0 + drop / 2.0);
            s[RightHand] = vec2(50.0, 26.0 + drop);
            s[RightElbow] = vec2(45.0, 35.0 + drop);
        }
    }
    s
}

pub(super) fn leg_press(view: ViewMode, rep: f32) -> Skeleton {
    let mut s = Skeleton::base(view).with_equipment(Equipment::Barbell);
    match view {
        ViewMode::Front => {
            s.support = Some(Support::rect(35.0, 50.0, 30.0, 45.0));
            s[LeftKnee] = vec2(35.0, 75.0 - rep * 20.0);
            s[RightKnee] = vec2(65.0, 75.0 - rep * 20.0);
            s[LeftFoot] = vec2(40.0, 85.0 - rep * 40.0);
            s[RightFoot] = vec2(60.0, 85.0 - rep * 40.0);
        }
        ViewMode::Side => {
            s.support = Some(Support::line(20.0, 85.0, 50.0, 40.0));
            s[Head] = vec2(40.0, 50.0);
            s[TorsoStart] = vec2(35.0, 60.0);
            s[TorsoEnd] = vec2(25.0, 80.0);
            s[RightShoulder] = s[TorsoStart];
            s[RightHip] = s[TorsoEnd];
            s[RightKnee] = vec2(45.0 - rep * 10.0, 70.0 - rep * 10.0);
            s[RightFoot] = vec2(55.0 + rep * 20.0, 50.0 - rep * 20.0);
        }
    }
    s
}

/// Lunges and split squats. The side view draws the trailing leg as a guide.
pub(super) fn lunge(view: ViewMode, rep: f32) -> Skeleton {
    let mut s = Skeleton::base(view).with_equipment(Equipment::Dumbbells);
    let drop = rep * 15.0;
    match view {
        ViewMode::Front => {
            s.shift_y(
                &[
                    Head,
                    TorsoStart,
                    TorsoEnd,
                    LeftShoulder,
                    RightShoulder,
                    LeftHip,
                    RightHip,
                    LeftElbow,
                    RightElbow,
                    LeftHand,
                    RightHand,
                ],
                drop,
            );
        }
        ViewMode::Side => {
            s.shift_y(
                &[
                    Head,
                    TorsoStart,
                    TorsoEnd,
                    RightShoulder,
                    RightHip,
                    RightElbow,
                    RightHand,
                ],
                drop,
            );
            s[LeftKnee] = vec2(40.0, 75.0 + drop);
            s[LeftFoot] = vec2(40.0, 95.0);
            s[RightKnee] = vec2(70.0 + drop * 0.5, 75.0);
            s[RightFoot] = vec2(75.0, 95.0);
            s.guide = Some(GuidePath {
                points: vec![s[RightHip], s[LeftKnee], s[LeftFoot]],
            });
        }
    }
    s
}

/// Generic legs pose: seated machine work such as extensions and curls
pub(super) fn leg_machine(view: ViewMode, rep: f32) -> Skeleton {
    let mut s = Skeleton::base(view).with_equipment(Equipment::None);
    match view {
        ViewMode::Front => {
            s.support = Some(Support::rect(35.0, 50.0, 30.0, 45.0));
            s[LeftFoot] = vec2(40.0, 95.0 - rep * 30.0);
            s[RightFoot] = vec2(60.0, 95.0 - rep * 30.0);
        }
        ViewMode::Side => {
            s.support = Some(Support::line(20.0, 50.0, 60.0, 50.0));
            s[Head] = vec2(30.0, 20.0);
            s[TorsoStart] = vec2(30.0, 26.0);
            s[TorsoEnd] = vec2(30.0, 50.0);
            s[RightShoulder] = s[TorsoStart];
            s[RightHip] = s[TorsoEnd];
            s[RightKnee] = vec2(60.0, 50.0);
            // Shin swings about the knee
            let angle = rep * FRAC_PI_2;
            s[RightFoot] = vec2(60.0 + angle.sin() * 30.0, 80.0 - angle.cos() * 30.0);
        }
    }
    s
}

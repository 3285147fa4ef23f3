//! Demo skeleton: named 2D joints plus equipment and support metadata.
//!
//! A `Skeleton` is a plain value recomputed every frame by the pose catalog.
//! Rules start from `Skeleton::base` and overwrite the joints they animate.

use glam::Vec2;
use serde::Serialize;
use std::ops::{Index, IndexMut};

use crate::exercise::ViewMode;
use crate::skeleton_constants::*;

/// Unique identifier for each joint of the demo skeleton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Joint {
    Head = 0,

    // Torso line
    TorsoStart = 1,
    TorsoEnd = 2,

    // Arms
    LeftShoulder = 3,
    RightShoulder = 4,
    LeftElbow = 5,
    RightElbow = 6,
    LeftHand = 7,
    RightHand = 8,

    // Legs
    LeftHip = 9,
    RightHip = 10,
    LeftKnee = 11,
    RightKnee = 12,
    LeftFoot = 13,
    RightFoot = 14,
}

impl Joint {
    /// Total number of joints in the skeleton
    pub const COUNT: usize = 15;

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const ALL: [Joint; Self::COUNT] = [
        Joint::Head,
        Joint::TorsoStart,
        Joint::TorsoEnd,
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::LeftElbow,
        Joint::RightElbow,
        Joint::LeftHand,
        Joint::RightHand,
        Joint::LeftHip,
        Joint::RightHip,
        Joint::LeftKnee,
        Joint::RightKnee,
        Joint::LeftFoot,
        Joint::RightFoot,
    ];
}

/// Equipment drawn in the athlete's hands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Equipment {
    None,
    Barbell,
    Dumbbells,
    Cables,
}

/// Bench or machine overlay drawn behind the skeleton
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Support {
    Rect { origin: Vec2, size: Vec2 },
    Line { from: Vec2, to: Vec2 },
}

impl Support {
    pub const fn rect(x: f32, y: f32, w: f32, h: f32) -> Self {
        Support::Rect {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub const fn line(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Support::Line {
            from: Vec2::new(x1, y1),
            to: Vec2::new(x2, y2),
        }
    }
}

/// Extra dashed path, e.g. the trailing leg of a lunge in side view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuidePath {
    pub points: Vec<Vec2>,
}

/// One rendered pose instant
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "SkeletonJson")]
pub struct Skeleton {
    joints: [Vec2; Joint::COUNT],
    pub equipment: Equipment,
    pub support: Option<Support>,
    pub guide: Option<GuidePath>,
}

impl Skeleton {
    /// Standing layout for the given view, holding dumbbells
    pub fn base(view: ViewMode) -> Self {
        let mut skeleton = Self {
            joints: [
                BASE_HEAD,
                BASE_TORSO_START,
                BASE_TORSO_END,
                BASE_LEFT_SHOULDER,
                BASE_RIGHT_SHOULDER,
                BASE_LEFT_ELBOW,
                BASE_RIGHT_ELBOW,
                BASE_LEFT_HAND,
                BASE_RIGHT_HAND,
                BASE_LEFT_HIP,
                BASE_RIGHT_HIP,
                BASE_LEFT_KNEE,
                BASE_RIGHT_KNEE,
                BASE_LEFT_FOOT,
                BASE_RIGHT_FOOT,
            ],
            equipment: Equipment::Dumbbells,
            support: None,
            guide: None,
        };

        if view == ViewMode::Side {
            for joint in [
                Joint::LeftShoulder,
                Joint::RightShoulder,
                Joint::LeftHip,
                Joint::RightHip,
            ] {
                skeleton[joint].x = SIDE_SPINE_X;
            }
            for joint in [
                Joint::LeftKnee,
                Joint::RightKnee,
                Joint::LeftFoot,
                Joint::RightFoot,
            ] {
                skeleton[joint].x = SIDE_LEG_X;
            }
        }

        skeleton
    }

    /// Get the position of a joint
    #[inline]
    pub fn position(&self, joint: Joint) -> Vec2 {
        self.joints[joint.index()]
    }

    /// Return a new skeleton with the joint moved (Functional Set)
    pub fn with_joint(mut self, joint: Joint, position: Vec2) -> Self {
        self[joint] = position;
        self
    }

    /// Return a new skeleton with different equipment (Functional Set)
    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment = equipment;
        self
    }

    /// Move several joints vertically by the same amount
    pub fn shift_y(&mut self, joints: &[Joint], dy: f32) {
        for &joint in joints {
            self[joint].y += dy;
        }
    }

    /// Iterate joints with their positions in `Joint::ALL` order
    pub fn joints(&self) -> impl Iterator<Item = (Joint, Vec2)> + '_ {
        Joint::ALL.iter().map(move |&joint| (joint, self.position(joint)))
    }

    /// True when every joint coordinate is a finite number
    pub fn is_finite(&self) -> bool {
        self.joints.iter().all(|p| p.is_finite())
    }
}

impl Index<Joint> for Skeleton {
    type Output = Vec2;

    fn index(&self, joint: Joint) -> &Vec2 {
        &self.joints[joint.index()]
    }
}

impl IndexMut<Joint> for Skeleton {
    fn index_mut(&mut self, joint: Joint) -> &mut Vec2 {
        &mut self.joints[joint.index()]
    }
}

/// Named-joint wire format for hosts
#[derive(Debug, Clone, Serialize)]
pub struct SkeletonJson {
    pub head: Vec2,
    pub torso_start: Vec2,
    pub torso_end: Vec2,
    pub left_shoulder: Vec2,
    pub right_shoulder: Vec2,
    pub left_elbow: Vec2,
    pub right_elbow: Vec2,
    pub left_hand: Vec2,
    pub right_hand: Vec2,
    pub left_hip: Vec2,
    pub right_hip: Vec2,
    pub left_knee: Vec2,
    pub right_knee: Vec2,
    pub left_foot: Vec2,
    pub right_foot: Vec2,
    pub equipment: Equipment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support: Option<Support>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guide: Option<GuidePath>,
}

impl From<Skeleton> for SkeletonJson {
    fn from(s: Skeleton) -> Self {
        Self {
            head: s[Joint::Head],
            torso_start: s[Joint::TorsoStart],
            torso_end: s[Joint::TorsoEnd],
            left_shoulder: s[Joint::LeftShoulder],
            right_shoulder: s[Joint::RightShoulder],
            left_elbow: s[Joint::LeftElbow],
            right_elbow: s[Joint::RightElbow],
            left_hand: s[Joint::LeftHand],
            right_hand: s[Joint::RightHand],
            left_hip: s[Joint::LeftHip],
            right_hip: s[Joint::RightHip],
            left_knee: s[Joint::LeftKnee],
            right_knee: s[Joint::RightKnee],
            left_foot: s[Joint::LeftFoot],
            right_foot: s[Joint::RightFoot],
            equipment: s.equipment,
            support: s.support,
            guide: s.guide,
        }
    }
}

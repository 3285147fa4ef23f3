//! Tracking overlay skeleton, laid out in viewport pixels.

use glam::{vec2, Vec2};
use std::ops::{Index, IndexMut};

use crate::render::{colors, Primitive, Stroke};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RigJoint {
    Head = 0,
    Spine = 1,
    LeftShoulder = 2,
    RightShoulder = 3,
    LeftElbow = 4,
    RightElbow = 5,
    LeftWrist = 6,
    RightWrist = 7,
    LeftHip = 8,
    RightHip = 9,
    LeftKnee = 10,
    RightKnee = 11,
    LeftAnkle = 12,
    RightAnkle = 13,
}

impl RigJoint {
    pub const COUNT: usize = 14;

    pub const ALL: [RigJoint; Self::COUNT] = [
        RigJoint::Head,
        RigJoint::Spine,
        RigJoint::LeftShoulder,
        RigJoint::RightShoulder,
        RigJoint::LeftElbow,
        RigJoint::RightElbow,
        RigJoint::LeftWrist,
        RigJoint::RightWrist,
        RigJoint::LeftHip,
        RigJoint::RightHip,
        RigJoint::LeftKnee,
        RigJoint::RightKnee,
        RigJoint::LeftAnkle,
        RigJoint::RightAnkle,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Overlay label
    pub const fn label(self) -> &'static str {
        match self {
            RigJoint::Head => "Head",
            RigJoint::Spine => "Core/Spine",
            RigJoint::LeftShoulder => "L-Shoulder",
            RigJoint::RightShoulder => "R-Shoulder",
            RigJoint::LeftElbow => "L-Elbow",
            RigJoint::RightElbow => "R-Elbow",
            RigJoint::LeftWrist => "L-Wrist",
            RigJoint::RightWrist => "R-Wrist",
            RigJoint::LeftHip => "L-Hip",
            RigJoint::RightHip => "R-Hip",
            RigJoint::LeftKnee => "L-Knee",
            RigJoint::RightKnee => "R-Knee",
            RigJoint::LeftAnkle => "L-Ankle",
            RigJoint::RightAnkle => "R-Ankle",
        }
    }
}

/// Joints that ride up and down with the rep
const TRUNK: [RigJoint; 6] = [
    RigJoint::Head,
    RigJoint::Spine,
    RigJoint::LeftShoulder,
    RigJoint::RightShoulder,
    RigJoint::LeftHip,
    RigJoint::RightHip,
];

/// Peak vertical travel of the trunk, in pixels
const TRUNK_TRAVEL: f32 = 35.0;

const JOINT_RADIUS: f32 = 6.0;

#[derive(Debug, Clone, PartialEq)]
pub struct TrackingRig {
    joints: [Vec2; RigJoint::COUNT],
}

impl TrackingRig {
    /// Standing layout centred in a `viewport` of `[width, height]`
    pub fn baseline(viewport: Vec2) -> Self {
        let (w, h) = (viewport.x, viewport.y);
        let cx = w / 2.0;
        let at = |dx: f32, fy: f32| vec2(cx + dx, h * fy);
        Self {
            joints: [
                at(0.0, 0.15),
                at(0.0, 0.35),
                at(-35.0, 0.25),
                at(35.0, 0.25),
                at(-45.0, 0.4),
                at(45.0, 0.4),
                at(-40.0, 0.55),
                at(40.0, 0.55),
                at(-20.0, 0.5),
                at(20.0, 0.5),
                at(-25.0, 0.75),
                at(25.0, 0.75),
                at(-25.0, 0.95),
                at(25.0, 0.95),
            ],
        }
    }

    /// Baseline displaced for one instant of a rep: the trunk sinks with
    /// `rep_cycle` while the knees flex outward, skewed by `form_noise`
    pub fn in_motion(viewport: Vec2, rep_cycle: f32, form_noise: f32) -> Self {
        let mut rig = Self::baseline(viewport);
        let offset = rep_cycle * TRUNK_TRAVEL;
        for joint in TRUNK {
            rig[joint].y += offset;
        }
        rig[RigJoint::LeftKnee].x -= offset * 0.3 + form_noise * 0.5;
        rig[RigJoint::RightKnee].x += offset * 0.3 - form_noise * 0.5;
        rig[RigJoint::LeftKnee].y += offset * 0.5;
        rig[RigJoint::RightKnee].y += offset * 0.5;
        rig
    }

    pub fn joints(&self) -> impl Iterator<Item = (RigJoint, Vec2)> + '_ {
        RigJoint::ALL.iter().map(move |&joint| (joint, self[joint]))
    }

    /// Bone paths: neck, shoulder girdle, spine, pelvis and the four limbs
    pub fn bones(&self) -> Vec<Vec<Vec2>> {
        use RigJoint::*;
        let pelvis_mid = vec2((self[LeftHip].x + self[RightHip].x) / 2.0, self[LeftHip].y);
        vec![
            vec![self[Head], self[Spine]],
            vec![self[LeftShoulder], self[RightShoulder]],
            vec![self[Spine], pelvis_mid],
            vec![self[LeftHip], self[RightHip]],
            vec![self[LeftShoulder], self[LeftElbow], self[LeftWrist]],
            vec![self[RightShoulder], self[RightElbow], self[RightWrist]],
            vec![self[LeftHip], self[LeftKnee], self[LeftAnkle]],
            vec![self[RightHip], self[RightKnee], self[RightAnkle]],
        ]
    }

    /// Bones in `stroke`, then every joint lower on screen than
    /// `highlight_below` as a marker with its label
    pub fn primitives(&self, stroke: Stroke, highlight_below: f32) -> Vec<Primitive> {
        let mut out: Vec<Primitive> = self
            .bones()
            .into_iter()
            .map(|points| Primitive::Polyline { points, stroke })
            .collect();

        for (joint, position) in self.joints() {
            if position.y <= highlight_below {
                continue;
            }
            out.push(Primitive::Circle {
                center: position,
                radius: JOINT_RADIUS,
                stroke: Some(Stroke::solid(colors::WHITE, 2.0)),
                fill: Some(colors::ACCENT),
            });
            out.push(Primitive::text(
                position + vec2(10.0, 0.0),
                joint.label(),
                10.0,
                colors::LABEL,
            ));
        }
        out
    }
}

impl Index<RigJoint> for TrackingRig {
    type Output = Vec2;

    fn index(&self, joint: RigJoint) -> &Vec2 {
        &self.joints[joint.index()]
    }
}

impl IndexMut<RigJoint> for TrackingRig {
    fn index_mut(&mut self, joint: RigJoint) -> &mut Vec2 {
        &mut self.joints[joint.index()]
    }
}

//! Drawable primitives handed to the host renderer.
//!
//! Frames are lists of vector primitives in the demo's normalized 0-100
//! plane (or the tracking viewport). The host picks the drawing technology;
//! `line_vertices` flattens a frame into a GPU line list for hosts that want
//! raw vertex data instead of shapes.

use bytemuck::{Pod, Zeroable};
use glam::{vec2, Vec2};
use serde::Serialize;
use static_assertions::const_assert_eq;
use std::f32::consts::TAU;

use crate::exercise::{ExerciseDescriptor, ViewMode};
use crate::skeleton::Joint::*;
use crate::skeleton::{Equipment, Skeleton, Support};
use crate::skeleton_constants::{CANVAS_SIZE, GROUND_Y};

/// Linear RGBA color, components in `[0, 1]`
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Pod, Zeroable)]
pub struct Rgba(pub [f32; 4]);

impl Rgba {
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 1.0)
    }

    pub const fn rgba8(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Rgba([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, alpha])
    }
}

pub mod colors {
    use super::Rgba;

    pub const ACCENT: Rgba = Rgba::rgb8(239, 68, 68);
    pub const ARM: Rgba = Rgba::rgb8(255, 107, 107);
    pub const GUIDE: Rgba = Rgba::rgb8(185, 28, 28);
    pub const GOOD: Rgba = Rgba::rgb8(34, 197, 94);
    pub const GROUND: Rgba = Rgba::rgb8(51, 51, 51);
    pub const SUPPORT_STROKE: Rgba = Rgba::rgb8(68, 68, 68);
    pub const SUPPORT_FILL: Rgba = Rgba::rgb8(34, 34, 34);
    pub const CABLE: Rgba = Rgba::rgb8(85, 85, 85);
    pub const WHITE: Rgba = Rgba::rgb8(255, 255, 255);
    pub const BLACK: Rgba = Rgba::rgb8(0, 0, 0);
    pub const LASER: Rgba = Rgba::rgba8(239, 68, 68, 0.9);
    pub const DIM_BONE: Rgba = Rgba::rgba8(255, 255, 255, 0.2);
    pub const LABEL: Rgba = Rgba::rgba8(255, 255, 255, 0.9);
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f32,
    /// Dash and gap lengths; solid when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<[f32; 2]>,
}

impl Stroke {
    pub const fn solid(color: Rgba, width: f32) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub const fn dashed(color: Rgba, width: f32, dash: f32, gap: f32) -> Self {
        Self {
            color,
            width,
            dash: Some([dash, gap]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
}

/// One drawable shape
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Primitive {
    Line {
        from: Vec2,
        to: Vec2,
        stroke: Stroke,
    },
    Polyline {
        points: Vec<Vec2>,
        stroke: Stroke,
    },
    Circle {
        center: Vec2,
        radius: f32,
        stroke: Option<Stroke>,
        fill: Option<Rgba>,
    },
    Rect {
        origin: Vec2,
        size: Vec2,
        stroke: Stroke,
        fill: Option<Rgba>,
    },
    /// Quadratic Bezier
    Curve {
        from: Vec2,
        control: Vec2,
        to: Vec2,
        stroke: Stroke,
    },
    Text {
        position: Vec2,
        text: String,
        size: f32,
        color: Rgba,
        anchor: TextAnchor,
    },
}

impl Primitive {
    pub fn line(from: Vec2, to: Vec2, stroke: Stroke) -> Self {
        Primitive::Line { from, to, stroke }
    }

    pub fn text(position: Vec2, text: impl Into<String>, size: f32, color: Rgba) -> Self {
        Primitive::Text {
            position,
            text: text.into(),
            size,
            color,
            anchor: TextAnchor::Start,
        }
    }
}

/// True for body-weight floor exercises where the setup art shows hand placement
pub fn is_floor_exercise(exercise: &ExerciseDescriptor) -> bool {
    exercise.name_contains("push up") || exercise.name_contains("plank")
}

/// Setup-phase grip illustration shown instead of a skeleton
pub fn grip_primitives(exercise: &ExerciseDescriptor) -> Vec<Primitive> {
    let floor = is_floor_exercise(exercise);
    let grip = Stroke::solid(colors::ACCENT, 8.0);
    let mut out = Vec::with_capacity(6);

    if !floor {
        out.push(Primitive::line(
            vec2(20.0, 50.0),
            vec2(80.0, 50.0),
            Stroke::solid(colors::SUPPORT_STROKE, 12.0),
        ));
    }

    out.push(Primitive::Curve {
        from: vec2(45.0, 60.0),
        control: vec2(50.0, 40.0),
        to: vec2(60.0, 55.0),
        stroke: Stroke::solid(colors::ACCENT, 6.0),
    });
    out.push(Primitive::Curve {
        from: vec2(35.0, 65.0),
        control: vec2(50.0, 35.0),
        to: vec2(65.0, 65.0),
        stroke: grip,
    });
    out.push(Primitive::Curve {
        from: vec2(30.0, 55.0),
        control: vec2(50.0, 25.0),
        to: vec2(70.0, 55.0),
        stroke: grip,
    });
    out.push(Primitive::Circle {
        center: vec2(50.0, 50.0),
        radius: 35.0,
        stroke: Some(Stroke::dashed(colors::ACCENT, 1.0, 10.0, 10.0)),
        fill: None,
    });
    out.push(Primitive::Text {
        position: vec2(50.0, 90.0),
        text: if floor { "HAND PLACEMENT" } else { "LOCK GRIP" }.to_string(),
        size: 8.0,
        color: colors::ACCENT,
        anchor: TextAnchor::Middle,
    });
    out
}

/// Front/side skeleton frame: floor, support, limbs, equipment and core marker
pub fn skeleton_primitives(s: &Skeleton, view: ViewMode) -> Vec<Primitive> {
    let mut out = Vec::with_capacity(20);
    let body = Stroke::solid(colors::ACCENT, 3.0);
    let arm = Stroke::solid(colors::ARM, 3.0);
    let leg = Stroke::solid(colors::ACCENT, 3.5);

    out.push(Primitive::line(
        vec2(5.0, GROUND_Y),
        vec2(CANVAS_SIZE - 5.0, GROUND_Y),
        Stroke::solid(colors::GROUND, 2.0),
    ));

    match s.support {
        Some(Support::Rect { origin, size }) => out.push(Primitive::Rect {
            origin,
            size,
            stroke: Stroke::solid(colors::SUPPORT_STROKE, 2.0),
            fill: Some(colors::SUPPORT_FILL),
        }),
        Some(Support::Line { from, to }) => out.push(Primitive::line(
            from,
            to,
            Stroke::solid(colors::SUPPORT_STROKE, 6.0),
        )),
        None => {}
    }

    if s.equipment == Equipment::Cables {
        let cable = Stroke::solid(colors::CABLE, 1.0);
        out.push(Primitive::line(vec2(0.0, 10.0), s[LeftHand], cable));
        out.push(Primitive::line(vec2(CANVAS_SIZE, 10.0), s[RightHand], cable));
    }

    out.push(Primitive::Circle {
        center: s[Head],
        radius: 5.0,
        stroke: Some(body),
        fill: Some(colors::BLACK),
    });
    out.push(Primitive::line(s[TorsoStart], s[TorsoEnd], body));

    if let Some(guide) = &s.guide {
        out.push(Primitive::Polyline {
            points: guide.points.clone(),
            stroke: Stroke::dashed(colors::GUIDE, 2.5, 4.0, 2.0),
        });
    }

    out.push(Primitive::Polyline {
        points: vec![s[RightShoulder], s[RightElbow], s[RightHand]],
        stroke: arm,
    });
    out.push(Primitive::Polyline {
        points: vec![s[RightHip], s[RightKnee], s[RightFoot]],
        stroke: leg,
    });
    if view.is_front() {
        out.push(Primitive::Polyline {
            points: vec![s[LeftShoulder], s[LeftElbow], s[LeftHand]],
            stroke: arm,
        });
        out.push(Primitive::Polyline {
            points: vec![s[LeftHip], s[LeftKnee], s[LeftFoot]],
            stroke: leg,
        });
    }

    push_equipment(&mut out, s, view);

    let core = s[TorsoEnd];
    out.push(Primitive::Circle {
        center: core,
        radius: 8.0,
        stroke: Some(Stroke::dashed(colors::GOOD, 1.0, 2.0, 4.0)),
        fill: None,
    });
    out.push(Primitive::text(core + vec2(12.0, 0.0), "ENGAGED", 4.0, colors::GOOD));

    out
}

fn push_equipment(out: &mut Vec<Primitive>, s: &Skeleton, view: ViewMode) {
    let metal = Stroke::solid(colors::WHITE, 4.0);
    let (left, right) = (s[LeftHand], s[RightHand]);
    match (s.equipment, view) {
        (Equipment::Barbell, ViewMode::Front) => {
            out.push(Primitive::line(left - vec2(15.0, 0.0), right + vec2(15.0, 0.0), metal));
        }
        (Equipment::Barbell, ViewMode::Side) => {
            out.push(Primitive::Circle {
                center: right,
                radius: 4.0,
                stroke: None,
                fill: Some(colors::WHITE),
            });
            out.push(Primitive::line(
                right - vec2(10.0, 0.0),
                right + vec2(10.0, 0.0),
                Stroke::solid(colors::WHITE, 2.0),
            ));
        }
        (Equipment::Dumbbells, _) => {
            out.push(Primitive::line(right - vec2(6.0, 0.0), right + vec2(6.0, 0.0), metal));
            if view.is_front() {
                out.push(Primitive::line(left - vec2(6.0, 0.0), left + vec2(6.0, 0.0), metal));
            }
        }
        (Equipment::None | Equipment::Cables, _) => {}
    }
}

/// GPU line-list vertex: pairs of vertices form segments
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

const_assert_eq!(std::mem::size_of::<LineVertex>(), 24);

/// Segments used to approximate curves and circles
const ARC_SEGMENTS: usize = 16;

fn push_segment(out: &mut Vec<LineVertex>, a: Vec2, b: Vec2, color: Rgba) {
    out.push(LineVertex {
        position: a.to_array(),
        color: color.0,
    });
    out.push(LineVertex {
        position: b.to_array(),
        color: color.0,
    });
}

fn push_path(out: &mut Vec<LineVertex>, points: impl IntoIterator<Item = Vec2>, color: Rgba) {
    let mut points = points.into_iter();
    if let Some(mut prev) = points.next() {
        for p in points {
            push_segment(out, prev, p, color);
            prev = p;
        }
    }
}

/// Flatten primitives into a line list. Text has no outline and is skipped.
pub fn line_vertices(primitives: &[Primitive]) -> Vec<LineVertex> {
    let mut out = Vec::new();
    for primitive in primitives {
        match primitive {
            Primitive::Line { from, to, stroke } => push_segment(&mut out, *from, *to, stroke.color),
            Primitive::Polyline { points, stroke } => {
                push_path(&mut out, points.iter().copied(), stroke.color)
            }
            Primitive::Circle {
                center,
                radius,
                stroke,
                fill,
            } => {
                let Some(color) = stroke.map(|s| s.color).or(*fill) else {
                    continue;
                };
                let ring = (0..=ARC_SEGMENTS).map(|i| {
                    let angle = i as f32 / ARC_SEGMENTS as f32 * TAU;
                    *center + Vec2::from_angle(angle) * *radius
                });
                push_path(&mut out, ring, color);
            }
            Primitive::Rect {
                origin,
                size,
                stroke,
                ..
            } => {
                let corners = [
                    *origin,
                    *origin + vec2(size.x, 0.0),
                    *origin + *size,
                    *origin + vec2(0.0, size.y),
                    *origin,
                ];
                push_path(&mut out, corners, stroke.color);
            }
            Primitive::Curve {
                from,
                control,
                to,
                stroke,
            } => {
                let samples = (0..=ARC_SEGMENTS).map(|i| {
                    let t = i as f32 / ARC_SEGMENTS as f32;
                    let u = 1.0 - t;
                    *from * (u * u) + *control * (2.0 * u * t) + *to * (t * t)
                });
                push_path(&mut out, samples, stroke.color);
            }
            Primitive::Text { .. } => {}
        }
    }
    out
}

/// View a vertex list as the flat float buffer GPU uploads expect
pub fn vertex_floats(vertices: &[LineVertex]) -> &[f32] {
    bytemuck::cast_slice(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::MuscleGroup;
    use crate::pose::generate_pose;

    fn count<F: Fn(&Primitive) -> bool>(prims: &[Primitive], f: F) -> usize {
        prims.iter().filter(|p| f(p)).count()
    }

    fn has_text(prims: &[Primitive], needle: &str) -> bool {
        prims
            .iter()
            .any(|p| matches!(p, Primitive::Text { text, .. } if text == needle))
    }

    #[test]
    fn test_grip_art_for_bar_and_floor_work() {
        let bench = ExerciseDescriptor::new("Flat Bench Press", MuscleGroup::Chest);
        let art = grip_primitives(&bench);
        assert!(has_text(&art, "LOCK GRIP"));
        assert_eq!(count(&art, |p| matches!(p, Primitive::Line { .. })), 1);
        assert_eq!(count(&art, |p| matches!(p, Primitive::Curve { .. })), 3);

        let plank = ExerciseDescriptor::new("Plank", MuscleGroup::Abs);
        let art = grip_primitives(&plank);
        assert!(has_text(&art, "HAND PLACEMENT"));
        assert_eq!(count(&art, |p| matches!(p, Primitive::Line { .. })), 0);
    }

    #[test]
    fn test_side_view_hides_left_limbs() {
        let squat = ExerciseDescriptor::new("Squats", MuscleGroup::Legs);
        let polylines = |view| {
            let prims = skeleton_primitives(&generate_pose(&squat, view, 0.5), view);
            count(&prims, |p| matches!(p, Primitive::Polyline { .. }))
        };
        assert_eq!(polylines(ViewMode::Front), 4);
        assert_eq!(polylines(ViewMode::Side), 2);
    }

    #[test]
    fn test_front_barbell_spans_hands() {
        let bench = ExerciseDescriptor::new("Flat Bench Press", MuscleGroup::Chest);
        let s = generate_pose(&bench, ViewMode::Front, 0.0);
        let prims = skeleton_primitives(&s, ViewMode::Front);
        let bar = Primitive::line(
            vec2(20.0, 35.0),
            vec2(80.0, 35.0),
            Stroke::solid(colors::WHITE, 4.0),
        );
        assert!(prims.contains(&bar));
        assert!(has_text(&prims, "ENGAGED"));
    }

    #[test]
    fn test_cables_attach_to_hands() {
        let fly = ExerciseDescriptor::new("Cable Crossover Fly", MuscleGroup::Chest);
        let s = generate_pose(&fly, ViewMode::Front, 0.0);
        let prims = skeleton_primitives(&s, ViewMode::Front);
        let cable = Stroke::solid(colors::CABLE, 1.0);
        assert!(prims.contains(&Primitive::line(vec2(0.0, 10.0), s[LeftHand], cable)));
        assert!(prims.contains(&Primitive::line(vec2(100.0, 10.0), s[RightHand], cable)));
    }

    #[test]
    fn test_line_vertices_pairs() {
        let prims = vec![
            Primitive::line(Vec2::ZERO, Vec2::ONE, Stroke::solid(colors::WHITE, 1.0)),
            Primitive::Polyline {
                points: vec![Vec2::ZERO, Vec2::X, Vec2::ONE],
                stroke: Stroke::solid(colors::ACCENT, 1.0),
            },
            Primitive::text(Vec2::ZERO, "skipped", 4.0, colors::LABEL),
        ];
        let vertices = line_vertices(&prims);
        assert_eq!(vertices.len(), 2 + 4);
        assert_eq!(vertices[1].position, [1.0, 1.0]);
        assert_eq!(vertex_floats(&vertices).len(), vertices.len() * 6);
    }

    #[test]
    fn test_frame_serializes_tagged() {
        let json = serde_json::to_value(Primitive::text(Vec2::ZERO, "hi", 4.0, colors::GOOD)).unwrap();
        assert_eq!(json["kind"], "text");
        assert_eq!(json["anchor"], "start");
    }
}

//! Shared layout constants for the demo skeleton.
//!
//! All coordinates live in the normalized 0-100 drawing plane with +Y
//! pointing down, matching the render sink's viewbox.

use glam::Vec2;

/// Width and height of the normalized drawing plane
pub const CANVAS_SIZE: f32 = 100.0;

/// Y coordinate of the floor line
pub const GROUND_Y: f32 = 95.0;

/// Standing front-view layout that every pose rule starts from.
pub const BASE_HEAD: Vec2 = Vec2::new(50.0, 20.0);
pub const BASE_TORSO_START: Vec2 = Vec2::new(50.0, 26.0);
pub const BASE_TORSO_END: Vec2 = Vec2::new(50.0, 55.0);
pub const BASE_LEFT_SHOULDER: Vec2 = Vec2::new(38.0, 26.0);
pub const BASE_RIGHT_SHOULDER: Vec2 = Vec2::new(62.0, 26.0);
pub const BASE_LEFT_ELBOW: Vec2 = Vec2::new(33.0, 40.0);
pub const BASE_RIGHT_ELBOW: Vec2 = Vec2::new(67.0, 40.0);
pub const BASE_LEFT_HAND: Vec2 = Vec2::new(30.0, 55.0);
pub const BASE_RIGHT_HAND: Vec2 = Vec2::new(70.0, 55.0);
pub const BASE_LEFT_HIP: Vec2 = Vec2::new(44.0, 55.0);
pub const BASE_RIGHT_HIP: Vec2 = Vec2::new(56.0, 55.0);
pub const BASE_LEFT_KNEE: Vec2 = Vec2::new(44.0, 75.0);
pub const BASE_RIGHT_KNEE: Vec2 = Vec2::new(56.0, 75.0);
pub const BASE_LEFT_FOOT: Vec2 = Vec2::new(44.0, 95.0);
pub const BASE_RIGHT_FOOT: Vec2 = Vec2::new(56.0, 95.0);

/// Side view collapses shoulders and hips onto the spine line
pub const SIDE_SPINE_X: f32 = 50.0;

/// Side view knees and feet sit slightly forward of the spine
pub const SIDE_LEG_X: f32 = 55.0;

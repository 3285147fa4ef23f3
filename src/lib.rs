//! Gym World Motion Engine - Wasm Core
//!
//! Procedural exercise demos and a simulated motion-tracking session,
//! emitted as drawable frames for a browser host.

pub mod config;
pub mod demo;
pub mod exercise;
pub mod instructions;
pub mod pose;
pub mod render;
pub mod scheduler;
pub mod skeleton;
mod skeleton_constants;
pub mod state;
pub mod tracking;
pub mod video;

use wasm_bindgen::prelude::*;

pub use config::{DemoConfig, EngineConfig, TrackingConfig};
pub use demo::{DemoFrame, DemoPhase, DemoPlayback};
pub use exercise::{ExerciseDescriptor, MuscleGroup, ViewMode, WorkoutCatalog};
pub use instructions::{generate_instructions, Instructions};
pub use pose::generate_pose;
pub use render::{line_vertices, Primitive};
pub use skeleton::{Joint, Skeleton};
pub use tracking::{SessionResult, TrackingFrame, TrackingPhase, TrackingSession};
pub use video::VideoStatus;

#[cfg(target_arch = "wasm32")]
use crate::state::{initialize_app_state, with_app_state, with_app_state_mut};

#[cfg(target_arch = "wasm32")]
const NOT_INITIALIZED: &str = "Engine not initialized; call init_engine() first";

#[cfg(target_arch = "wasm32")]
fn descriptor(name: &str, muscle: &str) -> Result<ExerciseDescriptor, JsValue> {
    let muscle: MuscleGroup = muscle
        .parse()
        .map_err(|e: exercise::UnknownMuscleGroup| JsValue::from_str(&e.to_string()))?;
    Ok(ExerciseDescriptor::new(name, muscle))
}

#[cfg(target_arch = "wasm32")]
fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

/// Set up logging and the global engine state.
///
/// `config_json` may be partial; missing fields take their defaults.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_engine(config_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    let config = match config_json {
        Some(json) => EngineConfig::from_json(&json)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?,
        None => EngineConfig::default(),
    };
    initialize_app_state(config, scheduler::default_scheduler());
    log::info!("Motion engine initialized");
    Ok(())
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start_demo(name: &str, muscle: &str) -> Result<bool, JsValue> {
    let exercise = descriptor(name, muscle)?;
    with_app_state_mut(|state| state.start_demo(exercise))
        .ok_or_else(|| JsValue::from_str(NOT_INITIALIZED))
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn replay_demo() -> bool {
    with_app_state_mut(|state| state.replay_demo()).unwrap_or(false)
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn stop_demo() {
    with_app_state_mut(|state| state.stop_demo());
}

/// Latest demo frame, or `undefined` before the first tick
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn demo_frame() -> Result<JsValue, JsValue> {
    let frame = with_app_state(|state| state.demo_frame()).flatten();
    to_js(&frame)
}

/// Latest demo frame flattened to `[x, y, r, g, b, a]` line-list vertices
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn demo_line_vertices() -> Vec<f32> {
    with_app_state(|state| state.demo_frame())
        .flatten()
        .map(|frame| render::vertex_floats(&line_vertices(&frame.primitives)).to_vec())
        .unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start_tracking(name: &str, muscle: &str, seed: Option<u64>) -> Result<bool, JsValue> {
    let exercise = descriptor(name, muscle)?;
    with_app_state_mut(|state| state.start_tracking(exercise, seed))
        .ok_or_else(|| JsValue::from_str(NOT_INITIALIZED))
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn begin_recording() -> bool {
    with_app_state_mut(|state| state.begin_recording()).unwrap_or(false)
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn tracking_frame() -> Result<JsValue, JsValue> {
    let frame = with_app_state(|state| state.tracking_frame()).flatten();
    to_js(&frame)
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn set_video_available(available: bool) {
    with_app_state_mut(|state| state.set_video_status(VideoStatus::from_available(available)));
}

/// Ask for the camera and record the outcome. Resolves to the
/// `MediaStream`, or `null` when tracking must run without video.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn request_camera() -> JsValue {
    let (status, stream) = video::request_camera().await;
    with_app_state_mut(|state| state.set_video_status(status));
    stream.map(JsValue::from).unwrap_or(JsValue::NULL)
}

/// Close a reviewed session. Returns the result once, `undefined` otherwise.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn acknowledge_tracking() -> Result<JsValue, JsValue> {
    let result = with_app_state_mut(|state| state.acknowledge_tracking()).flatten();
    to_js(&result)
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn stop_tracking() {
    with_app_state_mut(|state| state.stop_tracking());
}

/// Built-in exercise names for a muscle group
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn list_exercises(muscle: &str) -> Result<Vec<String>, JsValue> {
    let muscle: MuscleGroup = muscle
        .parse()
        .map_err(|e: exercise::UnknownMuscleGroup| JsValue::from_str(&e.to_string()))?;
    Ok(WorkoutCatalog::builtin().exercises(muscle).to_vec())
}

/// One still pose with its overlay, without starting a demo
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn preview_pose(name: &str, muscle: &str, view: &str, rep: f32) -> Result<JsValue, JsValue> {
    #[derive(serde::Serialize)]
    struct Preview {
        skeleton: Skeleton,
        primitives: Vec<Primitive>,
    }

    let exercise = descriptor(name, muscle)?;
    let view = match view.trim().to_ascii_lowercase().as_str() {
        "front" => ViewMode::Front,
        "side" => ViewMode::Side,
        other => return Err(JsValue::from_str(&format!("unknown view: {}", other))),
    };
    let skeleton = generate_pose(&exercise, view, rep);
    let primitives = render::skeleton_primitives(&skeleton, view);
    to_js(&Preview {
        skeleton,
        primitives,
    })
}

/// Log to browser console
#[wasm_bindgen]
pub fn log(msg: &str) {
    log::info!("{}", msg);
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;
    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_catalog_and_preview() {
        init_engine(Some(r#"{"tracking":{"seed":5}}"#.to_string())).unwrap();
        assert_eq!(list_exercises("legs").unwrap().len(), 10);
        assert!(list_exercises("Neck").is_err());
        assert!(preview_pose("Squats", "Legs", "side", 0.5).is_ok());
        assert!(preview_pose("Squats", "Legs", "top", 0.5).is_err());
        assert!(start_tracking("Squats", "Legs", None).unwrap());
        assert!(begin_recording());
        stop_tracking();
    }
}

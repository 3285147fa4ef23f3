//! Demo playback: a fixed three-phase timeline (setup, front view, side view).
//!
//! Phase, progress and rep fraction are pure functions of elapsed time, so a
//! frame can be rebuilt for any instant. `DemoPlayback` only tracks when the
//! timeline started and whether it is still playing.

use serde::Serialize;
use static_assertions::const_assert;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::config::DemoConfig;
use crate::exercise::{ExerciseDescriptor, ViewMode};
use crate::instructions::{generate_instructions, Instructions};
use crate::pose::generate_pose;
use crate::render::{grip_primitives, skeleton_primitives, Primitive};
use crate::scheduler::{FrameEngine, Step};
use crate::skeleton::Skeleton;

/// Fraction of the timeline where the front view begins
pub const FRONT_START: f64 = 0.25;
/// Fraction of the timeline where the side view begins
pub const SIDE_START: f64 = 0.625;

const_assert!(0.0 < FRONT_START && FRONT_START < SIDE_START && SIDE_START < 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DemoPhase {
    Setup,
    Front,
    Side,
}

impl DemoPhase {
    /// Camera angle for the phase; setup shows grip art instead
    pub fn view(self) -> Option<ViewMode> {
        match self {
            DemoPhase::Setup => None,
            DemoPhase::Front => Some(ViewMode::Front),
            DemoPhase::Side => Some(ViewMode::Side),
        }
    }

    pub fn header_label(self) -> &'static str {
        match self {
            DemoPhase::Setup => "SETUP",
            DemoPhase::Front => "FRONT VIEW",
            DemoPhase::Side => "SIDE VIEW",
        }
    }

    pub fn step_caption(self) -> &'static str {
        match self {
            DemoPhase::Setup => "Step 1: Setup Phase",
            DemoPhase::Front => "Step 2: Front Mechanics",
            DemoPhase::Side => "Step 3: Side Profile Check",
        }
    }

    /// Start of the phase as a fraction of the timeline
    fn start_fraction(self) -> f64 {
        match self {
            DemoPhase::Setup => 0.0,
            DemoPhase::Front => FRONT_START,
            DemoPhase::Side => SIDE_START,
        }
    }
}

/// Phase at `elapsed_ms` into a timeline of `duration_ms`
pub fn phase_at(elapsed_ms: f64, duration_ms: f64) -> DemoPhase {
    if duration_ms <= 0.0 {
        return DemoPhase::Side;
    }
    let fraction = elapsed_ms / duration_ms;
    if fraction < FRONT_START {
        DemoPhase::Setup
    } else if fraction < SIDE_START {
        DemoPhase::Front
    } else {
        DemoPhase::Side
    }
}

/// Overall progress in percent, capped at 100
pub fn progress_at(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 100.0;
    }
    (elapsed_ms / duration_ms * 100.0).clamp(0.0, 100.0)
}

/// Rep fraction for the front and side phases: a sinusoid anchored at the
/// start of the phase, starting from 0 and peaking every `rep_period_ms`
pub fn rep_fraction_at(elapsed_ms: f64, phase: DemoPhase, config: &DemoConfig) -> Option<f32> {
    phase.view()?;
    let phase_start = phase.start_fraction() * config.duration_ms;
    let t = (elapsed_ms - phase_start) / config.rep_period_ms;
    let rep = ((t * PI - FRAC_PI_2).sin() + 1.0) / 2.0;
    Some(rep.clamp(0.0, 1.0) as f32)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DemoPlaybackState {
    pub elapsed_ms: f64,
    pub phase: DemoPhase,
    pub playing: bool,
}

impl Default for DemoPlaybackState {
    fn default() -> Self {
        Self {
            elapsed_ms: 0.0,
            phase: DemoPhase::Setup,
            playing: true,
        }
    }
}

/// Everything the host draws for one demo instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoFrame {
    pub phase: DemoPhase,
    pub playing: bool,
    pub elapsed_ms: f64,
    pub progress: f64,
    pub view: Option<ViewMode>,
    pub rep_fraction: Option<f32>,
    pub skeleton: Option<Skeleton>,
    pub header: String,
    pub caption: &'static str,
    pub instruction: String,
    pub primitives: Vec<Primitive>,
}

pub struct DemoPlayback {
    exercise: ExerciseDescriptor,
    instructions: Instructions,
    config: DemoConfig,
    state: DemoPlaybackState,
    /// Timestamp of the first tick since start or replay
    anchor_ms: Option<f64>,
}

impl DemoPlayback {
    pub fn new(exercise: ExerciseDescriptor, config: DemoConfig) -> Self {
        log::info!("Demo started: {} ({})", exercise.name, exercise.muscle);
        Self {
            instructions: generate_instructions(&exercise),
            exercise,
            config: config.sanitized(),
            state: DemoPlaybackState::default(),
            anchor_ms: None,
        }
    }

    pub fn exercise(&self) -> &ExerciseDescriptor {
        &self.exercise
    }

    pub fn state(&self) -> DemoPlaybackState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        !self.state.playing
    }

    /// Rewind to the start of the timeline and resume playing
    pub fn replay(&mut self) {
        log::info!("Demo replay: {}", self.exercise.name);
        self.state = DemoPlaybackState::default();
        self.anchor_ms = None;
    }

    /// Advance to `now_ms`. The first tick after start or replay anchors the
    /// timeline.
    pub fn tick(&mut self, now_ms: f64) -> Step<DemoFrame> {
        if !self.state.playing {
            return Step::Finish(self.frame());
        }

        let anchor = *self.anchor_ms.get_or_insert(now_ms);
        let duration = self.config.duration_ms;
        let elapsed = (now_ms - anchor).max(0.0);

        self.state.elapsed_ms = elapsed.min(duration);
        self.state.phase = phase_at(self.state.elapsed_ms, duration);

        if elapsed >= duration {
            self.state.playing = false;
            log::info!("Demo finished: {}", self.exercise.name);
            Step::Finish(self.frame())
        } else {
            Step::Continue(self.frame())
        }
    }

    /// Build the frame for the current state
    pub fn frame(&self) -> DemoFrame {
        let DemoPlaybackState {
            elapsed_ms,
            phase,
            playing,
        } = self.state;
        let view = phase.view();
        let rep_fraction = rep_fraction_at(elapsed_ms, phase, &self.config);

        let (skeleton, primitives) = match (view, rep_fraction) {
            (Some(view), Some(rep)) => {
                let skeleton = generate_pose(&self.exercise, view, rep);
                let primitives = skeleton_primitives(&skeleton, view);
                (Some(skeleton), primitives)
            }
            _ => (None, grip_primitives(&self.exercise)),
        };

        DemoFrame {
            phase,
            playing,
            elapsed_ms,
            progress: progress_at(elapsed_ms, self.config.duration_ms),
            view,
            rep_fraction,
            skeleton,
            header: format!(
                "{} | {}",
                self.exercise.name.to_uppercase(),
                phase.header_label()
            ),
            caption: phase.step_caption(),
            instruction: self.instructions.for_phase(phase).to_string(),
            primitives,
        }
    }
}

impl FrameEngine for DemoPlayback {
    type Frame = DemoFrame;

    fn step(&mut self, now_ms: f64) -> Step<DemoFrame> {
        self.tick(now_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::MuscleGroup;
    use crate::scheduler::{FrameScheduler, ManualScheduler, Ticker};
    use crate::skeleton::Joint;
    use glam::vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn bench_demo() -> DemoPlayback {
        DemoPlayback::new(
            ExerciseDescriptor::new("Flat Bench Press", MuscleGroup::Chest),
            DemoConfig::default(),
        )
    }

    fn frame_of(step: Step<DemoFrame>) -> DemoFrame {
        match step {
            Step::Continue(frame) | Step::Finish(frame) => frame,
        }
    }

    #[test]
    fn test_phase_thresholds() {
        let d = 8000.0;
        assert_eq!(phase_at(0.0, d), DemoPhase::Setup);
        assert_eq!(phase_at(1999.9, d), DemoPhase::Setup);
        assert_eq!(phase_at(2000.0, d), DemoPhase::Front);
        assert_eq!(phase_at(4999.9, d), DemoPhase::Front);
        assert_eq!(phase_at(5000.0, d), DemoPhase::Side);
        assert_eq!(phase_at(8000.0, d), DemoPhase::Side);
        assert_eq!(phase_at(12000.0, d), DemoPhase::Side);
    }

    #[test]
    fn test_progress_is_capped() {
        assert_eq!(progress_at(0.0, 8000.0), 0.0);
        assert_eq!(progress_at(4000.0, 8000.0), 50.0);
        assert_eq!(progress_at(9000.0, 8000.0), 100.0);
    }

    #[test]
    fn test_rep_fraction_anchored_to_phase_start() {
        let config = DemoConfig::default();
        assert_eq!(rep_fraction_at(1000.0, DemoPhase::Setup, &config), None);

        let at = |elapsed, phase| rep_fraction_at(elapsed, phase, &config).unwrap();
        assert!(at(2000.0, DemoPhase::Front).abs() < 1e-6);
        assert!((at(2750.0, DemoPhase::Front) - 1.0).abs() < 1e-6);
        assert!(at(5000.0, DemoPhase::Side).abs() < 1e-6);
        assert!((at(5375.0, DemoPhase::Side) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_timeline_frames() {
        let mut demo = bench_demo();

        let setup = frame_of(demo.tick(1000.0));
        assert_eq!(setup.phase, DemoPhase::Setup);
        assert_eq!(setup.elapsed_ms, 0.0);
        assert!(setup.skeleton.is_none());
        assert_eq!(setup.caption, "Step 1: Setup Phase");
        assert_eq!(
            setup.instruction,
            "Standard barbell grip. Retract scapula into the bench."
        );

        let front = frame_of(demo.tick(3000.0));
        assert_eq!(front.phase, DemoPhase::Front);
        assert_eq!(front.header, "FLAT BENCH PRESS | FRONT VIEW");
        let skeleton = front.skeleton.expect("front phase draws a skeleton");
        assert_eq!(skeleton[Joint::LeftElbow], vec2(25.0, 35.0));

        let side = frame_of(demo.tick(6500.0));
        assert_eq!(side.phase, DemoPhase::Side);
        assert_eq!(side.view, Some(ViewMode::Side));
        assert_eq!(side.caption, "Step 3: Side Profile Check");
    }

    #[test]
    fn test_finishes_at_duration() {
        let mut demo = bench_demo();
        assert!(matches!(demo.tick(0.0), Step::Continue(_)));
        assert!(matches!(demo.tick(7999.0), Step::Continue(_)));

        let last = demo.tick(8000.0);
        assert!(matches!(last, Step::Finish(_)));
        let last = frame_of(last);
        assert_eq!(last.progress, 100.0);
        assert!(!last.playing);
        assert!(demo.is_done());
    }

    #[test]
    fn test_replay_is_idempotent() {
        let mut demo = bench_demo();
        demo.tick(0.0);
        demo.tick(9000.0);
        assert!(demo.is_done());

        for _ in 0..3 {
            demo.replay();
            let state = demo.state();
            assert_eq!(state.elapsed_ms, 0.0);
            assert_eq!(state.phase, DemoPhase::Setup);
            assert!(state.playing);
        }

        // Timeline re-anchors on the next tick
        let frame = frame_of(demo.tick(20000.0));
        assert_eq!(frame.elapsed_ms, 0.0);
        assert!(frame.playing);
    }

    #[test]
    fn test_zero_timings_fall_back_to_defaults() {
        let mut demo = DemoPlayback::new(
            ExerciseDescriptor::new("Flat Bench Press", MuscleGroup::Chest),
            DemoConfig {
                duration_ms: 0.0,
                rep_period_ms: 0.0,
            },
        );
        assert!(matches!(demo.tick(0.0), Step::Continue(_)));
        let front = frame_of(demo.tick(3000.0));
        assert_eq!(front.phase, DemoPhase::Front);
        let rep = front.rep_fraction.expect("front phase has a rep fraction");
        assert!(rep.is_finite());
        assert!(front.skeleton.is_some_and(|s| s.is_finite()));
        assert!(matches!(demo.tick(8000.0), Step::Finish(_)));
    }

    #[test]
    fn test_ticker_stops_after_done() {
        let scheduler = ManualScheduler::new();
        let frames = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&frames);
        let ticker = Ticker::new(
            bench_demo(),
            scheduler.clone() as Rc<dyn FrameScheduler>,
            move |frame: &DemoFrame| sink.borrow_mut().push(frame.phase),
        );
        ticker.start();

        let mut now = 0.0;
        while scheduler.run_frame(now) > 0 {
            now += 500.0;
        }

        assert!(!ticker.is_running());
        assert!(ticker.with_engine(|demo| demo.is_done()));
        let phases = frames.borrow();
        assert_eq!(phases.len(), 17);
        assert_eq!(phases[0], DemoPhase::Setup);
        assert_eq!(phases[4], DemoPhase::Front);
        assert_eq!(phases[16], DemoPhase::Side);
    }
}

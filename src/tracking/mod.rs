//! Motion-tracking session: setup scan, recorded reps, review.
//!
//! Nothing here reads the camera. Rep timing, accuracy and faults are all
//! synthesized from elapsed recording time and an injected `AccuracyModel`,
//! so a session is fully reproducible given its model.
//!
//! ```text
//! Setup --start_recording()--> Recording --final rep + delay--> Review
//! ```

mod rig;
mod scoring;

pub use rig::{RigJoint, TrackingRig};
pub use scoring::{
    average_accuracy, clamp_accuracy, detect_mistake, finalize, form_noise, rep_cycle,
    AccuracyFn, AccuracyModel, ConstantAccuracy, MistakeLog, SessionResult, SyntheticAccuracy,
    CORE_INSTABILITY, EXCELLENT_EXECUTION, INCOMPLETE_RANGE, KNEE_VALGUS, UNEVEN_WEIGHT,
};

use glam::{vec2, Vec2};
use serde::Serialize;

use crate::config::TrackingConfig;
use crate::exercise::ExerciseDescriptor;
use crate::render::{colors, Primitive, Stroke};
use crate::scheduler::{FrameEngine, Step};
use crate::video::VideoStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingPhase {
    Setup,
    Recording,
    Review,
}

/// Everything the host draws for one tracking instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingFrame {
    pub phase: TrackingPhase,
    pub rep_count: u32,
    pub target_reps: u32,
    /// Clamped accuracy of this tick while recording
    pub accuracy: Option<f32>,
    pub good_form: Option<bool>,
    /// Setup scan line height
    pub laser_y: Option<f32>,
    pub viewport: [f32; 2],
    pub video_background: bool,
    pub video_warning: Option<&'static str>,
    pub primitives: Vec<Primitive>,
    pub result: Option<SessionResult>,
    pub result_good: Option<bool>,
}

type CompletionCallback = Box<dyn FnOnce(&SessionResult)>;

pub struct TrackingSession<A: AccuracyModel = SyntheticAccuracy> {
    exercise: ExerciseDescriptor,
    config: TrackingConfig,
    model: A,
    phase: TrackingPhase,
    rep_count: u32,
    samples: Vec<f32>,
    mistakes: MistakeLog,
    result: Option<SessionResult>,
    /// First tick of the current phase
    anchor_ms: Option<f64>,
    /// Tick timestamp at which the final rep was scored
    finalized_at_ms: Option<f64>,
    last_frame: Option<TrackingFrame>,
    video: VideoStatus,
    on_complete: Option<CompletionCallback>,
}

impl TrackingSession<SyntheticAccuracy> {
    /// Session with the synthetic accuracy model, seeded from config or OS
    pub fn synthetic(exercise: ExerciseDescriptor, config: TrackingConfig) -> Self {
        let model = match config.seed {
            Some(seed) => SyntheticAccuracy::seeded(seed),
            None => SyntheticAccuracy::from_entropy(),
        };
        Self::new(exercise, config, model)
    }
}

impl<A: AccuracyModel> TrackingSession<A> {
    /// Unusable timings in `config` fall back to their defaults
    pub fn new(exercise: ExerciseDescriptor, config: TrackingConfig, model: A) -> Self {
        let config = config.sanitized();
        log::info!("Tracking session opened: {}", exercise.name);
        Self {
            exercise,
            config,
            model,
            phase: TrackingPhase::Setup,
            rep_count: 0,
            samples: Vec::new(),
            mistakes: MistakeLog::default(),
            result: None,
            anchor_ms: None,
            finalized_at_ms: None,
            last_frame: None,
            video: VideoStatus::Pending,
            on_complete: None,
        }
    }

    /// Callback fired once when the host acknowledges the review
    pub fn with_completion(mut self, callback: impl FnOnce(&SessionResult) + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn exercise(&self) -> &ExerciseDescriptor {
        &self.exercise
    }

    pub fn phase(&self) -> TrackingPhase {
        self.phase
    }

    pub fn rep_count(&self) -> u32 {
        self.rep_count
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn mistakes(&self) -> &MistakeLog {
        &self.mistakes
    }

    pub fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }

    pub fn video_status(&self) -> VideoStatus {
        self.video
    }

    /// Camera state changes only affect the background layer
    pub fn set_video_status(&mut self, status: VideoStatus) {
        if status == VideoStatus::Unavailable && self.video != status {
            log::warn!("Camera unavailable, tracking continues without video background");
        }
        self.video = status;
    }

    pub fn video_warning(&self) -> Option<&'static str> {
        self.video.warning()
    }

    /// User pressed record. Only valid from setup.
    pub fn start_recording(&mut self) -> bool {
        if self.phase != TrackingPhase::Setup {
            return false;
        }
        log::info!("Recording started: {}", self.exercise.name);
        self.phase = TrackingPhase::Recording;
        self.rep_count = 0;
        self.samples.clear();
        self.mistakes.clear();
        self.anchor_ms = None;
        self.finalized_at_ms = None;
        self.last_frame = None;
        true
    }

    /// Host confirmed the review. Hands out the result and fires the
    /// completion callback, both once. `None` before review, leaving the
    /// session untouched.
    pub fn acknowledge(&mut self) -> Option<SessionResult> {
        if self.phase != TrackingPhase::Review {
            return None;
        }
        let result = self.result.take()?;
        if let Some(callback) = self.on_complete.take() {
            callback(&result);
        }
        log::info!("Tracking session acknowledged: {}", self.exercise.name);
        Some(result)
    }

    pub fn tick(&mut self, now_ms: f64) -> Step<TrackingFrame> {
        match self.phase {
            TrackingPhase::Setup => {
                let elapsed = self.elapsed(now_ms);
                Step::Continue(self.setup_frame(elapsed))
            }
            TrackingPhase::Recording => self.record(now_ms),
            TrackingPhase::Review => Step::Finish(self.review_frame()),
        }
    }

    fn elapsed(&mut self, now_ms: f64) -> f64 {
        let anchor = *self.anchor_ms.get_or_insert(now_ms);
        (now_ms - anchor).max(0.0)
    }

    fn viewport(&self) -> Vec2 {
        Vec2::from_array(self.config.viewport)
    }

    fn record(&mut self, now_ms: f64) -> Step<TrackingFrame> {
        if let Some(done_at) = self.finalized_at_ms {
            if now_ms - done_at >= self.config.finalize_delay_ms {
                self.phase = TrackingPhase::Review;
                log::info!("Tracking review ready: {:?}", self.result);
                return Step::Finish(self.review_frame());
            }
            // Hold the last recorded frame until review
            return match &self.last_frame {
                Some(frame) => Step::Continue(frame.clone()),
                None => Step::Continue(self.review_frame()),
            };
        }

        let elapsed = self.elapsed(now_ms);
        let cycle = rep_cycle(elapsed, self.config.rep_period_ms);
        let noise = form_noise(elapsed);
        let accuracy = clamp_accuracy(self.model.sample(elapsed));
        self.samples.push(accuracy);

        if let Some(mistake) = detect_mistake(accuracy, noise, elapsed) {
            if self.mistakes.insert(mistake) {
                log::debug!("Form fault at {:.0} ms: {}", elapsed, mistake);
            }
        }

        let target = self.config.target_reps;
        let rep_index = ((elapsed / self.config.rep_period_ms).floor() as u32).min(target);
        if rep_index > self.rep_count {
            self.rep_count = rep_index;
            log::debug!("Rep {}/{} counted", rep_index, target);
            if self.rep_count == target {
                let result = finalize(&self.samples, &self.mistakes, target);
                log::info!(
                    "Tracking finalised: {}% over {} reps",
                    result.accuracy,
                    result.reps
                );
                self.result = Some(result);
                self.finalized_at_ms = Some(now_ms);
            }
        }

        let frame = self.recording_frame(cycle, noise, accuracy);
        self.last_frame = Some(frame.clone());
        Step::Continue(frame)
    }

    fn frame(&self, primitives: Vec<Primitive>) -> TrackingFrame {
        TrackingFrame {
            phase: self.phase,
            rep_count: self.rep_count,
            target_reps: self.config.target_reps,
            accuracy: None,
            good_form: None,
            laser_y: None,
            viewport: self.config.viewport,
            video_background: self.video.shows_background(),
            video_warning: self.video.warning(),
            primitives,
            result: None,
            result_good: None,
        }
    }

    fn setup_frame(&self, elapsed: f64) -> TrackingFrame {
        let viewport = self.viewport();
        let period = self.config.scan_period_ms;
        let progress = (elapsed.rem_euclid(period) / period) as f32;
        let laser_y = viewport.y - progress * viewport.y;

        let mut primitives = vec![Primitive::line(
            vec2(0.0, laser_y),
            vec2(viewport.x, laser_y),
            Stroke::solid(colors::LASER, 3.0),
        )];
        primitives.extend(
            TrackingRig::baseline(viewport)
                .primitives(Stroke::solid(colors::DIM_BONE, 2.0), laser_y),
        );

        TrackingFrame {
            laser_y: Some(laser_y),
            ..self.frame(primitives)
        }
    }

    fn recording_frame(&self, cycle: f32, noise: f32, accuracy: f32) -> TrackingFrame {
        let good_form = accuracy > self.config.good_form_threshold;
        let color = if good_form {
            colors::GOOD
        } else {
            colors::ACCENT
        };
        let rig = TrackingRig::in_motion(self.viewport(), cycle, noise);

        let mut primitives = rig.primitives(Stroke::solid(color, 4.0), 0.0);
        let knee_angle = (110.0 + cycle * 40.0).round();
        let hip_angle = (130.0 + cycle * 30.0).round();
        primitives.push(Primitive::text(
            rig[RigJoint::RightKnee] + vec2(20.0, 0.0),
            format!("{}°", knee_angle),
            16.0,
            color,
        ));
        primitives.push(Primitive::text(
            rig[RigJoint::RightHip] + vec2(25.0, 0.0),
            format!("{}°", hip_angle),
            16.0,
            color,
        ));
        primitives.push(Primitive::text(
            vec2(15.0, 30.0),
            format!("Accuracy: {:.1}%", accuracy),
            16.0,
            color,
        ));

        TrackingFrame {
            accuracy: Some(accuracy),
            good_form: Some(good_form),
            ..self.frame(primitives)
        }
    }

    fn review_frame(&self) -> TrackingFrame {
        TrackingFrame {
            result: self.result.clone(),
            result_good: self.result.as_ref().map(SessionResult::is_good),
            ..self.frame(Vec::new())
        }
    }
}

impl<A: AccuracyModel> FrameEngine for TrackingSession<A> {
    type Frame = TrackingFrame;

    fn step(&mut self, now_ms: f64) -> Step<TrackingFrame> {
        self.tick(now_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::MuscleGroup;
    use crate::scheduler::{FrameScheduler, ManualScheduler, Ticker};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    const FRAME_MS: f64 = 16.0;

    fn squat() -> ExerciseDescriptor {
        ExerciseDescriptor::new("Squats", MuscleGroup::Legs)
    }

    fn session<A: AccuracyModel>(model: A) -> TrackingSession<A> {
        TrackingSession::new(squat(), TrackingConfig::default(), model)
    }

    /// Tick at display rate from `start` until the session reaches review
    fn run_to_review<A: AccuracyModel>(s: &mut TrackingSession<A>, start: f64) -> f64 {
        let mut now = start;
        while s.phase() != TrackingPhase::Review {
            s.tick(now);
            now += FRAME_MS;
            assert!(now < start + 60_000.0, "session never reached review");
        }
        now
    }

    #[test]
    fn test_setup_scans_without_recording() {
        let mut s = session(ConstantAccuracy(90.0));
        let first = match s.tick(1000.0) {
            Step::Continue(frame) => frame,
            Step::Finish(_) => panic!("setup never finishes on its own"),
        };
        assert_eq!(first.laser_y, Some(640.0));

        let Step::Continue(mid) = s.tick(2000.0) else {
            panic!("setup should continue");
        };
        assert_eq!(mid.laser_y, Some(320.0));

        s.tick(50_000.0);
        assert_eq!(s.phase(), TrackingPhase::Setup);
        assert!(s.samples().is_empty());
        assert_eq!(s.rep_count(), 0);
    }

    #[test]
    fn test_forced_excellent_session() {
        let mut s = session(ConstantAccuracy(90.0));
        s.tick(0.0);
        assert!(s.start_recording());
        assert!(!s.start_recording());

        run_to_review(&mut s, 100.0);

        assert_eq!(
            s.result(),
            Some(&SessionResult {
                accuracy: 90,
                reps: 5,
                mistakes: vec![EXCELLENT_EXECUTION.to_string()],
            })
        );
    }

    #[test]
    fn test_five_cycles_reach_review_within_delay() {
        let mut s = session(SyntheticAccuracy::seeded(7));
        s.start_recording();

        s.tick(0.0);
        s.tick(14_999.0);
        assert_eq!(s.rep_count(), 4);
        assert!(s.result().is_none());

        s.tick(15_000.0);
        assert_eq!(s.rep_count(), 5);
        let result = s.result().cloned().expect("finalised at the fifth rep");
        assert!(!result.mistakes.is_empty() && result.mistakes.len() <= 3);
        assert!(result.accuracy <= 100);
        assert_eq!(s.phase(), TrackingPhase::Recording);

        s.tick(15_500.0);
        assert_eq!(s.phase(), TrackingPhase::Recording);
        let samples = s.samples().len();

        assert!(matches!(s.tick(15_800.0), Step::Finish(_)));
        assert_eq!(s.phase(), TrackingPhase::Review);
        // No sampling during the finalize delay
        assert_eq!(s.samples().len(), samples);
    }

    #[test]
    fn test_rep_count_monotonic_and_capped() {
        let mut s = session(SyntheticAccuracy::seeded(3));
        s.start_recording();
        let mut last = 0;
        let mut now = 0.0;
        while s.phase() == TrackingPhase::Recording {
            s.tick(now);
            assert!(s.rep_count() >= last);
            assert!(s.rep_count() <= 5);
            last = s.rep_count();
            now += 40.0;
        }
        assert_eq!(last, 5);
    }

    #[test]
    fn test_stalled_frame_clamps_rep_index() {
        let mut s = session(ConstantAccuracy(80.0));
        s.start_recording();
        s.tick(0.0);
        s.tick(40_000.0);
        assert_eq!(s.rep_count(), 5);
        assert!(s.result().is_some());
    }

    #[test]
    fn test_low_accuracy_records_faults() {
        // Noise is large around 500 ms and small around 0 ms
        let mut s = session(ConstantAccuracy(60.0));
        s.start_recording();
        s.tick(0.0);
        s.tick(10.0);
        s.tick(500.0);
        assert_eq!(s.mistakes().entries(), &[CORE_INSTABILITY, KNEE_VALGUS]);

        let now = run_to_review(&mut s, 600.0);
        assert!(now > 15_000.0);
        let result = s.result().expect("review holds a result");
        assert_eq!(result.accuracy, 60);
        assert_eq!(result.mistakes[0], CORE_INSTABILITY);
        assert!(!result.is_good());
    }

    #[test]
    fn test_clean_mediocre_session_gets_fallback() {
        let mut s = session(ConstantAccuracy(85.0));
        s.start_recording();
        run_to_review(&mut s, 0.0);
        let result = s.result().expect("review holds a result");
        assert_eq!(result.accuracy, 85);
        assert_eq!(result.mistakes, vec![INCOMPLETE_RANGE.to_string()]);
    }

    #[test]
    fn test_accuracy_always_clamped() {
        let mut s = session(AccuracyFn(|elapsed: f64| -> f32 {
            if elapsed < 100.0 {
                250.0
            } else {
                -40.0
            }
        }));
        s.start_recording();
        let mut now = 0.0;
        while s.phase() != TrackingPhase::Review {
            if let Step::Continue(frame) = s.tick(now) {
                if let Some(acc) = frame.accuracy {
                    assert!((0.0..=100.0).contains(&acc));
                }
            }
            now += FRAME_MS;
        }
        assert!(s.samples().iter().all(|a| (0.0..=100.0).contains(a)));
    }

    #[test]
    fn test_recording_frame_overlays() {
        let mut s = session(ConstantAccuracy(90.0));
        s.start_recording();
        let Step::Continue(frame) = s.tick(0.0) else {
            panic!("recording continues");
        };
        assert_eq!(frame.good_form, Some(true));
        let texts: Vec<&str> = frame
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&"110°"));
        assert!(texts.contains(&"130°"));
        assert!(texts.contains(&"Accuracy: 90.0%"));
        assert!(texts.contains(&"R-Knee"));
    }

    #[test]
    fn test_video_loss_does_not_change_flow() {
        let mut with_video = session(ConstantAccuracy(80.0));
        let mut without = session(ConstantAccuracy(80.0));
        with_video.set_video_status(VideoStatus::Live);
        without.set_video_status(VideoStatus::Unavailable);
        assert_eq!(without.video_warning(), Some(crate::video::CAMERA_REQUIRED_WARNING));

        for s in [&mut with_video, &mut without] {
            s.start_recording();
        }
        let a = run_to_review(&mut with_video, 0.0);
        let b = run_to_review(&mut without, 0.0);
        assert_eq!(a, b);
        assert_eq!(with_video.result(), without.result());

        let Step::Finish(frame) = without.tick(a) else {
            panic!("review is terminal");
        };
        assert!(!frame.video_background);
        assert!(frame.result.is_some());
    }

    #[test]
    fn test_acknowledge_fires_completion_once() {
        let fired = Rc::new(Cell::new(0));
        let seen = Rc::clone(&fired);
        let mut s = session(ConstantAccuracy(90.0)).with_completion(move |result| {
            assert_eq!(result.reps, 5);
            seen.set(seen.get() + 1);
        });
        s.start_recording();
        run_to_review(&mut s, 0.0);

        let result = s.acknowledge().expect("result after review");
        assert_eq!(result.accuracy, 90);
        assert_eq!(fired.get(), 1);
        assert_eq!(s.acknowledge(), None);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_early_acknowledge_keeps_session_live() {
        let fired = Rc::new(Cell::new(0));
        let seen = Rc::clone(&fired);
        let mut s = session(ConstantAccuracy(90.0))
            .with_completion(move |_| seen.set(seen.get() + 1));
        assert_eq!(s.acknowledge(), None);
        s.start_recording();
        s.tick(0.0);
        s.tick(4000.0);
        assert_eq!(s.acknowledge(), None);
        assert_eq!(s.phase(), TrackingPhase::Recording);
        assert_eq!(s.rep_count(), 1);

        run_to_review(&mut s, 4016.0);
        assert_eq!(s.acknowledge().map(|r| r.reps), Some(5));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_zero_periods_still_count_reps_one_at_a_time() {
        let config = TrackingConfig {
            rep_period_ms: 0.0,
            scan_period_ms: 0.0,
            finalize_delay_ms: -10.0,
            ..TrackingConfig::default()
        };
        let mut s = TrackingSession::new(squat(), config, ConstantAccuracy(90.0));

        let Step::Continue(setup) = s.tick(500.0) else {
            panic!("setup continues");
        };
        assert!(setup.laser_y.is_some_and(f32::is_finite));

        s.start_recording();
        s.tick(1000.0);
        let Step::Continue(frame) = s.tick(1016.0) else {
            panic!("recording continues");
        };
        assert_eq!(s.rep_count(), 0);
        assert!(s.result().is_none());
        assert!(frame.primitives.iter().all(|p| match p {
            Primitive::Polyline { points, .. } => points.iter().all(|v| v.is_finite()),
            Primitive::Text { text, .. } => !text.contains("NaN"),
            _ => true,
        }));

        let mut last = 0;
        let mut now = 1032.0;
        while s.phase() == TrackingPhase::Recording {
            s.tick(now);
            assert!(s.rep_count() <= last + 1);
            last = s.rep_count();
            now += FRAME_MS;
        }
        assert_eq!(last, 5);
        // Default 3000 ms reps: the fifth lands 15 s after recording starts
        assert!(now >= 16_000.0);
    }

    #[test]
    fn test_teardown_before_review_emits_nothing() {
        let fired = Rc::new(Cell::new(false));
        let seen = Rc::clone(&fired);
        let mut s = session(ConstantAccuracy(90.0)).with_completion(move |_| seen.set(true));
        s.start_recording();
        s.tick(0.0);
        s.tick(6000.0);
        assert_eq!(s.acknowledge(), None);
        assert!(!fired.get());
    }

    #[test]
    fn test_ticker_driven_session() {
        let scheduler = ManualScheduler::new();
        let phases = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&phases);
        let ticker = Ticker::new(
            session(ConstantAccuracy(90.0)),
            scheduler.clone() as Rc<dyn FrameScheduler>,
            move |frame: &TrackingFrame| sink.borrow_mut().push(frame.phase),
        );
        ticker.start();
        scheduler.run_frame(0.0);
        scheduler.run_frame(16.0);
        ticker.with_engine_mut(|s| s.start_recording());

        let mut now = 32.0;
        while scheduler.run_frame(now) > 0 {
            now += FRAME_MS;
        }

        assert!(!ticker.is_running());
        assert_eq!(phases.borrow().last(), Some(&TrackingPhase::Review));
        let mut session = ticker.into_engine().expect("sole owner");
        assert_eq!(session.acknowledge().map(|r| r.reps), Some(5));
    }

    #[test]
    fn test_ticker_teardown_mid_session() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(Cell::new(false));
        let seen = Rc::clone(&fired);
        let ticker = Ticker::new(
            session(ConstantAccuracy(90.0)).with_completion(move |_| seen.set(true)),
            scheduler.clone() as Rc<dyn FrameScheduler>,
            |_: &TrackingFrame| {},
        );
        ticker.start();
        ticker.with_engine_mut(|s| s.start_recording());
        scheduler.run_frame(0.0);
        scheduler.run_frame(5000.0);

        drop(ticker);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.cancelled().len(), 1);
        assert!(!fired.get());
    }
}

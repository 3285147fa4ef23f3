//! Centralized application state with context passing pattern
//!
//! `AppState` owns at most one demo playback and one tracking session, each
//! driven by its own `Ticker`. Tick sinks write the newest frame into shared
//! slots so the host can poll them between animation frames. WASM bindings
//! are thin wrappers that reach the state through `with_app_state_mut`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::EngineConfig;
use crate::demo::{DemoFrame, DemoPlayback};
use crate::exercise::ExerciseDescriptor;
use crate::scheduler::{FrameScheduler, Ticker};
use crate::tracking::{SessionResult, TrackingFrame, TrackingPhase, TrackingSession};
use crate::video::VideoStatus;

/// Newest frame emitted by a ticker
pub type FrameSlot<F> = Rc<RefCell<Option<F>>>;

pub struct AppState {
    pub config: EngineConfig,
    scheduler: Rc<dyn FrameScheduler>,
    demo: Option<Ticker<DemoPlayback>>,
    demo_frame: FrameSlot<DemoFrame>,
    tracking: Option<Ticker<TrackingSession>>,
    tracking_frame: FrameSlot<TrackingFrame>,
    video: VideoStatus,
}

impl AppState {
    pub fn new(config: EngineConfig, scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self {
            config,
            scheduler,
            demo: None,
            demo_frame: Rc::new(RefCell::new(None)),
            tracking: None,
            tracking_frame: Rc::new(RefCell::new(None)),
            video: VideoStatus::Pending,
        }
    }

    /// Replace any running demo with a fresh one for `exercise`
    pub fn start_demo(&mut self, exercise: ExerciseDescriptor) -> bool {
        self.stop_demo();
        let slot = Rc::clone(&self.demo_frame);
        let ticker = Ticker::new(
            DemoPlayback::new(exercise, self.config.demo.clone()),
            Rc::clone(&self.scheduler),
            move |frame: &DemoFrame| *slot.borrow_mut() = Some(frame.clone()),
        );
        let started = ticker.start();
        self.demo = Some(ticker);
        started
    }

    /// Rewind the current demo. Returns false when there is none.
    pub fn replay_demo(&mut self) -> bool {
        match &self.demo {
            Some(ticker) => {
                ticker.with_engine_mut(DemoPlayback::replay);
                ticker.start()
            }
            None => false,
        }
    }

    /// Tear down the demo. No further demo frames are emitted.
    pub fn stop_demo(&mut self) {
        self.demo = None;
        self.demo_frame.borrow_mut().take();
    }

    pub fn demo_frame(&self) -> Option<DemoFrame> {
        self.demo_frame.borrow().clone()
    }

    pub fn demo_running(&self) -> bool {
        self.demo.as_ref().is_some_and(Ticker::is_running)
    }

    /// Open a tracking session in its setup phase. `seed` overrides the
    /// configured jitter seed.
    pub fn start_tracking(&mut self, exercise: ExerciseDescriptor, seed: Option<u64>) -> bool {
        self.stop_tracking();
        let mut config = self.config.tracking.clone();
        if seed.is_some() {
            config.seed = seed;
        }
        let mut session = TrackingSession::synthetic(exercise, config);
        session.set_video_status(self.video);

        let slot = Rc::clone(&self.tracking_frame);
        let ticker = Ticker::new(
            session,
            Rc::clone(&self.scheduler),
            move |frame: &TrackingFrame| *slot.borrow_mut() = Some(frame.clone()),
        );
        let started = ticker.start();
        self.tracking = Some(ticker);
        started
    }

    pub fn begin_recording(&mut self) -> bool {
        self.tracking
            .as_ref()
            .is_some_and(|ticker| ticker.with_engine_mut(TrackingSession::start_recording))
    }

    pub fn tracking_frame(&self) -> Option<TrackingFrame> {
        self.tracking_frame.borrow().clone()
    }

    pub fn tracking_phase(&self) -> Option<TrackingPhase> {
        self.tracking
            .as_ref()
            .map(|ticker| ticker.with_engine(TrackingSession::phase))
    }

    /// Close a reviewed session and hand back its result. The session stays
    /// open if it has not reached review yet.
    pub fn acknowledge_tracking(&mut self) -> Option<SessionResult> {
        let result = self
            .tracking
            .as_ref()?
            .with_engine_mut(TrackingSession::acknowledge)?;
        self.tracking = None;
        self.tracking_frame.borrow_mut().take();
        Some(result)
    }

    /// Discard the tracking session without producing a result
    pub fn stop_tracking(&mut self) {
        if let Some(ticker) = self.tracking.take() {
            log::info!(
                "Tracking session closed: {}",
                ticker.with_engine(|s| s.exercise().name.clone())
            );
        }
        self.tracking_frame.borrow_mut().take();
    }

    pub fn video_status(&self) -> VideoStatus {
        self.video
    }

    pub fn set_video_status(&mut self, status: VideoStatus) {
        self.video = status;
        if let Some(ticker) = &self.tracking {
            ticker.with_engine_mut(|session| session.set_video_status(status));
        }
    }
}

// One engine per wasm instance, reached only from the bindings in lib.rs
thread_local! {
    static APP_STATE: RefCell<Option<AppState>> = const { RefCell::new(None) };
}

/// Read the engine state, e.g. to pull the latest demo or tracking frame.
/// `None` until `init_engine` has run.
pub fn with_app_state<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&AppState) -> R,
{
    APP_STATE.with(|state| {
        let borrowed = state.borrow();
        borrowed.as_ref().map(f)
    })
}

/// Start, stop or steer the demo and tracking sessions. The borrow ends
/// before any tick fires, since ticks only touch their own ticker.
pub fn with_app_state_mut<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut AppState) -> R,
{
    APP_STATE.with(|state| {
        let mut borrowed = state.borrow_mut();
        borrowed.as_mut().map(f)
    })
}

/// Install the global AppState, dropping any previous one and its tickers
pub fn initialize_app_state(config: EngineConfig, scheduler: Rc<dyn FrameScheduler>) {
    APP_STATE.with(|state| {
        *state.borrow_mut() = Some(AppState::new(config, scheduler));
    });
}

//! Frame scheduling: the host's "call me on the next frame" capability.
//!
//! Engines implement `FrameEngine`; a `Ticker` owns one engine and keeps a
//! single pending tick registration with a `FrameScheduler`, re-requesting a
//! tick after every step until the engine finishes or the ticker is stopped.
//! Stopping releases the pending handle exactly once. A scheduler that
//! refuses a request has been withdrawn by the host, and the ticker stops
//! without emitting anything further.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Callback invoked with the host's monotonic timestamp in milliseconds
pub type TickCallback = Box<dyn FnOnce(f64)>;

/// Cancellation handle for one pending tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(pub u32);

pub trait FrameScheduler {
    /// Register `callback` for the next frame. `None` means the capability
    /// has been withdrawn and no tick will ever fire.
    fn request_tick(&self, callback: TickCallback) -> Option<TickHandle>;

    fn cancel_tick(&self, handle: TickHandle);
}

/// Outcome of one engine step
#[derive(Debug, Clone, PartialEq)]
pub enum Step<F> {
    /// Emit the frame and keep ticking
    Continue(F),
    /// Emit the final frame and stop
    Finish(F),
}

/// Something advanced once per frame
pub trait FrameEngine {
    type Frame;

    fn step(&mut self, now_ms: f64) -> Step<Self::Frame>;
}

type FrameSink<F> = Box<dyn FnMut(&F)>;

struct TickerShared<E: FrameEngine> {
    engine: E,
    sink: FrameSink<E::Frame>,
    pending: Option<TickHandle>,
    running: bool,
}

/// Cancellable repeating tick registration driving one engine
pub struct Ticker<E: FrameEngine + 'static> {
    shared: Rc<RefCell<TickerShared<E>>>,
    scheduler: Rc<dyn FrameScheduler>,
}

impl<E: FrameEngine + 'static> Ticker<E> {
    /// Wrap an engine. Nothing is scheduled until `start`.
    pub fn new(
        engine: E,
        scheduler: Rc<dyn FrameScheduler>,
        sink: impl FnMut(&E::Frame) + 'static,
    ) -> Self {
        Self {
            shared: Rc::new(RefCell::new(TickerShared {
                engine,
                sink: Box::new(sink),
                pending: None,
                running: false,
            })),
            scheduler,
        }
    }

    /// Begin ticking. Returns false if the scheduler refused the request.
    pub fn start(&self) -> bool {
        {
            let mut shared = self.shared.borrow_mut();
            if shared.running {
                return true;
            }
            shared.running = true;
        }
        schedule(&self.shared, &self.scheduler)
    }

    /// Stop ticking and release the pending handle, if any
    pub fn stop(&self) {
        let pending = {
            let mut shared = self.shared.borrow_mut();
            shared.running = false;
            shared.pending.take()
        };
        if let Some(handle) = pending {
            self.scheduler.cancel_tick(handle);
        }
    }

    pub fn is_running(&self) -> bool {
        self.shared.borrow().running
    }

    pub fn with_engine<R>(&self, f: impl FnOnce(&E) -> R) -> R {
        f(&self.shared.borrow().engine)
    }

    pub fn with_engine_mut<R>(&self, f: impl FnOnce(&mut E) -> R) -> R {
        f(&mut self.shared.borrow_mut().engine)
    }

    /// Stop and hand back the engine
    pub fn into_engine(self) -> Option<E> {
        let shared = Rc::clone(&self.shared);
        // Drop stops the ticker; pending callbacks only hold weak references
        drop(self);
        Rc::try_unwrap(shared)
            .ok()
            .map(|cell| cell.into_inner().engine)
    }
}

impl<E: FrameEngine + 'static> Drop for Ticker<E> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn schedule<E: FrameEngine + 'static>(
    shared: &Rc<RefCell<TickerShared<E>>>,
    scheduler: &Rc<dyn FrameScheduler>,
) -> bool {
    let weak_shared = Rc::downgrade(shared);
    let weak_scheduler: Weak<dyn FrameScheduler> = Rc::downgrade(scheduler);
    let callback: TickCallback = Box::new(move |now_ms: f64| {
        let (Some(shared), Some(scheduler)) = (weak_shared.upgrade(), weak_scheduler.upgrade())
        else {
            return;
        };
        on_tick(&shared, &scheduler, now_ms);
    });

    match scheduler.request_tick(callback) {
        Some(handle) => {
            shared.borrow_mut().pending = Some(handle);
            true
        }
        None => {
            log::warn!("Frame scheduling withdrawn by host, stopping");
            let mut shared = shared.borrow_mut();
            shared.running = false;
            shared.pending = None;
            false
        }
    }
}

fn on_tick<E: FrameEngine + 'static>(
    shared: &Rc<RefCell<TickerShared<E>>>,
    scheduler: &Rc<dyn FrameScheduler>,
    now_ms: f64,
) {
    let (step, mut sink) = {
        let mut guard = shared.borrow_mut();
        guard.pending = None;
        if !guard.running {
            return;
        }
        let step = guard.engine.step(now_ms);
        // Sink runs without the borrow held so it may stop the ticker
        let sink = std::mem::replace(&mut guard.sink, Box::new(|_: &E::Frame| {}));
        (step, sink)
    };

    let finished = match &step {
        Step::Continue(frame) => {
            sink(frame);
            false
        }
        Step::Finish(frame) => {
            sink(frame);
            true
        }
    };

    let keep_going = {
        let mut guard = shared.borrow_mut();
        guard.sink = sink;
        if finished {
            guard.running = false;
        }
        guard.running
    };

    if keep_going {
        schedule(shared, scheduler);
    }
}

/// Scheduler driven by explicit `run_frame` calls. Used in tests and by
/// native hosts that own their own loop.
#[derive(Default)]
pub struct ManualScheduler {
    queue: RefCell<Vec<(TickHandle, TickCallback)>>,
    next_id: Cell<u32>,
    withdrawn: Cell<bool>,
    cancelled: RefCell<Vec<TickHandle>>,
}

impl ManualScheduler {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Fire every queued callback with `now_ms`. Returns how many fired.
    pub fn run_frame(&self, now_ms: f64) -> usize {
        let due = std::mem::take(&mut *self.queue.borrow_mut());
        let fired = due.len();
        for (_, callback) in due {
            callback(now_ms);
        }
        fired
    }

    /// Refuse all future requests and drop queued callbacks unfired
    pub fn withdraw(&self) {
        self.withdrawn.set(true);
        self.queue.borrow_mut().clear();
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Handles released through `cancel_tick`, in call order
    pub fn cancelled(&self) -> Vec<TickHandle> {
        self.cancelled.borrow().clone()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_tick(&self, callback: TickCallback) -> Option<TickHandle> {
        if self.withdrawn.get() {
            return None;
        }
        let handle = TickHandle(self.next_id.get());
        self.next_id.set(handle.0.wrapping_add(1));
        self.queue.borrow_mut().push((handle, callback));
        Some(handle)
    }

    fn cancel_tick(&self, handle: TickHandle) {
        self.cancelled.borrow_mut().push(handle);
        self.queue.borrow_mut().retain(|(queued, _)| *queued != handle);
    }
}

/// Browser scheduler backed by `requestAnimationFrame`.
///
/// Each request keeps its JS closure alive until it fires or is cancelled.
/// A fired closure cannot free itself while running, so it is released on
/// the next request instead.
#[cfg(target_arch = "wasm32")]
#[derive(Default)]
pub struct RafScheduler {
    live: RefCell<Vec<(TickHandle, wasm_bindgen::closure::Closure<dyn FnMut(f64)>)>>,
    fired: Rc<RefCell<Vec<TickHandle>>>,
}

#[cfg(target_arch = "wasm32")]
impl RafScheduler {
    /// Closures still held for pending or recently fired frames
    pub fn live_closures(&self) -> usize {
        self.live.borrow().len()
    }

    fn release_fired(&self) {
        let fired = std::mem::take(&mut *self.fired.borrow_mut());
        if !fired.is_empty() {
            self.live
                .borrow_mut()
                .retain(|(handle, _)| !fired.contains(handle));
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl FrameScheduler for RafScheduler {
    fn request_tick(&self, callback: TickCallback) -> Option<TickHandle> {
        use wasm_bindgen::closure::Closure;
        use wasm_bindgen::JsCast;

        self.release_fired();
        let window = web_sys::window()?;

        let own_handle: Rc<Cell<Option<TickHandle>>> = Rc::new(Cell::new(None));
        let slot = Rc::clone(&own_handle);
        let fired = Rc::clone(&self.fired);
        let mut callback = Some(callback);
        let closure = Closure::<dyn FnMut(f64)>::new(move |now_ms: f64| {
            if let Some(callback) = callback.take() {
                callback(now_ms);
            }
            // Marked only after the callback returns so a request made from
            // inside it never frees this closure mid-call
            if let Some(handle) = slot.get() {
                fired.borrow_mut().push(handle);
            }
        });

        let handle = window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .ok()
            .map(|id| TickHandle(id as u32))?;
        own_handle.set(Some(handle));
        self.live.borrow_mut().push((handle, closure));
        Some(handle)
    }

    fn cancel_tick(&self, handle: TickHandle) {
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.cancel_animation_frame(handle.0 as i32) {
                log::warn!("cancelAnimationFrame failed: {:?}", err);
            }
        }
        self.live
            .borrow_mut()
            .retain(|(pending, _)| *pending != handle);
    }
}

cfg_if::cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        /// Scheduler for the current platform
        pub fn default_scheduler() -> Rc<dyn FrameScheduler> {
            Rc::new(RafScheduler::default())
        }
    } else {
        /// Scheduler for the current platform
        pub fn default_scheduler() -> Rc<dyn FrameScheduler> {
            ManualScheduler::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts ticks and finishes after `limit`
    struct Counter {
        ticks: u32,
        limit: u32,
        last_now: f64,
    }

    impl FrameEngine for Counter {
        type Frame = u32;

        fn step(&mut self, now_ms: f64) -> Step<u32> {
            self.ticks += 1;
            self.last_now = now_ms;
            if self.ticks >= self.limit {
                Step::Finish(self.ticks)
            } else {
                Step::Continue(self.ticks)
            }
        }
    }

    fn counter(limit: u32) -> Counter {
        Counter {
            ticks: 0,
            limit,
            last_now: 0.0,
        }
    }

    fn recording_ticker(
        limit: u32,
        scheduler: &Rc<ManualScheduler>,
    ) -> (Ticker<Counter>, Rc<RefCell<Vec<u32>>>) {
        let frames = Rc::new(RefCell::new(Vec::new()));
        let sink_frames = Rc::clone(&frames);
        let ticker = Ticker::new(
            counter(limit),
            scheduler.clone() as Rc<dyn FrameScheduler>,
            move |frame: &u32| sink_frames.borrow_mut().push(*frame),
        );
        (ticker, frames)
    }

    #[test]
    fn test_ticker_runs_until_finish() {
        let scheduler = ManualScheduler::new();
        let (ticker, frames) = recording_ticker(3, &scheduler);
        assert!(ticker.start());

        for now in [16.0, 32.0, 48.0, 64.0] {
            scheduler.run_frame(now);
        }

        assert_eq!(*frames.borrow(), vec![1, 2, 3]);
        assert!(!ticker.is_running());
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(ticker.with_engine(|c| c.last_now), 48.0);
    }

    #[test]
    fn test_stop_releases_handle_once() {
        let scheduler = ManualScheduler::new();
        let (ticker, frames) = recording_ticker(10, &scheduler);
        ticker.start();
        scheduler.run_frame(16.0);

        ticker.stop();
        ticker.stop();
        drop(ticker);

        assert_eq!(scheduler.cancelled().len(), 1);
        assert_eq!(scheduler.run_frame(32.0), 0);
        assert_eq!(*frames.borrow(), vec![1]);
    }

    #[test]
    fn test_withdrawn_scheduler_stops_cleanly() {
        let scheduler = ManualScheduler::new();
        let (ticker, frames) = recording_ticker(10, &scheduler);
        ticker.start();
        scheduler.run_frame(16.0);

        scheduler.withdraw();
        assert_eq!(scheduler.run_frame(32.0), 0);
        ticker.stop();

        assert_eq!(*frames.borrow(), vec![1]);
        assert!(!ticker.start());
        assert!(!ticker.is_running());
    }

    #[test]
    fn test_restart_after_finish() {
        let scheduler = ManualScheduler::new();
        let (ticker, frames) = recording_ticker(1, &scheduler);
        ticker.start();
        scheduler.run_frame(16.0);
        assert!(!ticker.is_running());

        ticker.with_engine_mut(|c| c.ticks = 0);
        assert!(ticker.start());
        scheduler.run_frame(32.0);
        assert_eq!(*frames.borrow(), vec![1, 1]);
    }

    #[test]
    fn test_into_engine_returns_state() {
        let scheduler = ManualScheduler::new();
        let (ticker, _) = recording_ticker(10, &scheduler);
        ticker.start();
        scheduler.run_frame(5.0);
        scheduler.run_frame(6.0);

        let engine = ticker.into_engine().expect("no other owners");
        assert_eq!(engine.ticks, 2);
        assert_eq!(scheduler.pending(), 0);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;
    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_cancel_frees_frame_closure() {
        let scheduler = RafScheduler::default();
        let handle = scheduler
            .request_tick(Box::new(|_: f64| {}))
            .expect("window available");
        assert_eq!(scheduler.live_closures(), 1);

        scheduler.cancel_tick(handle);
        assert_eq!(scheduler.live_closures(), 0);
    }

    #[wasm_bindgen_test]
    fn test_repeated_teardown_holds_no_closures() {
        let scheduler: Rc<RafScheduler> = Rc::new(RafScheduler::default());
        for _ in 0..20 {
            let handle = scheduler
                .request_tick(Box::new(|_: f64| {}))
                .expect("window available");
            scheduler.cancel_tick(handle);
        }
        assert_eq!(scheduler.live_closures(), 0);
    }
}

//! Fixed-cadence timeline playback.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use log::warn;

use crate::model::{Frame, Timeline};

/// Default tick interval between presented frames.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Playback lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Playing,
    Finished,
}

/// Replays a frozen timeline at a fixed tick interval.
///
/// Each tick presents the frame at the cursor to the configured callback and
/// advances; once the timeline is exhausted the driver transitions to
/// `Finished` and stops ticking. The driver only ever reads frames from a
/// finalized timeline, so no locking is needed around the frames themselves.
#[derive(Clone)]
pub struct PlaybackDriver {
    timeline: Arc<Timeline>,
    present: Arc<Mutex<dyn Fn(usize, &Frame) + Send>>,
    interval: Duration,
    state: Arc<Mutex<DriverState>>,
    cursor: Arc<Mutex<usize>>,
    finish: Arc<AtomicBool>,
    thread_handle: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl PlaybackDriver {
    /// Create a driver for the given timeline and present callback.
    pub fn new(
        timeline: Timeline,
        present: Arc<Mutex<dyn Fn(usize, &Frame) + Send>>,
        interval: Duration,
    ) -> Self {
        Self {
            timeline: Arc::new(timeline),
            present,
            interval,
            state: Arc::new(Mutex::new(DriverState::Idle)),
            cursor: Arc::new(Mutex::new(0)),
            finish: Arc::new(AtomicBool::new(false)),
            thread_handle: Arc::new(Mutex::new(None)),
        }
    }

    fn run(&self) {
        loop {
            if self.finish.load(Ordering::Relaxed) {
                break;
            }
            if !self.tick() {
                break;
            }
            std::thread::sleep(self.interval);
        }
    }

    /// Present the frame at the cursor and advance.
    ///
    /// Returns `false` once the timeline is exhausted (transitioning to
    /// `Finished`) or when the driver is not playing.
    fn tick(&self) -> bool {
        if *self.state.lock().unwrap() != DriverState::Playing {
            return false;
        }

        let index = *self.cursor.lock().unwrap();
        match self.timeline.get(index) {
            Some(frame) => {
                (*self.present.lock().unwrap())(index, frame);
                *self.cursor.lock().unwrap() = index + 1;
                true
            }
            None => {
                *self.state.lock().unwrap() = DriverState::Finished;
                false
            }
        }
    }

    /// Begin playback from the first frame, replacing any active tick
    /// thread.
    pub fn start(&self) {
        self.stop_thread();
        *self.cursor.lock().unwrap() = 0;
        *self.state.lock().unwrap() = DriverState::Playing;
        self.finish.store(false, Ordering::Relaxed);

        let this = self.clone();
        let handle = std::thread::spawn(move || this.run());
        *self.thread_handle.lock().unwrap() = Some(handle);
    }

    /// Return to `Idle` from any state, discarding the cursor.
    pub fn stop(&self) {
        self.stop_thread();
        *self.state.lock().unwrap() = DriverState::Idle;
        *self.cursor.lock().unwrap() = 0;
    }

    fn stop_thread(&self) {
        self.finish.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread_handle.lock().unwrap().take() {
            if handle.thread().id() == std::thread::current().id() {
                warn!("playback stop called from tick thread; skipping join");
            } else if handle.join().is_err() {
                warn!("playback thread panicked during join");
            }
        }
    }

    pub fn state(&self) -> DriverState {
        *self.state.lock().unwrap()
    }

    pub fn is_finished(&self) -> bool {
        self.state() == DriverState::Finished
    }

    /// Index of the next frame to present.
    pub fn cursor(&self) -> usize {
        *self.cursor.lock().unwrap()
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Block the current thread until playback leaves the `Playing` state.
    pub fn sleep_until_end(&self) {
        loop {
            if self.state() != DriverState::Playing {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
    }
}

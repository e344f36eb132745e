//! Per-lane worker threads.
//!
//! Each lane runs its step emitter on a dedicated thread, funneling every
//! emitted step through the shared recorder and flagging completion when the
//! emitter returns.

use std::any::Any;
use std::thread;
use std::time::Duration;

use log::info;
use rand::Rng;

use crate::error::EngineError;
use crate::model::{Lane, Phase};
use crate::record::TimelineRecorder;
use crate::sorts::Algorithm;

/// Everything a lane worker owns: its identity, its exclusive working
/// values, and a clone of the shared recorder handle.
pub(crate) struct LaneContext {
    pub lane: Lane,
    pub algorithm: Algorithm,
    pub values: Vec<u32>,
    pub recorder: TimelineRecorder,
    pub step_delay: Option<Duration>,
}

/// Join handle for one spawned lane worker.
pub(crate) struct LaneHandle {
    lane: Lane,
    handle: thread::JoinHandle<()>,
}

impl LaneHandle {
    /// Wait for the worker to finish; a panic inside the worker surfaces as
    /// a lane failure.
    pub(crate) fn join(self) -> Result<(), EngineError> {
        self.handle.join().map_err(|payload| {
            EngineError::LaneFailed(format!(
                "{:?} lane worker panicked: {}",
                self.lane,
                panic_message(payload.as_ref())
            ))
        })
    }
}

/// Spawn a named worker thread for `context`.
///
/// A spawn failure is the run-start resource-exhaustion path; no step has
/// been recorded for this lane when it surfaces.
pub(crate) fn spawn(context: LaneContext) -> Result<LaneHandle, EngineError> {
    let lane = context.lane;
    let name = match lane {
        Lane::First => "lane-1",
        Lane::Second => "lane-2",
    };

    let handle = thread::Builder::new()
        .name(name.to_string())
        .spawn(move || run_lane(context))?;

    Ok(LaneHandle { lane, handle })
}

/// Drive one lane's emitter to completion against the shared recorder.
fn run_lane(context: LaneContext) {
    let LaneContext {
        lane,
        algorithm,
        mut values,
        recorder,
        step_delay,
    } = context;

    let phase = Phase::Running(algorithm);
    let mut rng = rand::thread_rng();

    algorithm.run(&mut values, &mut |snapshot, highlighted| {
        if let Some(max) = step_delay {
            let jitter = rng.gen_range(0..=max.as_micros() as u64);
            thread::sleep(Duration::from_micros(jitter));
        }
        recorder.record(lane, snapshot, highlighted, phase);
    });

    recorder.mark_complete(lane, &values);
    info!("{} complete on {:?} lane", algorithm.display_name(), lane);
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

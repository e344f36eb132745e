//! Run orchestration: lane spawn, join barrier, and finalize.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::RunConfig;
use crate::error::EngineError;
use crate::model::{Lane, Phase, Timeline};
use crate::record::TimelineRecorder;

mod worker;

use worker::{LaneContext, LaneHandle};

/// One in-flight race between two lanes.
///
/// A `RunContext` is constructed fresh per run and exclusively owns its
/// recorder and lane handles; no state is shared between runs. Dropping a
/// context mid-run abandons it: still-running workers keep their own clones
/// of the recorder handle and finish naturally against a timeline nobody
/// reads again.
pub struct RunContext {
    config: RunConfig,
    recorder: TimelineRecorder,
    pending: Option<(Vec<u32>, Vec<u32>)>,
    handles: Vec<LaneHandle>,
    step_delay: Option<Duration>,
}

impl RunContext {
    /// Build a run with independently shuffled `1..=sample_size` data sets.
    pub fn new(config: RunConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut rng = rand::thread_rng();
        Ok(Self::build(config, &mut rng))
    }

    /// Build a run with a fixed shuffle seed, for reproducible data sets.
    pub fn with_seed(config: RunConfig, seed: u64) -> Result<Self, EngineError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        Ok(Self::build(config, &mut rng))
    }

    fn build<R: Rng>(config: RunConfig, rng: &mut R) -> Self {
        let values1 = shuffled(config.sample_size, rng);
        let values2 = shuffled(config.sample_size, rng);

        Self {
            recorder: TimelineRecorder::new(values1.clone(), values2.clone()),
            config,
            pending: Some((values1, values2)),
            handles: Vec::new(),
            step_delay: None,
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Inject a randomized pause of up to `delay` before every recorded
    /// step. Used to stress lane interleavings and to slow demo runs.
    pub fn set_step_delay(&mut self, delay: Duration) {
        self.step_delay = Some(delay);
    }

    /// Launch both lane workers. A second call is a no-op.
    ///
    /// A spawn failure surfaces as [`EngineError::WorkerUnavailable`]; the
    /// run is abandoned and may be retried with a fresh context.
    pub fn start(&mut self) -> Result<(), EngineError> {
        let (values1, values2) = match self.pending.take() {
            Some(values) => values,
            None => return Ok(()),
        };

        for (lane, algorithm, values) in [
            (Lane::First, self.config.algorithm1, values1),
            (Lane::Second, self.config.algorithm2, values2),
        ] {
            let handle = worker::spawn(LaneContext {
                lane,
                algorithm,
                values,
                recorder: self.recorder.clone(),
                step_delay: self.step_delay,
            })?;
            self.handles.push(handle);
        }

        Ok(())
    }

    /// Block until both lanes finish, append the terminal frame, and return
    /// the frozen timeline.
    ///
    /// The barrier always releases: if a lane fails, the other lane is still
    /// joined, the terminal frame is recorded with both lanes marked
    /// "Failed", and no timeline is returned.
    pub fn join(mut self) -> Result<Timeline, EngineError> {
        if self.pending.is_some() {
            self.start()?;
        }

        let mut failures = Vec::new();
        for handle in self.handles.drain(..) {
            if let Err(err) = handle.join() {
                failures.push(err.to_string());
            }
        }

        if failures.is_empty() {
            Ok(self.recorder.finalize(Phase::Complete))
        } else {
            let _ = self.recorder.finalize(Phase::Failed);
            Err(EngineError::LaneFailed(failures.join("; ")))
        }
    }
}

/// Run one race to completion and return its timeline.
pub fn execute(config: RunConfig) -> Result<Timeline, EngineError> {
    let mut run = RunContext::new(config)?;
    run.start()?;
    run.join()
}

/// Run one race with a fixed shuffle seed and return its timeline.
pub fn execute_seeded(config: RunConfig, seed: u64) -> Result<Timeline, EngineError> {
    let mut run = RunContext::with_seed(config, seed)?;
    run.start()?;
    run.join()
}

fn shuffled<R: Rng>(sample_size: usize, rng: &mut R) -> Vec<u32> {
    let mut values: Vec<u32> = (1..=sample_size as u32).collect();
    values.shuffle(rng);
    values
}

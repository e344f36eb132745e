//! Thread-safe append-only frame recorder.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use log::warn;

use crate::model::{Frame, Lane, LaneState, Phase, Timeline};

struct RecorderInner {
    frames: Vec<Frame>,
    last: [LaneState; 2],
    complete: [bool; 2],
    frozen: bool,
}

impl RecorderInner {
    /// Build the combined frame for a step taken by `stepped`: its freshly
    /// updated state paired with the other lane's last recorded state.
    fn combined_frame(&self, stepped: Lane) -> Frame {
        let own = self.last[stepped.index()].clone();
        let mut other = self.last[stepped.other().index()].clone();
        other.phase = if self.complete[stepped.other().index()] {
            Phase::Complete
        } else {
            Phase::Waiting
        };

        match stepped {
            Lane::First => Frame {
                lane1: own,
                lane2: other,
            },
            Lane::Second => Frame {
                lane1: other,
                lane2: own,
            },
        }
    }

    fn terminal_frame(&self, outcome: Phase) -> Frame {
        let mut lane1 = self.last[0].clone();
        let mut lane2 = self.last[1].clone();
        lane1.highlighted.clear();
        lane2.highlighted.clear();
        lane1.phase = outcome;
        lane2.phase = outcome;
        Frame { lane1, lane2 }
    }
}

/// Clonable handle to the shared frame recorder for one run.
///
/// Every `record` call appends exactly one combined frame, built from the
/// stepping lane's deep-copied state and the other lane's last recorded
/// state. Appends are serialized by a mutex; arrival order reflects real
/// concurrent progress and is not deterministic across runs.
#[derive(Clone)]
pub struct TimelineRecorder {
    inner: Arc<Mutex<RecorderInner>>,
}

impl TimelineRecorder {
    /// Create a recorder seeded with both lanes' starting values. The dual
    /// "Initial State" frame is appended immediately.
    pub fn new(values1: Vec<u32>, values2: Vec<u32>) -> Self {
        let lane1 = LaneState::initial(values1);
        let lane2 = LaneState::initial(values2);
        let initial = Frame {
            lane1: lane1.clone(),
            lane2: lane2.clone(),
        };

        Self {
            inner: Arc::new(Mutex::new(RecorderInner {
                frames: vec![initial],
                last: [lane1, lane2],
                complete: [false, false],
                frozen: false,
            })),
        }
    }

    /// Append one combined frame for a step taken by `lane`.
    ///
    /// `values` and `highlighted` are copied before the lock is released, so
    /// the caller may keep mutating its working array immediately after this
    /// returns without affecting the appended frame.
    pub fn record(&self, lane: Lane, values: &[u32], highlighted: &BTreeSet<usize>, phase: Phase) {
        debug_assert!(highlighted.iter().all(|&index| index < values.len()));

        let mut inner = self.inner.lock().unwrap();
        if inner.frozen {
            warn!("step for {:?} arrived after finalize; dropped", lane);
            return;
        }

        inner.last[lane.index()] = LaneState {
            values: values.to_vec(),
            highlighted: highlighted.clone(),
            phase,
        };
        let frame = inner.combined_frame(lane);
        inner.frames.push(frame);
    }

    /// Mark `lane` finished. Every frame recorded afterwards shows the lane
    /// as "Complete" with its final values; no frame is appended here.
    pub fn mark_complete(&self, lane: Lane, values: &[u32]) {
        let mut inner = self.inner.lock().unwrap();
        if inner.frozen {
            return;
        }

        inner.complete[lane.index()] = true;
        inner.last[lane.index()] = LaneState {
            values: values.to_vec(),
            highlighted: BTreeSet::new(),
            phase: Phase::Complete,
        };
    }

    /// Number of frames appended so far.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append the terminal frame with both lanes at `outcome`, freeze the
    /// recorder, and return the finished timeline.
    ///
    /// This is the sole terminal transition; the returned timeline is
    /// immutable and the recorder accepts no further steps. Finalizing an
    /// already-frozen recorder returns the existing timeline unchanged.
    pub fn finalize(&self, outcome: Phase) -> Timeline {
        let mut inner = self.inner.lock().unwrap();
        if !inner.frozen {
            let terminal = inner.terminal_frame(outcome);
            inner.frames.push(terminal);
            inner.frozen = true;
        }
        Timeline::new(inner.frames.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hl(indices: &[usize]) -> BTreeSet<usize> {
        indices.iter().copied().collect()
    }

    fn recorder() -> TimelineRecorder {
        TimelineRecorder::new(vec![3, 1, 2], vec![2, 3, 1])
    }

    #[test]
    fn starts_with_dual_initial_frame() {
        let recorder = recorder();
        assert_eq!(recorder.len(), 1);

        let timeline = recorder.finalize(Phase::Complete);
        let first = timeline.first().unwrap();
        assert_eq!(first.lane1.phase, Phase::Initial);
        assert_eq!(first.lane2.phase, Phase::Initial);
        assert_eq!(first.lane1.values, vec![3, 1, 2]);
        assert_eq!(first.lane2.values, vec![2, 3, 1]);
    }

    #[test]
    fn appends_one_frame_per_record_call() {
        let recorder = recorder();
        let phase = Phase::Running(crate::sorts::Algorithm::Insertion);
        recorder.record(Lane::First, &[1, 3, 2], &hl(&[0, 1]), phase);
        recorder.record(Lane::First, &[1, 2, 3], &hl(&[1, 2]), phase);
        assert_eq!(recorder.len(), 3);
    }

    #[test]
    fn other_lane_reuses_last_known_state() {
        let recorder = recorder();
        let phase = Phase::Running(crate::sorts::Algorithm::Quick);
        recorder.record(Lane::First, &[1, 3, 2], &hl(&[0, 1]), phase);

        let timeline = recorder.finalize(Phase::Complete);
        let frame = timeline.get(1).unwrap();
        assert_eq!(frame.lane1.values, vec![1, 3, 2]);
        assert_eq!(frame.lane1.phase, phase);
        // Lane two has not stepped: initial values, shown as waiting.
        assert_eq!(frame.lane2.values, vec![2, 3, 1]);
        assert_eq!(frame.lane2.phase, Phase::Waiting);
        assert!(frame.lane2.highlighted.is_empty());
    }

    #[test]
    fn recorded_frames_are_isolated_from_later_mutation() {
        let recorder = recorder();
        let mut working = vec![1, 3, 2];
        let mut highlighted = hl(&[0, 1]);
        recorder.record(
            Lane::First,
            &working,
            &highlighted,
            Phase::Running(crate::sorts::Algorithm::Insertion),
        );

        working.swap(1, 2);
        working[0] = 99;
        highlighted.insert(2);

        let timeline = recorder.finalize(Phase::Complete);
        let frame = timeline.get(1).unwrap();
        assert_eq!(frame.lane1.values, vec![1, 3, 2]);
        assert_eq!(frame.lane1.highlighted, hl(&[0, 1]));
    }

    #[test]
    fn completed_lane_shows_complete_in_later_frames() {
        let recorder = recorder();
        recorder.mark_complete(Lane::First, &[1, 2, 3]);
        recorder.record(
            Lane::Second,
            &[2, 1, 3],
            &hl(&[0, 1]),
            Phase::Running(crate::sorts::Algorithm::Selection),
        );

        let timeline = recorder.finalize(Phase::Complete);
        let frame = timeline.get(1).unwrap();
        assert_eq!(frame.lane1.phase, Phase::Complete);
        assert_eq!(frame.lane1.values, vec![1, 2, 3]);
        assert!(frame.lane1.highlighted.is_empty());
        assert_eq!(
            frame.lane2.phase,
            Phase::Running(crate::sorts::Algorithm::Selection)
        );
    }

    #[test]
    fn finalize_appends_terminal_frame_with_cleared_highlights() {
        let recorder = recorder();
        let phase = Phase::Running(crate::sorts::Algorithm::Merge);
        recorder.record(Lane::Second, &[1, 2, 3], &hl(&[2]), phase);

        let timeline = recorder.finalize(Phase::Complete);
        assert_eq!(timeline.len(), 3);
        let last = timeline.last().unwrap();
        assert_eq!(last.lane1.phase, Phase::Complete);
        assert_eq!(last.lane2.phase, Phase::Complete);
        assert!(last.lane1.highlighted.is_empty());
        assert!(last.lane2.highlighted.is_empty());
    }

    #[test]
    fn failed_runs_finalize_with_failed_labels() {
        let recorder = recorder();
        let timeline = recorder.finalize(Phase::Failed);
        let last = timeline.last().unwrap();
        assert_eq!(last.lane1.phase, Phase::Failed);
        assert_eq!(last.lane2.phase, Phase::Failed);
    }

    #[test]
    fn records_after_finalize_are_dropped() {
        let recorder = recorder();
        recorder.finalize(Phase::Complete);
        let before = recorder.len();
        recorder.record(
            Lane::First,
            &[1, 2, 3],
            &hl(&[0]),
            Phase::Running(crate::sorts::Algorithm::Insertion),
        );
        recorder.mark_complete(Lane::First, &[1, 2, 3]);
        assert_eq!(recorder.len(), before);
    }

    #[test]
    fn bracket_frames_exist_even_without_steps() {
        let recorder = TimelineRecorder::new(vec![1], vec![1]);
        let timeline = recorder.finalize(Phase::Complete);
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.first().unwrap().lane1.phase, Phase::Initial);
        assert_eq!(timeline.last().unwrap().lane1.phase, Phase::Complete);
    }
}

//! Paired lane snapshots.

use super::lane::{Lane, LaneState};

/// An immutable snapshot of both lanes captured at one instant.
///
/// Both lane states are deep copies taken at capture time; a frame never
/// observes later mutations of a lane's live working array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub lane1: LaneState,
    pub lane2: LaneState,
}

impl Frame {
    /// The captured state for `lane`.
    pub fn lane(&self, lane: Lane) -> &LaneState {
        match lane {
            Lane::First => &self.lane1,
            Lane::Second => &self.lane2,
        }
    }
}

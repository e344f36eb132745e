//! Step-emitting sorting algorithms.
//!
//! Each module wraps one algorithm: the algorithm mutates the slice in place
//! and invokes the emit callback once per visually meaningful comparison or
//! swap, exposing the live array contents and the set of indices involved at
//! that exact instant. The callback blocks the algorithm until it returns, so
//! a recorder always captures a fully stable, transient state.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub mod insertion;
pub mod merge;
pub mod quick;
pub mod selection;

/// Callback invoked at every step with the array contents and the indices
/// involved in the current comparison or swap.
pub type StepFn<'a> = dyn FnMut(&[u32], &BTreeSet<usize>) + 'a;

/// Selectable sorting algorithm for one lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Insertion,
    Selection,
    Quick,
    Merge,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Insertion,
        Algorithm::Selection,
        Algorithm::Quick,
        Algorithm::Merge,
    ];

    /// Label shown for a lane while this algorithm is running.
    pub fn display_name(&self) -> &'static str {
        match self {
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Selection => "Selection Sort",
            Algorithm::Quick => "Quick Sort",
            Algorithm::Merge => "Merge Sort",
        }
    }

    /// Sort `values` in place, emitting one step per comparison/swap event.
    pub fn run(&self, values: &mut [u32], emit: &mut StepFn) {
        match self {
            Algorithm::Insertion => insertion::sort(values, emit),
            Algorithm::Selection => selection::sort(values, emit),
            Algorithm::Quick => quick::sort(values, emit),
            Algorithm::Merge => merge::sort(values, emit),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Algorithm {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "insertion" => Ok(Algorithm::Insertion),
            "selection" => Ok(Algorithm::Selection),
            "quick" => Ok(Algorithm::Quick),
            "merge" => Ok(Algorithm::Merge),
            other => Err(EngineError::InvalidConfiguration(format!(
                "unknown algorithm {:?} (expected insertion, selection, quick or merge)",
                other
            ))),
        }
    }
}

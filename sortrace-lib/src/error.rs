use std::fmt::{Display, Formatter};

/// Error type for run configuration and lane execution.
#[derive(Debug)]
pub enum EngineError {
    InvalidConfiguration(String),
    InvalidRange { low: usize, high: usize },
    WorkerUnavailable(std::io::Error),
    LaneFailed(String),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfiguration(err) => write!(f, "invalid configuration: {}", err),
            Self::InvalidRange { low, high } => {
                write!(f, "invalid range: low {} exceeds high {}", low, high)
            }
            Self::WorkerUnavailable(err) => write!(f, "worker thread unavailable: {}", err),
            Self::LaneFailed(err) => write!(f, "lane failed: {}", err),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<std::io::Error> for EngineError {
    fn from(value: std::io::Error) -> Self {
        Self::WorkerUnavailable(value)
    }
}

//! Run configuration for a two-lane race.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::sorts::Algorithm;

/// Sample sizes accepted by the control surface.
pub const SAMPLE_SIZES: [usize; 4] = [16, 32, 48, 64];

/// Configuration for one race: an algorithm per lane plus the shared
/// sample size. Created fresh each time a run starts; both lanes are
/// initialized with an independent random permutation of `1..=sample_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub algorithm1: Algorithm,
    pub algorithm2: Algorithm,
    pub sample_size: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            algorithm1: Algorithm::Insertion,
            algorithm2: Algorithm::Selection,
            sample_size: SAMPLE_SIZES[0],
        }
    }
}

impl RunConfig {
    /// Build a validated configuration.
    pub fn new(
        algorithm1: Algorithm,
        algorithm2: Algorithm,
        sample_size: usize,
    ) -> Result<Self, EngineError> {
        let config = Self {
            algorithm1,
            algorithm2,
            sample_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject sample sizes outside the enumerated set, before any lane starts.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !SAMPLE_SIZES.contains(&self.sample_size) {
            return Err(EngineError::InvalidConfiguration(format!(
                "sample size {} not one of {:?}",
                self.sample_size, SAMPLE_SIZES
            )));
        }
        Ok(())
    }

    /// Parse a configuration from JSON, e.g.
    /// `{"algorithm1":"quick","algorithm2":"merge","sample_size":32}`.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| EngineError::InvalidConfiguration(format!("config json: {}", err)))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        let config = RunConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.algorithm1, Algorithm::Insertion);
        assert_eq!(config.algorithm2, Algorithm::Selection);
        assert_eq!(config.sample_size, 16);
    }

    #[test]
    fn rejects_sample_size_outside_enumerated_set() {
        for size in [0, 1, 15, 17, 100] {
            assert!(RunConfig::new(Algorithm::Quick, Algorithm::Merge, size).is_err());
        }
        for size in SAMPLE_SIZES {
            assert!(RunConfig::new(Algorithm::Quick, Algorithm::Merge, size).is_ok());
        }
    }

    #[test]
    fn deserializes_lowercase_selectors() {
        let json = r#"{"algorithm1":"quick","algorithm2":"merge","sample_size":32}"#;
        let config = RunConfig::from_json(json).expect("deserialize config");
        assert_eq!(config.algorithm1, Algorithm::Quick);
        assert_eq!(config.algorithm2, Algorithm::Merge);
        assert_eq!(config.sample_size, 32);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = RunConfig::from_json(r#"{"sample_size":48}"#).expect("deserialize config");
        assert_eq!(config.algorithm1, Algorithm::Insertion);
        assert_eq!(config.sample_size, 48);
    }

    #[test]
    fn json_with_bad_sample_size_is_rejected() {
        assert!(RunConfig::from_json(r#"{"sample_size":12}"#).is_err());
        assert!(RunConfig::from_json(r#"{"algorithm1":"bogo"}"#).is_err());
    }
}

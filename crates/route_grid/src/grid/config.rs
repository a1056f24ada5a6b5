//! Configuration for a single grid generation run.
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::Coordinate;

pub const DEFAULT_VESSEL_LENGTH_M: f64 = 15.0;

/// Corridor endpoints, vessel footprint, and execution options for a grid run.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub origin: Coordinate,
    pub destination: Coordinate,
    /// Vessel length in meters; must be finite and non-negative.
    #[serde(default = "default_vessel_length")]
    pub vessel_length_m: f64,
    /// Evaluate exclusions across worker threads when the `parallel` feature is on.
    #[serde(default = "default_parallel")]
    pub parallel_exclusions: bool,
}

fn default_vessel_length() -> f64 {
    DEFAULT_VESSEL_LENGTH_M
}

fn default_parallel() -> bool {
    true
}

impl GridConfig {
    /// Creates a new [`GridConfig`] for the corridor between `origin` and `destination`.
    pub fn new(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            origin,
            destination,
            vessel_length_m: DEFAULT_VESSEL_LENGTH_M,
            parallel_exclusions: default_parallel(),
        }
    }

    /// Sets the vessel length in meters.
    pub fn with_vessel_length_m(mut self, vessel_length_m: f64) -> Self {
        self.vessel_length_m = vessel_length_m;
        self
    }

    /// Enables or disables parallel exclusion marking.
    pub fn with_parallel_exclusions(mut self, parallel: bool) -> Self {
        self.parallel_exclusions = parallel;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.vessel_length_m.is_finite() {
            return Err(Error::InvalidConfig(
                "vessel_length_m must be finite".into(),
            ));
        }
        if self.vessel_length_m < 0.0 {
            return Err(Error::InvalidConfig(
                "vessel_length_m must be >= 0".into(),
            ));
        }
        Ok(())
    }
}

//! Parameters structure for forward collision avoidance

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

use super::FcaError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for forward collision avoidance.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Params {
    /// Name of the forward facing distance sensor.
    pub sensor_name: String,

    /// Distance at or below which the vehicle stops.
    ///
    /// Units: meters
    pub threshold_m: f64,

    /// Speed held while no obstacle is within the threshold.
    ///
    /// Units: kilometers/hour
    pub cruising_speed_kph: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            sensor_name: String::from("distance sensor"),
            threshold_m: 5.0,
            cruising_speed_kph: 20.0,
        }
    }
}

impl Params {
    /// Check the parameters are usable.
    pub fn validate(&self) -> Result<(), FcaError> {
        if !self.threshold_m.is_finite() || self.threshold_m < 0.0 {
            return Err(FcaError::InvalidParams(format!(
                "threshold_m must be finite and non-negative, found {}",
                self.threshold_m
            )))
        }
        if !self.cruising_speed_kph.is_finite() || self.cruising_speed_kph < 0.0 {
            return Err(FcaError::InvalidParams(format!(
                "cruising_speed_kph must be finite and non-negative, found {}",
                self.cruising_speed_kph
            )))
        }

        Ok(())
    }
}

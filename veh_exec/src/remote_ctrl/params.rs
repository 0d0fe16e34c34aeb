//! Parameters structure for remote control

use serde::Deserialize;
use std::f64::consts::{FRAC_PI_4, FRAC_PI_8};

use super::RemoteCtrlError;

/// Parameters for remote control.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Params {
    /// Speed demanded while driving forwards or backwards.
    ///
    /// Units: kilometers/hour
    pub speed_kph: f64,

    /// Steering demand when turning on the spot.
    ///
    /// Units: radians
    pub turn_angle_rad: f64,

    /// Steering demand when turning while driving.
    ///
    /// Units: radians
    pub drive_turn_angle_rad: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            speed_kph: 25.0,
            turn_angle_rad: FRAC_PI_4,
            drive_turn_angle_rad: FRAC_PI_8,
        }
    }
}

impl Params {
    /// Check the parameters are usable.
    pub fn validate(&self) -> Result<(), RemoteCtrlError> {
        if [self.speed_kph, self.turn_angle_rad, self.drive_turn_angle_rad]
            .iter()
            .any(|v| !v.is_finite())
        {
            return Err(RemoteCtrlError::InvalidParams(
                "all remote control parameters must be finite".into()
            ))
        }

        Ok(())
    }
}

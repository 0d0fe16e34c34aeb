//! # Equipment interfaces
//!
//! Sensors are read-only to the controller and refreshed by the host once per tick after they have
//! been enabled. Actuators are write-only, the host applies the last written demand on the next
//! tick.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

pub mod camera;
pub mod keyboard;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors raised by host equipment.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum EqptError {
    #[error("No device named \"{0}\" exists on this vehicle")]
    DeviceNotFound(String),

    #[error("The device \"{0}\" has not been enabled")]
    NotEnabled(String),

    #[error("The camera \"{0}\" does not support object recognition")]
    RecognitionNotSupported(String),
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A sensor owned by the host which the controller can read.
pub trait SensorReader {
    /// The value produced by the sensor each tick.
    type Reading;

    /// Enable the sensor, sampling it every `sampling_period_ms`.
    fn enable(&mut self, sampling_period_ms: u32) -> Result<(), EqptError>;

    /// Get the latest reading of the sensor.
    fn read(&self) -> Result<Self::Reading, EqptError>;
}

/// The drive-by-wire interface of a vehicle.
pub trait ActuatorWriter {
    /// Set the steering angle of the front wheels. Positive values steer right.
    ///
    /// Units: radians
    fn set_steering_angle(&mut self, angle_rad: f64);

    /// Set the cruising speed the drivetrain shall hold.
    ///
    /// Units: kilometers/hour
    fn set_cruising_speed(&mut self, speed_kph: f64);
}

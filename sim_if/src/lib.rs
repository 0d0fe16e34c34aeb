//! # Simulation interface crate.
//!
//! Provides the capabilities a simulation host offers to a vehicle controller. The host owns the
//! main loop, the sensors and the actuators, controllers only depend on the traits defined here.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Simulation time stepping
pub mod tick;

/// Sensor and actuator equipment interfaces
pub mod eqpt;

/// Partial updates of host owned data
pub mod frame;

// ------------------------------------------------------------------------------------------------
// REEXPORTS
// ------------------------------------------------------------------------------------------------

pub use eqpt::{
    ActuatorWriter, EqptError, SensorReader,
    camera::{Camera, RecognitionObject},
    keyboard::{Key, KeyboardReader},
};
pub use frame::SimFrame;
pub use tick::{StepResult, TickSource, END_SIMULATION};

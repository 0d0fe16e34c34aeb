//! Follower control module
//!
//! Follows a leading vehicle using the objects recognised by a camera mounted at the front of the
//! ego vehicle. Each tick the follower steers towards the tracked object and manages its speed to
//! keep a following distance.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod driver;
mod params;
mod state;
mod target;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use driver::*;
pub use params::*;
pub use state::*;
pub use target::*;

use sim_if::EqptError;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during Follower operation.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum FollowerError {
    #[error("The camera is not available: {0}")]
    SensorUnavailable(EqptError),

    #[error("The camera has not recognised any object to follow")]
    NoRecognizedObject,

    #[error(
        "The recognised object's position cannot be followed (lateral: {lateral_m} m, \
        longitudinal: {longitudinal_m} m)"
    )]
    InvalidGeometry {
        lateral_m: f64,
        longitudinal_m: f64
    },

    #[error("Invalid follower parameters: {0}")]
    InvalidParams(String),
}

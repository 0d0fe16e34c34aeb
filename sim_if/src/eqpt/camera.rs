//! # Camera equipment

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::SensorReader;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// An object detected by the camera's recognition feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RecognitionObject {
    /// Identifier of the object in the simulation.
    #[serde(default)]
    pub id: i32,

    /// Position of the object relative to the camera.
    ///
    /// Components are lateral (positive right), vertical and longitudinal (negative in front of
    /// the camera).
    ///
    /// Units: meters,
    /// Frame: Camera
    pub position: [f64; 3],

    /// Orientation of the object relative to the camera as an axis-angle.
    #[serde(default)]
    pub orientation: [f64; 4],

    /// Size of the object (width, height).
    ///
    /// Units: meters
    #[serde(default)]
    pub size: [f64; 2],

    /// Model name of the object.
    #[serde(default)]
    pub model: String,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A camera which reports the objects its recognition feature has detected.
///
/// Enabling the camera also enables recognition with the same sampling period.
pub trait Camera: SensorReader<Reading = Vec<RecognitionObject>> {
    /// True if the camera supports object recognition.
    fn has_recognition(&self) -> bool;
}

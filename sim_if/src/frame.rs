//! # Simulation frames
//!
//! A frame is a partial update of the data owned by the host. Fields which are absent from a
//! frame leave the current host data unchanged.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::eqpt::{camera::RecognitionObject, keyboard::Key};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// An update to the sensor data held by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimFrame {
    /// New readings of distance sensors, by sensor name.
    ///
    /// Units: meters
    #[serde(default)]
    pub distance: HashMap<String, f64>,

    /// New recognised objects, by camera name.
    #[serde(default)]
    pub recognition: HashMap<String, Vec<RecognitionObject>>,

    /// Keys now held down, or `None` to keep the current keys.
    #[serde(default)]
    pub keys: Option<Vec<Key>>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimFrame {
    /// Parse a frame from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_partial_frame() {
        let frame = SimFrame::from_json(r#"{"distance": {"distance sensor": 7.5}}"#).unwrap();

        assert_eq!(frame.distance.get("distance sensor"), Some(&7.5));
        assert!(frame.recognition.is_empty());
        assert_eq!(frame.keys, None);
    }

    #[test]
    fn test_recognition_frame() {
        let frame = SimFrame::from_json(
            r#"{"recognition": {"camera": [{"position": [0.5, 0.0, -8.0], "model": "leader"}]},
                "keys": ["Up", "Right"]}"#,
        )
        .unwrap();

        let objects = &frame.recognition["camera"];
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].position, [0.5, 0.0, -8.0]);
        assert_eq!(objects[0].model, "leader");
        assert_eq!(objects[0].id, 0);
        assert_eq!(frame.keys, Some(vec![Key::Up, Key::Right]));
    }
}

//! # Keyboard equipment

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::EqptError;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Keys used to drive a vehicle by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A keyboard attached to the simulation host.
pub trait KeyboardReader {
    /// Enable the keyboard, sampling it every `sampling_period_ms`.
    fn enable(&mut self, sampling_period_ms: u32) -> Result<(), EqptError>;

    /// Get the next key pressed during this tick, or `None` once all pressed keys have been read.
    fn get_key(&mut self) -> Option<Key>;
}

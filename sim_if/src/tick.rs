//! # Simulation time stepping

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Value returned by the host's step function when the simulation has terminated.
pub const END_SIMULATION: i32 = -1;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Result of advancing the simulation by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// The host advanced the simulation, sensors have been refreshed.
    Continue,

    /// The host has terminated the simulation, controllers shall exit their loop.
    EndOfSimulation,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A source of simulation ticks.
pub trait TickSource {
    /// The duration of one simulation tick.
    ///
    /// Units: milliseconds
    fn basic_time_step_ms(&self) -> u32;

    /// Advance the simulation by one tick, blocking until the host has done so.
    fn step(&mut self) -> StepResult;
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl From<i32> for StepResult {
    fn from(raw: i32) -> Self {
        match raw {
            END_SIMULATION => StepResult::EndOfSimulation,
            _ => StepResult::Continue,
        }
    }
}

impl StepResult {
    /// True if the simulation has ended.
    pub fn is_end(&self) -> bool {
        *self == StepResult::EndOfSimulation
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_step_result_from_raw() {
        assert_eq!(StepResult::from(END_SIMULATION), StepResult::EndOfSimulation);
        assert_eq!(StepResult::from(0), StepResult::Continue);
        assert_eq!(StepResult::from(32), StepResult::Continue);
        assert!(StepResult::from(-1).is_end());
    }
}

//! Implementations for the RemoteCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace};
use serde::Serialize;

// Internal
use sim_if::Key;
use super::{Params, RemoteCtrlError};
use util::module::State;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Remote control state.
#[derive(Debug, Default)]
pub struct RemoteCtrl {
    pub(crate) params: Params,

    /// The last mapped demand.
    pub(crate) output: OutputData,
}

/// Input data to remote control.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputData {
    /// Up to two keys pressed on this cycle, in the order they were read.
    pub keys: [Option<Key>; 2]
}

/// Output demand from remote control.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct OutputData {
    /// Cruising speed demand, negative to reverse.
    ///
    /// Units: kilometers/hour
    pub speed_kph: f64,

    /// Steering angle demand, positive right.
    ///
    /// Units: radians
    pub str_angle_rad: f64,
}

/// Status report for remote control processing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct StatusReport {
    /// False if the key combination has no mapping and the previous demand was
    /// kept.
    pub mapped: bool
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for RemoteCtrl {
    type InitData = Params;
    type InitError = RemoteCtrlError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = RemoteCtrlError;

    fn init(&mut self, init_data: Self::InitData) -> Result<(), Self::InitError> {
        init_data.validate()?;

        self.params = init_data;
        self.output = OutputData::default();

        Ok(())
    }

    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        let mapped = match self.map_keys(&input_data.keys) {
            Some(output) => {
                if output != self.output {
                    debug!("Remote control demand changed to {:?}", output);
                }
                self.output = output;
                true
            },
            None => {
                trace!("No mapping for keys {:?}", input_data.keys);
                false
            }
        };

        Ok((self.output, StatusReport { mapped }))
    }
}

impl RemoteCtrl {

    /// Map a pair of keys to a demand. The order of the keys doesn't matter.
    ///
    /// Returns `None` for contradictory combinations (up and down, left and
    /// right).
    fn map_keys(&self, keys: &[Option<Key>; 2]) -> Option<OutputData> {
        let pressed = |key: Key| keys.contains(&Some(key));

        let speed = self.params.speed_kph;
        let turn = self.params.turn_angle_rad;
        let drive_turn = self.params.drive_turn_angle_rad;

        let (speed_kph, str_angle_rad) = match (
            pressed(Key::Up),
            pressed(Key::Down),
            pressed(Key::Left),
            pressed(Key::Right)
        ) {
            (false, false, false, false) => (0.0, 0.0),
            (false, false, true, false) => (0.0, -turn),
            (false, false, false, true) => (0.0, turn),
            (true, false, false, false) => (speed, 0.0),
            (false, true, false, false) => (-speed, 0.0),
            (true, false, false, true) => (speed, drive_turn),
            (true, false, true, false) => (speed, -drive_turn),
            // Reversing mirrors the steering so the vehicle swings the way
            // the key points
            (false, true, false, true) => (-speed, -drive_turn),
            (false, true, true, false) => (-speed, drive_turn),
            _ => return None
        };

        Some(OutputData { speed_kph, str_angle_rad })
    }
}

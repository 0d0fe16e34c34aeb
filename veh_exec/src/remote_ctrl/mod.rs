//! Remote control module
//!
//! Drives the vehicle from the arrow keys of the host's keyboard. Used to
//! drive the leader vehicle by hand.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::info;

// Internal
pub use params::*;
pub use state::*;

use sim_if::{ActuatorWriter, EqptError, KeyboardReader, TickSource};
use util::module::State;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during remote control.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum RemoteCtrlError {
    #[error("The keyboard is not available: {0}")]
    KeyboardUnavailable(EqptError),

    #[error("Invalid remote control parameters: {0}")]
    InvalidParams(String),
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A vehicle driven from the keyboard.
pub struct RemoteControl<K> {
    keyboard: K,
    ctrl: RemoteCtrl,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<K: KeyboardReader> RemoteControl<K> {

    /// Create the remote control, enabling the keyboard with the given
    /// sampling period.
    pub fn new(mut keyboard: K, params: Params, sampling_period_ms: u32) -> Result<Self, RemoteCtrlError> {
        keyboard.enable(sampling_period_ms)
            .map_err(RemoteCtrlError::KeyboardUnavailable)?;

        let mut ctrl = RemoteCtrl::default();
        ctrl.init(params)?;

        Ok(Self { keyboard, ctrl })
    }

    /// Read the keys pressed on this cycle and write the mapped demands.
    pub fn drive<A: ActuatorWriter>(
        &mut self,
        actuators: &mut A
    ) -> Result<(OutputData, StatusReport), RemoteCtrlError> {
        let keys = [self.keyboard.get_key(), self.keyboard.get_key()];

        let (output, report) = self.ctrl.proc(&InputData { keys })?;

        actuators.set_cruising_speed(output.speed_kph);
        actuators.set_steering_angle(output.str_angle_rad);

        Ok((output, report))
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Run the remote control until the host ends the simulation.
pub fn run_remote_control<H, K, F>(
    host: &mut H,
    rc: &mut RemoteControl<K>,
    mut on_cycle: F
) -> Result<u64, RemoteCtrlError>
where
    H: TickSource + ActuatorWriter,
    K: KeyboardReader,
    F: FnMut(&OutputData, &StatusReport)
{
    let mut num_cycles = 0u64;

    while !host.step().is_end() {
        let (output, report) = rc.drive(host)?;
        on_cycle(&output, &report);
        num_cycles += 1;
    }

    info!("End of simulation after {} cycles", num_cycles);

    Ok(num_cycles)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::FRAC_PI_8;
    use sim_if::{Key, StepResult};

    /// Keyboard replaying the keys of each tick, the host pops a tick per step.
    struct MockKeyboard {
        enabled: bool,
        pressed: Vec<Key>,
    }

    impl KeyboardReader for MockKeyboard {
        fn enable(&mut self, _sampling_period_ms: u32) -> Result<(), EqptError> {
            self.enabled = true;
            Ok(())
        }

        fn get_key(&mut self) -> Option<Key> {
            match self.enabled && !self.pressed.is_empty() {
                true => Some(self.pressed.remove(0)),
                false => None
            }
        }
    }

    struct BrokenKeyboard;

    impl KeyboardReader for BrokenKeyboard {
        fn enable(&mut self, _sampling_period_ms: u32) -> Result<(), EqptError> {
            Err(EqptError::DeviceNotFound("keyboard".into()))
        }

        fn get_key(&mut self) -> Option<Key> {
            None
        }
    }

    #[derive(Default)]
    struct MockHost {
        ticks_left: u32,
        speed_kph: f64,
        str_angle_rad: f64,
    }

    impl TickSource for MockHost {
        fn basic_time_step_ms(&self) -> u32 {
            32
        }

        fn step(&mut self) -> StepResult {
            match self.ticks_left {
                0 => StepResult::EndOfSimulation,
                _ => {
                    self.ticks_left -= 1;
                    StepResult::Continue
                }
            }
        }
    }

    impl ActuatorWriter for MockHost {
        fn set_steering_angle(&mut self, angle_rad: f64) {
            self.str_angle_rad = angle_rad;
        }

        fn set_cruising_speed(&mut self, speed_kph: f64) {
            self.speed_kph = speed_kph;
        }
    }

    #[test]
    fn test_drive() {
        let kb = MockKeyboard { enabled: false, pressed: vec![Key::Right, Key::Up] };
        let mut rc = RemoteControl::new(kb, Params::default(), 32).unwrap();
        let mut host = MockHost::default();

        let (output, report) = rc.drive(&mut host).unwrap();

        assert!(report.mapped);
        assert_eq!(output.speed_kph, 25.0);
        assert_eq!(output.str_angle_rad, FRAC_PI_8);
        assert_eq!((host.speed_kph, host.str_angle_rad), (25.0, FRAC_PI_8));

        // Keys released
        let (output, _) = rc.drive(&mut host).unwrap();
        assert_eq!((output.speed_kph, output.str_angle_rad), (0.0, 0.0));
        assert_eq!(host.speed_kph, 0.0);
    }

    #[test]
    fn test_keyboard_unavailable() {
        assert_eq!(
            RemoteControl::new(BrokenKeyboard, Params::default(), 32).err(),
            Some(RemoteCtrlError::KeyboardUnavailable(
                EqptError::DeviceNotFound("keyboard".into())
            ))
        );
    }

    #[test]
    fn test_invalid_params() {
        let kb = MockKeyboard { enabled: false, pressed: vec![] };
        let params = Params { speed_kph: f64::NAN, ..Params::default() };

        assert!(matches!(
            RemoteControl::new(kb, params, 32),
            Err(RemoteCtrlError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_run_until_end() {
        let kb = MockKeyboard { enabled: false, pressed: vec![Key::Down] };
        let mut rc = RemoteControl::new(kb, Params::default(), 32).unwrap();
        let mut host = MockHost { ticks_left: 5, ..Default::default() };

        let mut outputs = vec![];
        let num_cycles = run_remote_control(&mut host, &mut rc, |o, _| outputs.push(*o)).unwrap();

        assert_eq!(num_cycles, 5);
        assert_eq!(outputs[0].speed_kph, -25.0);
        assert_eq!(outputs[4].speed_kph, 0.0);
    }
}

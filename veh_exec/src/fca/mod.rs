//! Forward collision avoidance module
//!
//! Drives straight at a cruising speed until the forward distance sensor
//! detects an obstacle within the threshold, then stops for good.

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

use sim_if::{ActuatorWriter, EqptError, SensorReader, TickSource};
use util::module::State;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during FCA operation.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum FcaError {
    #[error("The distance sensor is not available: {0}")]
    SensorUnavailable(EqptError),

    #[error("Invalid FCA parameters: {0}")]
    InvalidParams(String),
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A vehicle which stops in front of obstacles detected by its distance
/// sensor.
pub struct Fca<S> {
    sensor: S,
    ctrl: FcaCtrl,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<S: SensorReader<Reading = f64>> Fca<S> {

    /// Create a new FCA controller, enabling the distance sensor with the
    /// given sampling period.
    pub fn new(mut sensor: S, params: Params, sampling_period_ms: u32) -> Result<Self, FcaError> {
        sensor.enable(sampling_period_ms)
            .map_err(FcaError::SensorUnavailable)?;

        let mut ctrl = FcaCtrl::default();
        ctrl.init(params)?;

        info!(
            "FCA initialised with sensor \"{}\", stopping within {} m",
            ctrl.params.sensor_name,
            ctrl.params.threshold_m
        );

        Ok(Self { sensor, ctrl })
    }

    /// Check the distance to the obstacle ahead for one cycle and write the
    /// speed demand.
    pub fn avoid<A: ActuatorWriter>(
        &mut self,
        actuators: &mut A
    ) -> Result<(OutputData, StatusReport), FcaError> {
        let distance_m = self.sensor.read()
            .map_err(FcaError::SensorUnavailable)?;

        let (output, report) = self.ctrl.proc(&InputData { distance_m })?;

        actuators.set_cruising_speed(output.speed_kph);

        Ok((output, report))
    }

    /// Current state of the controller.
    pub fn state(&self) -> FcaState {
        self.ctrl.state
    }

    /// The cruising speed demanded while no obstacle is in range.
    pub fn cruising_speed_kph(&self) -> f64 {
        self.ctrl.params.cruising_speed_kph
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Run the FCA until it stops the vehicle or the host ends the simulation.
///
/// The cruising speed is demanded before the first step. `on_cycle` is called
/// with the results of each cycle. Returns the final state.
pub fn run_fca<H, S, F>(
    host: &mut H,
    fca: &mut Fca<S>,
    mut on_cycle: F
) -> Result<FcaState, FcaError>
where
    H: TickSource + ActuatorWriter,
    S: SensorReader<Reading = f64>,
    F: FnMut(&OutputData, &StatusReport)
{
    host.set_cruising_speed(fca.cruising_speed_kph());

    while !host.step().is_end() {
        let (output, report) = fca.avoid(host)?;
        on_cycle(&output, &report);

        if report.state == FcaState::Stopped {
            break
        }
    }

    info!("FCA finished in state {:?}", fca.state());

    Ok(fca.state())
}

#[cfg(test)]
mod test {
    use super::*;
    use sim_if::StepResult;
    use std::{cell::Cell, collections::VecDeque, rc::Rc};

    /// Sensor sharing its reading with the mock host.
    struct MockSensor {
        enabled: bool,
        value: Rc<Cell<f64>>,
    }

    impl SensorReader for MockSensor {
        type Reading = f64;

        fn enable(&mut self, _sampling_period_ms: u32) -> Result<(), EqptError> {
            self.enabled = true;
            Ok(())
        }

        fn read(&self) -> Result<f64, EqptError> {
            match self.enabled {
                true => Ok(self.value.get()),
                false => Err(EqptError::NotEnabled("distance sensor".into()))
            }
        }
    }

    struct BrokenSensor;

    impl SensorReader for BrokenSensor {
        type Reading = f64;

        fn enable(&mut self, _sampling_period_ms: u32) -> Result<(), EqptError> {
            Err(EqptError::DeviceNotFound("distance sensor".into()))
        }

        fn read(&self) -> Result<f64, EqptError> {
            Err(EqptError::NotEnabled("distance sensor".into()))
        }
    }

    /// Host which samples the next distance of a sequence on each step, ending
    /// the simulation once the sequence is exhausted.
    struct MockHost {
        distances: VecDeque<f64>,
        value: Rc<Cell<f64>>,
        speed_cmds: Vec<f64>,
    }

    impl TickSource for MockHost {
        fn basic_time_step_ms(&self) -> u32 {
            10
        }

        fn step(&mut self) -> StepResult {
            match self.distances.pop_front() {
                Some(d) => {
                    self.value.set(d);
                    StepResult::Continue
                },
                None => StepResult::EndOfSimulation
            }
        }
    }

    impl ActuatorWriter for MockHost {
        fn set_steering_angle(&mut self, _angle_rad: f64) {}

        fn set_cruising_speed(&mut self, speed_kph: f64) {
            self.speed_cmds.push(speed_kph);
        }
    }

    fn setup(distances: Vec<f64>) -> (MockHost, Fca<MockSensor>) {
        let value = Rc::new(Cell::new(f64::INFINITY));
        let host = MockHost {
            distances: distances.into(),
            value: value.clone(),
            speed_cmds: vec![]
        };
        let sensor = MockSensor { enabled: false, value };
        let fca = Fca::new(sensor, Params::default(), host.basic_time_step_ms()).unwrap();

        (host, fca)
    }

    #[test]
    fn test_sensor_unavailable() {
        assert!(matches!(
            Fca::new(BrokenSensor, Params::default(), 10),
            Err(FcaError::SensorUnavailable(EqptError::DeviceNotFound(_)))
        ));
    }

    #[test]
    fn test_threshold_boundary() {
        let (mut host, mut fca) = setup(vec![5.01]);
        host.step();
        let (o, r) = fca.avoid(&mut host).unwrap();
        assert_eq!(o.speed_kph, 20.0);
        assert_eq!(r.state, FcaState::Cruising);

        let (mut host, mut fca) = setup(vec![5.0]);
        host.step();
        let (o, r) = fca.avoid(&mut host).unwrap();
        assert_eq!(o.speed_kph, 0.0);
        assert_eq!(r.state, FcaState::Stopped);
        assert!(r.obstacle_detected);
    }

    #[test]
    fn test_run_until_obstacle() {
        let (mut host, mut fca) = setup(vec![30.0, 20.0, 10.0, 5.5, 4.9, 3.0, 1.0]);
        let mut num_cycles = 0;

        let state = run_fca(&mut host, &mut fca, |_, _| num_cycles += 1).unwrap();

        assert_eq!(state, FcaState::Stopped);
        assert_eq!(num_cycles, 5);

        // Initial demand, four cruising cycles, then the stop
        assert_eq!(host.speed_cmds, vec![20.0, 20.0, 20.0, 20.0, 20.0, 0.0]);

        // The loop terminated, the remaining samples were never taken
        assert_eq!(host.distances.len(), 2);
    }

    #[test]
    fn test_run_ends_with_simulation() {
        let (mut host, mut fca) = setup(vec![30.0, 20.0, 12.0]);

        let state = run_fca(&mut host, &mut fca, |o, _| assert_eq!(o.speed_kph, 20.0)).unwrap();

        assert_eq!(state, FcaState::Cruising);
        assert_eq!(host.speed_cmds, vec![20.0; 4]);
    }
}

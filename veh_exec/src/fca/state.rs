//! Implementations for the FcaCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, trace};
use serde::Serialize;

// Internal
use super::{FcaError, Params};
use util::module::State;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Forward collision avoidance state.
#[derive(Debug, Default)]
pub struct FcaCtrl {
    pub(crate) params: Params,

    pub(crate) state: FcaState,
}

/// Input data to FCA.
#[derive(Debug, Clone, Copy)]
pub struct InputData {
    /// Distance measured by the forward sensor.
    ///
    /// Units: meters
    pub distance_m: f64
}

/// Output demand from FCA.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutputData {
    /// Cruising speed demand.
    ///
    /// Units: kilometers/hour
    pub speed_kph: f64
}

/// Status report for FCA processing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusReport {
    /// State after processing.
    pub state: FcaState,

    /// True if an obstacle was within the threshold on this cycle.
    pub obstacle_detected: bool,

    /// The distance processed on this cycle.
    ///
    /// Units: meters
    pub distance_m: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// States of the FCA. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FcaState {
    Cruising,
    Stopped
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for FcaState {
    fn default() -> Self {
        FcaState::Cruising
    }
}

impl State for FcaCtrl {
    type InitData = Params;
    type InitError = FcaError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = FcaError;

    fn init(&mut self, init_data: Self::InitData) -> Result<(), Self::InitError> {
        init_data.validate()?;

        self.params = init_data;
        self.state = FcaState::Cruising;

        Ok(())
    }

    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        let obstacle_detected = input_data.distance_m <= self.params.threshold_m;

        if self.state == FcaState::Cruising && obstacle_detected {
            info!(
                "Obstacle detected at {:.2} m (threshold {:.2} m), stopping",
                input_data.distance_m,
                self.params.threshold_m
            );
            self.state = FcaState::Stopped;
        }

        let output = OutputData {
            speed_kph: match self.state {
                FcaState::Cruising => self.params.cruising_speed_kph,
                FcaState::Stopped => 0.0
            }
        };

        trace!("FCA distance: {:.3} m, speed: {:.1} kph", input_data.distance_m, output.speed_kph);

        Ok((output, StatusReport {
            state: self.state,
            obstacle_detected,
            distance_m: input_data.distance_m
        }))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ctrl() -> FcaCtrl {
        let mut ctrl = FcaCtrl::default();
        ctrl.init(Params::default()).unwrap();
        ctrl
    }

    #[test]
    fn test_cruise_above_threshold() {
        let mut ctrl = ctrl();

        for d in [5.01, 6.0, 100.0, f64::INFINITY].iter() {
            let (o, r) = ctrl.proc(&InputData { distance_m: *d }).unwrap();
            assert_eq!(o.speed_kph, 20.0);
            assert_eq!(r.state, FcaState::Cruising);
            assert!(!r.obstacle_detected);
        }
    }

    #[test]
    fn test_stop_at_or_below_threshold() {
        for d in [5.0, 4.99, 0.0, -1.0].iter() {
            let mut ctrl = ctrl();
            let (o, r) = ctrl.proc(&InputData { distance_m: *d }).unwrap();
            assert_eq!(o.speed_kph, 0.0);
            assert_eq!(r.state, FcaState::Stopped);
        }
    }

    #[test]
    fn test_stopped_is_terminal() {
        let mut ctrl = ctrl();
        ctrl.proc(&InputData { distance_m: 3.0 }).unwrap();

        // Obstacle gone, still stopped
        let (o, r) = ctrl.proc(&InputData { distance_m: 50.0 }).unwrap();
        assert_eq!(o.speed_kph, 0.0);
        assert_eq!(r.state, FcaState::Stopped);
        assert!(!r.obstacle_detected);
    }

    #[test]
    fn test_custom_threshold() {
        let mut ctrl = FcaCtrl::default();
        ctrl.init(Params {
            threshold_m: 10.0,
            cruising_speed_kph: 30.0,
            ..Default::default()
        }).unwrap();

        let (o, _) = ctrl.proc(&InputData { distance_m: 10.5 }).unwrap();
        assert_eq!(o.speed_kph, 30.0);
        let (o, _) = ctrl.proc(&InputData { distance_m: 10.0 }).unwrap();
        assert_eq!(o.speed_kph, 0.0);
    }

    #[test]
    fn test_invalid_params() {
        let mut ctrl = FcaCtrl::default();

        assert!(ctrl.init(Params { threshold_m: -1.0, ..Default::default() }).is_err());
        assert!(ctrl.init(Params { cruising_speed_kph: f64::NAN, ..Default::default() }).is_err());
    }
}

//! Implementations for the FollowCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, trace};
use serde::Serialize;

// Internal
use super::{FollowerError, Params, Target};
use util::{maths, module::State};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Follower control law state.
#[derive(Debug, Default)]
pub struct FollowCtrl {

    pub(crate) params: Params,

    pub(crate) report: StatusReport,

    /// The commanded speed.
    ///
    /// Units: kilometers/hour
    pub(crate) speed_kph: f64,

    /// Number of consecutive cycles spent far from the leader since the last
    /// acceleration.
    pub(crate) cycle_count: u32,

    /// The last commanded steering angle.
    ///
    /// Units: radians
    pub(crate) str_angle_rad: f64,

    /// Number of consecutive cycles without a target.
    pub(crate) lost_cycles: u32,

    /// The band on the last cycle.
    pub(crate) band: SpeedBand,
}

/// Input data to the follower control law.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputData {
    /// The object to follow, or `None` if no valid target was found on this
    /// cycle.
    pub target: Option<Target>
}

/// Output commands from the follower control law.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct OutputData {
    /// Steering angle demand, positive right.
    ///
    /// Units: radians
    pub str_angle_rad: f64,

    /// Cruising speed demand.
    ///
    /// Units: kilometers/hour
    pub speed_kph: f64
}

/// The distance band the follower is in relative to the leader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpeedBand {
    /// Closer than the minimum distance, the follower brakes.
    TooClose,

    /// Within the buffer beyond the minimum distance, the follower matches
    /// the leader's speed.
    Hold,

    /// Further than the buffer, or exactly at the minimum distance, the
    /// follower slowly accelerates.
    Far,

    /// No valid target on this cycle.
    NoTarget,
}

/// Status report for follower processing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct StatusReport {
    /// The band the follower was in on this cycle.
    pub band: SpeedBand,

    /// True if the speed was increased on this cycle.
    pub accelerated: bool,

    /// Cycle counter after processing.
    pub cycle_count: u32,

    /// True if no valid target was found on this cycle.
    pub target_lost: bool,

    /// True if the follower was stopped because the target has been lost for
    /// too long.
    pub lost_stop: bool,

    /// True if the steering demand was limited.
    pub str_limited: bool,

    /// True if the speed demand was limited.
    pub speed_limited: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for SpeedBand {
    fn default() -> Self {
        SpeedBand::NoTarget
    }
}

impl State for FollowCtrl {
    type InitData = Params;
    type InitError = FollowerError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = FollowerError;

    /// Initialise the FollowCtrl module.
    ///
    /// The speed starts at the minimum speed with the wheels straight.
    fn init(&mut self, init_data: Self::InitData) -> Result<(), Self::InitError> {
        init_data.validate()?;

        self.speed_kph = init_data.follower_min_speed_kph;
        self.params = init_data;
        self.cycle_count = 0;
        self.str_angle_rad = 0.0;
        self.lost_cycles = 0;
        self.band = SpeedBand::NoTarget;
        self.report = StatusReport::default();

        Ok(())
    }

    /// Perform cyclic processing of the follower control law.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        // Clear the status report
        self.report = StatusReport::default();

        match input_data.target {
            Some(target) => {
                self.lost_cycles = 0;
                self.control_steering(&target);
                self.control_speed(target.distance_m);
            },
            None => self.hold_or_stop()
        }

        // Limit the speed to the vehicle's capabilities
        let (speed_kph, speed_limited) = maths::limit(
            self.speed_kph,
            self.params.follower_min_speed_kph,
            self.params.follower_max_speed_kph
        );
        self.speed_kph = speed_kph;
        self.report.speed_limited = speed_limited;
        self.report.cycle_count = self.cycle_count;

        let output = OutputData {
            str_angle_rad: self.str_angle_rad,
            speed_kph: self.speed_kph
        };

        trace!(
            "FollowCtrl output: str: {:.4} rad, speed: {:.1} kph, band: {:?}",
            output.str_angle_rad,
            output.speed_kph,
            self.report.band
        );

        Ok((output, self.report))
    }
}

impl FollowCtrl {

    /// The commanded speed.
    ///
    /// Units: kilometers/hour
    pub fn speed_kph(&self) -> f64 {
        self.speed_kph
    }

    /// The current cycle counter.
    pub fn cycle_count(&self) -> u32 {
        self.cycle_count
    }

    /// True if the follower had a valid target on the last cycle.
    pub fn is_tracking(&self) -> bool {
        self.lost_cycles == 0
    }

    /// Steer towards the target.
    fn control_steering(&mut self, target: &Target) {
        let (angle, limited) = maths::limit(
            target.steering_angle(),
            -self.params.max_steer_abs_rad,
            self.params.max_steer_abs_rad
        );

        self.str_angle_rad = angle;
        self.report.str_limited = limited;
    }

    /// Set the speed from the distance to the leader.
    ///
    /// - Too close: brake to the minimum speed.
    /// - Within the buffer: match the leader's speed to keep the distance.
    /// - Far: once more than `max_cycle_limit` consecutive cycles have been
    ///   spent far away, accelerate by one step and restart the count.
    fn control_speed(&mut self, distance_m: f64) {
        let min_distance_m = self.params.min_distance_m();

        let band = if distance_m < min_distance_m {
            SpeedBand::TooClose
        }
        else if distance_m > min_distance_m
            && distance_m <= min_distance_m + self.params.distance_buffer_m
        {
            SpeedBand::Hold
        }
        else {
            SpeedBand::Far
        };

        if band != self.band {
            debug!("Follower entered {:?} band at {:.2} m", band, distance_m);
        }

        match band {
            SpeedBand::TooClose => {
                self.speed_kph = self.params.follower_min_speed_kph;
                self.cycle_count = 0;
            },
            SpeedBand::Hold => {
                self.speed_kph = self.params.leader_max_speed_kph;
                self.cycle_count = 0;
            },
            SpeedBand::Far => {
                self.cycle_count = self.cycle_count.saturating_add(1);

                if self.cycle_count > self.params.max_cycle_limit
                    && self.speed_kph + self.params.speed_step_kph
                        <= self.params.follower_max_speed_kph
                {
                    self.speed_kph += self.params.speed_step_kph;
                    self.cycle_count = 0;
                    self.report.accelerated = true;

                    info!("Follower accelerating to {:.1} kph", self.speed_kph);
                }
            },
            SpeedBand::NoTarget => ()
        }

        self.report.band = band;
        self.band = band;
    }

    /// Hold the last commands while the target is briefly lost, stop once it
    /// has been lost for longer than `lost_target_limit_cycles`.
    fn hold_or_stop(&mut self) {
        self.lost_cycles = self.lost_cycles.saturating_add(1);
        self.cycle_count = 0;
        self.band = SpeedBand::NoTarget;
        self.report.band = SpeedBand::NoTarget;
        self.report.target_lost = true;

        if self.lost_cycles > self.params.lost_target_limit_cycles {
            if self.speed_kph != self.params.follower_min_speed_kph {
                info!(
                    "Target lost for {} cycles, stopping",
                    self.lost_cycles
                );
            }

            self.speed_kph = self.params.follower_min_speed_kph;
            self.report.lost_stop = true;
        }
    }
}

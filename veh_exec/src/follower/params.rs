//! Parameters structure for the Follower

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

use super::FollowerError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the Follower.
///
/// Any parameter missing from the parameter file takes its default value.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Params {

    // ---- DEVICES ----

    /// Name of the camera mounted at the front of the vehicle.
    pub camera_name: String,

    /// Model name of the object to follow. If `None` the first recognised
    /// object is followed.
    pub target_model: Option<String>,

    // ---- GEOMETRY ----

    /// Length of the ego vehicle.
    ///
    /// Units: meters
    pub car_length_m: f64,

    /// Distance beyond the minimum distance within which the leader's speed
    /// is matched.
    ///
    /// Units: meters
    pub distance_buffer_m: f64,

    /// Longitudinal offset between the camera and the front of the vehicle.
    ///
    /// Units: meters
    pub camera_mounting_offset_m: f64,

    // ---- SPEED CONTROL ----

    /// Maximum speed of the leader vehicle.
    ///
    /// Units: kilometers/hour
    pub leader_max_speed_kph: f64,

    /// Maximum speed of the follower.
    ///
    /// Units: kilometers/hour
    pub follower_max_speed_kph: f64,

    /// Minimum speed of the follower.
    ///
    /// Units: kilometers/hour
    pub follower_min_speed_kph: f64,

    /// Speed added each time the follower accelerates to catch up.
    ///
    /// Units: kilometers/hour
    pub speed_step_kph: f64,

    /// Number of consecutive cycles far from the leader which must be
    /// exceeded before accelerating.
    pub max_cycle_limit: u32,

    // ---- STEERING ----

    /// Maximum absolute steering angle demand.
    ///
    /// Units: radians
    pub max_steer_abs_rad: f64,

    // ---- TARGET LOSS ----

    /// Number of cycles the last commands are held for after the target is
    /// lost, before the follower stops.
    pub lost_target_limit_cycles: u32,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        let leader_max_speed_kph = 15.0;

        Self {
            camera_name: String::from("camera"),
            target_model: None,
            // Tesla Model 3
            car_length_m: 4.7,
            distance_buffer_m: 0.5,
            camera_mounting_offset_m: 2.5,
            leader_max_speed_kph,
            follower_max_speed_kph: leader_max_speed_kph + 5.0,
            follower_min_speed_kph: 0.0,
            speed_step_kph: 1.0,
            max_cycle_limit: 10,
            max_steer_abs_rad: std::f64::consts::FRAC_PI_2,
            lost_target_limit_cycles: 3,
        }
    }
}

impl Params {
    /// Closest distance to the leader before the follower stops.
    ///
    /// Units: meters
    pub fn min_distance_m(&self) -> f64 {
        self.car_length_m / 2.0
    }

    /// Check the parameters describe a usable speed law.
    pub fn validate(&self) -> Result<(), FollowerError> {
        let values = [
            ("car_length_m", self.car_length_m),
            ("distance_buffer_m", self.distance_buffer_m),
            ("camera_mounting_offset_m", self.camera_mounting_offset_m),
            ("leader_max_speed_kph", self.leader_max_speed_kph),
            ("follower_max_speed_kph", self.follower_max_speed_kph),
            ("follower_min_speed_kph", self.follower_min_speed_kph),
            ("speed_step_kph", self.speed_step_kph),
            ("max_steer_abs_rad", self.max_steer_abs_rad),
        ];

        if let Some((name, _)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(FollowerError::InvalidParams(format!("{} is not finite", name)))
        }

        if self.car_length_m <= 0.0 {
            return Err(FollowerError::InvalidParams(
                "car_length_m must be positive".into()
            ))
        }
        if self.distance_buffer_m < 0.0 {
            return Err(FollowerError::InvalidParams(
                "distance_buffer_m must not be negative".into()
            ))
        }
        if self.speed_step_kph <= 0.0 {
            return Err(FollowerError::InvalidParams(
                "speed_step_kph must be positive".into()
            ))
        }
        if self.max_steer_abs_rad <= 0.0 {
            return Err(FollowerError::InvalidParams(
                "max_steer_abs_rad must be positive".into()
            ))
        }
        if !(self.follower_min_speed_kph <= self.leader_max_speed_kph
            && self.leader_max_speed_kph <= self.follower_max_speed_kph)
        {
            return Err(FollowerError::InvalidParams(format!(
                "expected follower_min_speed_kph ({}) <= leader_max_speed_kph ({}) <= \
                follower_max_speed_kph ({})",
                self.follower_min_speed_kph,
                self.leader_max_speed_kph,
                self.follower_max_speed_kph
            )))
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = Params::default();

        assert_eq!(p.min_distance_m(), 2.35);
        assert_eq!(p.follower_max_speed_kph, 20.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_partial_params_file() {
        let p: Params = util::params::from_str(
            "leader_max_speed_kph = 10.0\ntarget_model = \"leader\""
        ).unwrap();

        assert_eq!(p.leader_max_speed_kph, 10.0);
        assert_eq!(p.target_model.as_deref(), Some("leader"));
        assert_eq!(p.car_length_m, 4.7);
    }

    #[test]
    fn test_invalid_params() {
        let p = Params {
            leader_max_speed_kph: 25.0,
            ..Default::default()
        };
        assert!(matches!(p.validate(), Err(FollowerError::InvalidParams(_))));

        let p = Params {
            car_length_m: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(p.validate(), Err(FollowerError::InvalidParams(_))));

        let p = Params {
            speed_step_kph: 0.0,
            ..Default::default()
        };
        assert!(matches!(p.validate(), Err(FollowerError::InvalidParams(_))));
    }
}

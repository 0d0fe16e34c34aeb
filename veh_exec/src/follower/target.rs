//! Target extraction from the camera's recognised objects

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector3;
use serde::Serialize;

// Internal
use sim_if::RecognitionObject;
use super::FollowerError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The tracked object expressed in the follower's frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Target {
    /// Lateral offset of the object, positive to the right.
    ///
    /// Units: meters
    pub lateral_m: f64,

    /// Distance of the object ahead of the camera.
    ///
    /// Units: meters
    pub longitudinal_m: f64,

    /// Distance between the object and the front of the ego vehicle, the
    /// camera's mounting offset removed.
    ///
    /// Units: meters
    pub distance_m: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Target {
    /// Build the target from a recognised object.
    ///
    /// The camera reports the position of the object with the longitudinal
    /// axis pointing backwards, so the sign is flipped to get a distance.
    ///
    /// An object which isn't in front of the camera, or has a non-finite
    /// position, gives an `InvalidGeometry` error.
    pub fn from_object(
        object: &RecognitionObject,
        camera_mounting_offset_m: f64
    ) -> Result<Self, FollowerError> {
        let pos = Vector3::from(object.position);

        let lateral_m = pos.x;
        let longitudinal_m = -pos.z;

        if !(lateral_m.is_finite() && longitudinal_m.is_finite()) || longitudinal_m <= 0.0 {
            return Err(FollowerError::InvalidGeometry {
                lateral_m,
                longitudinal_m
            })
        }

        Ok(Self {
            lateral_m,
            longitudinal_m,
            distance_m: longitudinal_m - camera_mounting_offset_m
        })
    }

    /// The steering demand which points the vehicle at the target, measured
    /// from the front of the vehicle.
    pub fn steering_angle(&self) -> f64 {
        steering_angle(self.lateral_m, self.distance_m)
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the steering angle which centres the vehicle on an object.
///
/// Positive angles steer right, negative angles steer left. For an object
/// straight ahead the angle is zero. An object level with or behind the front
/// of the vehicle (`distance_m <= 0`) gives an angle of at least pi/2 in
/// magnitude, which the control law limits.
///
/// Units: radians
pub fn steering_angle(lateral_m: f64, distance_m: f64) -> f64 {
    // Bearing from the forward axis, equivalent to pi/2 - atan(z/x) for an
    // object to the right but defined for x <= 0.
    lateral_m.atan2(distance_m)
}

/// Select the object to follow.
///
/// If a model name is given the first object of that model is selected,
/// otherwise the first object.
pub fn select_object<'a>(
    objects: &'a [RecognitionObject],
    target_model: Option<&str>
) -> Result<&'a RecognitionObject, FollowerError> {
    let selected = match target_model {
        Some(model) => objects.iter().find(|o| o.model == model),
        None => objects.first()
    };

    selected.ok_or(FollowerError::NoRecognizedObject)
}

#[cfg(test)]
mod test {
    use super::*;

    fn object(position: [f64; 3], model: &str) -> RecognitionObject {
        RecognitionObject {
            position,
            model: model.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_steering_angle() {
        // Right of centre steers right
        let right = steering_angle(1.0, 5.0);
        assert!((right - 0.19739555984988078).abs() < 1e-12);
        assert!((right - (-((5f64 / 1f64).atan() - std::f64::consts::FRAC_PI_2))).abs() < 1e-12);

        // Left mirrors right
        assert_eq!(steering_angle(-1.0, 5.0), -right);

        // Straight ahead
        assert_eq!(steering_angle(0.0, 5.0), 0.0);
    }

    #[test]
    fn test_from_object() {
        let t = Target::from_object(&object([1.0, 0.3, -7.5], ""), 2.5).unwrap();

        assert_eq!(t.lateral_m, 1.0);
        assert_eq!(t.longitudinal_m, 7.5);
        assert_eq!(t.distance_m, 5.0);

        // Steering is measured from the front of the vehicle, not the camera
        assert!((t.steering_angle() - 0.19739555984988078).abs() < 1e-12);
    }

    #[test]
    fn test_steering_alongside() {
        // Between the camera and the front of the vehicle
        let t = Target::from_object(&object([1.0, 0.0, -2.0], ""), 2.5).unwrap();
        assert_eq!(t.distance_m, -0.5);

        let original = -(((-0.5f64) / 1.0).atan() - std::f64::consts::FRAC_PI_2);
        assert!(t.steering_angle() > std::f64::consts::FRAC_PI_2);
        assert!((t.steering_angle() - original).abs() < 1e-12);

        // Level with the front of the vehicle
        assert_eq!(steering_angle(1.0, 0.0), std::f64::consts::FRAC_PI_2);
        assert_eq!(steering_angle(-1.0, 0.0), -std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn test_invalid_geometry() {
        // Behind the camera
        assert!(matches!(
            Target::from_object(&object([1.0, 0.0, 2.0], ""), 2.5),
            Err(FollowerError::InvalidGeometry { .. })
        ));

        // On the camera plane
        assert!(matches!(
            Target::from_object(&object([0.0, 0.0, 0.0], ""), 2.5),
            Err(FollowerError::InvalidGeometry { .. })
        ));

        // Non-finite
        assert!(matches!(
            Target::from_object(&object([f64::NAN, 0.0, -5.0], ""), 2.5),
            Err(FollowerError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn test_select_object() {
        let objects = vec![
            object([3.0, 0.0, -20.0], "tree"),
            object([0.5, 0.0, -8.0], "leader"),
        ];

        assert_eq!(select_object(&objects, None).unwrap().model, "tree");
        assert_eq!(select_object(&objects, Some("leader")).unwrap().model, "leader");
        assert_eq!(
            select_object(&objects, Some("truck")),
            Err(FollowerError::NoRecognizedObject)
        );
        assert_eq!(select_object(&[], None), Err(FollowerError::NoRecognizedObject));
    }
}

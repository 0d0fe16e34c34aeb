//! Follower driver, connects the follower control law to the host's equipment

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, trace, warn};

// Internal
use sim_if::{ActuatorWriter, Camera, EqptError, RecognitionObject, TickSource};
use util::module::State;
use super::{
    FollowCtrl, FollowerError, InputData, OutputData, Params, StatusReport, Target,
    select_object
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A vehicle which follows the object recognised by its front camera.
///
/// The follower owns its camera for its whole lifetime. Actuators are passed
/// in on each cycle as they belong to the host.
pub struct Follower<C> {
    camera: C,
    ctrl: FollowCtrl,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<C: Camera> Follower<C> {

    /// Create a new follower, enabling the camera and its recognition with the
    /// given sampling period (usually the host's basic time step).
    pub fn new(
        mut camera: C,
        params: Params,
        sampling_period_ms: u32
    ) -> Result<Self, FollowerError> {
        if !camera.has_recognition() {
            return Err(FollowerError::SensorUnavailable(
                EqptError::RecognitionNotSupported(params.camera_name.clone())
            ))
        }

        camera.enable(sampling_period_ms)
            .map_err(FollowerError::SensorUnavailable)?;

        let mut ctrl = FollowCtrl::default();
        ctrl.init(params)?;

        info!(
            "Follower initialised with camera \"{}\" sampling every {} ms",
            ctrl.params.camera_name,
            sampling_period_ms
        );

        Ok(Self { camera, ctrl })
    }

    /// Follow the recognised object for one cycle.
    ///
    /// Should be called once per tick, after the host has stepped. The steering
    /// and speed demands are written to `actuators` every cycle.
    pub fn follow<A: ActuatorWriter>(
        &mut self,
        actuators: &mut A
    ) -> Result<(OutputData, StatusReport), FollowerError> {
        let objects = self.camera.read()
            .map_err(FollowerError::SensorUnavailable)?;

        let target = match self.locate_target(&objects) {
            Ok(t) => Some(t),
            Err(e @ FollowerError::NoRecognizedObject)
            | Err(e @ FollowerError::InvalidGeometry { .. }) => {
                // Only warn on the first cycle of a loss
                if self.ctrl.is_tracking() {
                    warn!("Follower target lost: {}", e);
                }
                else {
                    trace!("Follower target still lost: {}", e);
                }
                None
            },
            Err(e) => return Err(e)
        };

        let (output, report) = self.ctrl.proc(&InputData { target })?;

        actuators.set_steering_angle(output.str_angle_rad);
        actuators.set_cruising_speed(output.speed_kph);

        Ok((output, report))
    }

    /// Get the control law state.
    pub fn ctrl(&self) -> &FollowCtrl {
        &self.ctrl
    }

    /// Pick the object to follow and convert it into a target.
    fn locate_target(&self, objects: &[RecognitionObject]) -> Result<Target, FollowerError> {
        let object = select_object(objects, self.ctrl.params.target_model.as_deref())?;

        Target::from_object(object, self.ctrl.params.camera_mounting_offset_m)
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Run the follower until the host ends the simulation.
///
/// `on_cycle` is called with the results of each cycle. Returns the number of
/// cycles executed.
pub fn run_follower<H, C, F>(
    host: &mut H,
    follower: &mut Follower<C>,
    mut on_cycle: F
) -> Result<u64, FollowerError>
where
    H: TickSource + ActuatorWriter,
    C: Camera,
    F: FnMut(&OutputData, &StatusReport)
{
    let mut num_cycles = 0u64;

    while !host.step().is_end() {
        let (output, report) = follower.follow(host)?;
        on_cycle(&output, &report);
        num_cycles += 1;
    }

    info!("End of simulation after {} cycles", num_cycles);

    Ok(num_cycles)
}

//! # Scripted simulation host
//!
//! The ScriptedSim stands in for the simulator when running the controllers
//! from a scenario script. It owns the sensor data and the time, and records
//! the demands written to the actuators. Each call to `step`:
//!
//! - advances the simulation time by one basic time step,
//! - applies every scenario frame due at the new time, readings which aren't
//!   in a frame keep their previous value,
//! - returns `EndOfSimulation` once the script has been played out.
//!
//! Device handles share the host's data, so a controller can own its sensor
//! while the host keeps refreshing it.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::{cell::RefCell, collections::{HashMap, HashSet}, rc::Rc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

// Internal
use sim_if::{
    ActuatorWriter, Camera, EqptError, Key, KeyboardReader, RecognitionObject, SensorReader,
    SimFrame, StepResult, TickSource
};
use util::{
    archive::{ArchiveError, Archiver},
    script_interpreter::{PendingFrames, ScriptInterpreter},
    time::step_ms_to_seconds
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Name used for the keyboard device.
const KEYBOARD_NAME: &str = "keyboard";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters of the scripted host, describing the simulated vehicle's devices.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Params {
    /// Duration of one tick.
    ///
    /// Units: milliseconds
    pub basic_time_step_ms: u32,

    /// Names of the distance sensors on the vehicle.
    pub distance_sensors: Vec<String>,

    /// Cameras on the vehicle.
    pub cameras: Vec<CameraParams>,

    /// True if a keyboard is attached.
    pub keyboard: bool,
}

/// Description of a simulated camera.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CameraParams {
    pub name: String,

    #[serde(default = "default_true")]
    pub has_recognition: bool,
}

/// The demands applied to the vehicle on one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ActuatorCmd {
    /// Simulation time of the tick.
    ///
    /// Units: seconds
    pub time_s: f64,

    /// Units: radians
    pub str_angle_rad: f64,

    /// Units: kilometers/hour
    pub speed_kph: f64,
}

/// A simulation host replaying a scenario script.
pub struct ScriptedSim {
    params: Params,
    script: ScriptInterpreter,
    data: Rc<RefCell<HostData>>,
    num_ticks: u64,
    history: Vec<ActuatorCmd>,
}

/// Handle on a scripted distance sensor.
pub struct ScriptedDistanceSensor {
    name: String,
    data: Rc<RefCell<HostData>>,
}

/// Handle on a scripted camera.
pub struct ScriptedCamera {
    name: String,
    has_recognition: bool,
    data: Rc<RefCell<HostData>>,
}

/// Handle on the scripted keyboard.
pub struct ScriptedKeyboard {
    data: Rc<RefCell<HostData>>,
}

/// Data owned by the host and shared with the device handles.
#[derive(Debug, Default)]
struct HostData {
    distance: HashMap<String, f64>,
    recognition: HashMap<String, Vec<RecognitionObject>>,
    keys: Vec<Key>,
    key_cursor: usize,
    enabled: HashSet<String>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            basic_time_step_ms: 32,
            distance_sensors: vec![String::from("distance sensor")],
            cameras: vec![CameraParams {
                name: String::from("camera"),
                has_recognition: true
            }],
            keyboard: true,
        }
    }
}

impl ScriptedSim {
    /// Create a new host playing the given script.
    ///
    /// Distance sensors read infinity (nothing in range) and cameras see no
    /// objects until the script says otherwise.
    pub fn new(params: Params, script: ScriptInterpreter) -> Self {
        let mut data = HostData::default();

        for name in params.distance_sensors.iter() {
            data.distance.insert(name.clone(), f64::INFINITY);
        }
        for cam in params.cameras.iter() {
            data.recognition.insert(cam.name.clone(), vec![]);
        }

        Self {
            params,
            script,
            data: Rc::new(RefCell::new(data)),
            num_ticks: 0,
            history: vec![ActuatorCmd::default()],
        }
    }

    /// Get a handle on the named distance sensor.
    pub fn distance_sensor(&self, name: &str) -> Result<ScriptedDistanceSensor, EqptError> {
        if !self.params.distance_sensors.iter().any(|n| n == name) {
            return Err(EqptError::DeviceNotFound(name.into()))
        }

        Ok(ScriptedDistanceSensor {
            name: name.into(),
            data: self.data.clone()
        })
    }

    /// Get a handle on the named camera.
    pub fn camera(&self, name: &str) -> Result<ScriptedCamera, EqptError> {
        match self.params.cameras.iter().find(|c| c.name == name) {
            Some(c) => Ok(ScriptedCamera {
                name: name.into(),
                has_recognition: c.has_recognition,
                data: self.data.clone()
            }),
            None => Err(EqptError::DeviceNotFound(name.into()))
        }
    }

    /// Get a handle on the keyboard.
    pub fn keyboard(&self) -> Result<ScriptedKeyboard, EqptError> {
        match self.params.keyboard {
            true => Ok(ScriptedKeyboard { data: self.data.clone() }),
            false => Err(EqptError::DeviceNotFound(KEYBOARD_NAME.into()))
        }
    }

    /// Current simulation time.
    ///
    /// Units: seconds
    pub fn time_s(&self) -> f64 {
        self.num_ticks as f64 * step_ms_to_seconds(self.params.basic_time_step_ms)
    }

    /// Number of ticks executed so far.
    pub fn num_ticks(&self) -> u64 {
        self.num_ticks
    }

    /// The demands applied on each tick, starting with the demands at time
    /// zero.
    pub fn history(&self) -> &[ActuatorCmd] {
        &self.history
    }

    /// The demands currently applied.
    pub fn current_cmd(&self) -> ActuatorCmd {
        // History always holds at least the time zero entry
        self.history.last().copied().unwrap_or_default()
    }

    /// Write the demand history into an archive.
    pub fn archive(&self, archiver: &mut Archiver) -> Result<(), ArchiveError> {
        for cmd in self.history.iter() {
            archiver.serialise(cmd)?;
        }

        Ok(())
    }

    /// Apply a frame to the host data.
    fn apply_frame(&mut self, frame: SimFrame) {
        let mut data = self.data.borrow_mut();

        for (name, value) in frame.distance {
            match data.distance.get_mut(&name) {
                Some(d) => *d = value,
                None => warn!("Scenario sets unknown distance sensor \"{}\"", name)
            }
        }

        for (name, objects) in frame.recognition {
            match data.recognition.get_mut(&name) {
                Some(o) => *o = objects,
                None => warn!("Scenario sets unknown camera \"{}\"", name)
            }
        }

        if let Some(keys) = frame.keys {
            data.keys = keys;
        }
    }

    /// Get a mutable reference to this tick's demands.
    fn current_cmd_mut(&mut self) -> &mut ActuatorCmd {
        if self.history.is_empty() {
            self.history.push(ActuatorCmd::default());
        }

        let last = self.history.len() - 1;
        &mut self.history[last]
    }
}

impl TickSource for ScriptedSim {
    fn basic_time_step_ms(&self) -> u32 {
        self.params.basic_time_step_ms
    }

    fn step(&mut self) -> StepResult {
        let next_time_s = (self.num_ticks + 1) as f64
            * step_ms_to_seconds(self.params.basic_time_step_ms);

        match self.script.get_pending_frames(next_time_s) {
            PendingFrames::EndOfScript => {
                debug!("End of scenario reached at {:.3} s", self.time_s());
                return StepResult::EndOfSimulation
            },
            PendingFrames::None => (),
            PendingFrames::Some(frames) => {
                for frame in frames {
                    self.apply_frame(frame);
                }
            }
        }

        self.num_ticks += 1;
        self.data.borrow_mut().key_cursor = 0;

        // Demands persist into the new tick until they're overwritten
        let cmd = ActuatorCmd {
            time_s: next_time_s,
            ..self.current_cmd()
        };
        self.history.push(cmd);

        StepResult::Continue
    }
}

impl ActuatorWriter for ScriptedSim {
    fn set_steering_angle(&mut self, angle_rad: f64) {
        self.current_cmd_mut().str_angle_rad = angle_rad;
    }

    fn set_cruising_speed(&mut self, speed_kph: f64) {
        self.current_cmd_mut().speed_kph = speed_kph;
    }
}

impl SensorReader for ScriptedDistanceSensor {
    type Reading = f64;

    fn enable(&mut self, _sampling_period_ms: u32) -> Result<(), EqptError> {
        self.data.borrow_mut().enabled.insert(self.name.clone());
        Ok(())
    }

    fn read(&self) -> Result<f64, EqptError> {
        let data = self.data.borrow();

        if !data.enabled.contains(&self.name) {
            return Err(EqptError::NotEnabled(self.name.clone()))
        }

        data.distance.get(&self.name)
            .copied()
            .ok_or_else(|| EqptError::DeviceNotFound(self.name.clone()))
    }
}

impl SensorReader for ScriptedCamera {
    type Reading = Vec<RecognitionObject>;

    fn enable(&mut self, _sampling_period_ms: u32) -> Result<(), EqptError> {
        if !self.has_recognition {
            return Err(EqptError::RecognitionNotSupported(self.name.clone()))
        }

        self.data.borrow_mut().enabled.insert(self.name.clone());
        Ok(())
    }

    fn read(&self) -> Result<Vec<RecognitionObject>, EqptError> {
        let data = self.data.borrow();

        if !data.enabled.contains(&self.name) {
            return Err(EqptError::NotEnabled(self.name.clone()))
        }

        data.recognition.get(&self.name)
            .cloned()
            .ok_or_else(|| EqptError::DeviceNotFound(self.name.clone()))
    }
}

impl Camera for ScriptedCamera {
    fn has_recognition(&self) -> bool {
        self.has_recognition
    }
}

impl KeyboardReader for ScriptedKeyboard {
    fn enable(&mut self, _sampling_period_ms: u32) -> Result<(), EqptError> {
        self.data.borrow_mut().enabled.insert(KEYBOARD_NAME.into());
        Ok(())
    }

    fn get_key(&mut self) -> Option<Key> {
        let mut data = self.data.borrow_mut();

        if !data.enabled.contains(KEYBOARD_NAME) {
            return None
        }

        let key = data.keys.get(data.key_cursor).copied();
        if key.is_some() {
            data.key_cursor += 1;
        }

        key
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

fn default_true() -> bool {
    true
}

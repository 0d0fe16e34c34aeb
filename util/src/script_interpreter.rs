//! # Scenario script interpreter module
//!
//! This module provides an interpreter for scenario scripts, which describe
//! how the data owned by a simulation host changes over time. A script is a
//! list of timestamped frames:
//!
//! ```text
//! 0.0: {"distance": {"distance sensor": 12.0}};
//! 0.5: {"distance": {"distance sensor": 4.0}};
//! ```
//!
//! Anything which isn't a `<time_s>: <json>;` entry is ignored, so scripts may
//! contain comments.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::fs;
use regex::RegexBuilder;
use thiserror::Error;

// Internal
use sim_if::SimFrame;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Tolerance used when comparing frame times against the simulation time, to
/// absorb rounding in accumulated time steps.
const TIME_TOLERANCE_S: f64 = 1e-9;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A frame which is scripted to apply at a specific time.
#[derive(Debug)]
pub struct ScriptedFrame {
    /// The simulation time the frame applies at
    exec_time_s: f64,

    /// The frame to apply
    frame: SimFrame
}

/// A script interpreter.
///
/// After initialising with the path to the script use `.get_pending_frames` to
/// acquire the frames which apply at the current simulation time.
#[derive(Debug)]
pub struct ScriptInterpreter {
    _script_path: Option<PathBuf>,
    frames: VecDeque<ScriptedFrame>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0:?}")]
    ScriptNotFound(PathBuf),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script contains an invalid frame at {0} s: {1}")]
    InvalidFrame(f64, serde_json::Error),

    #[error("Script frame at {0} s is earlier than the previous frame")]
    OutOfOrder(f64)
}

#[derive(Debug)]
pub enum PendingFrames {
    None,
    Some(Vec<SimFrame>),
    EndOfScript
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {

    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {

        // Get the path in a buffer
        let path = PathBuf::from(script_path.as_ref());
        
        // Check that the script file exists.
        if !path.exists() {
            return Err(ScriptError::ScriptNotFound(path));
        }

        // Load the script into a string
        let script = fs::read_to_string(&path)
            .map_err(ScriptError::ScriptLoadError)?;

        let mut si = Self::from_script(&script)?;
        si._script_path = Some(path);

        Ok(si)
    }

    /// Create a new interpreter from the contents of a script.
    pub fn from_script(script: &str) -> Result<Self, ScriptError> {

        let mut frames: VecDeque<ScriptedFrame> = VecDeque::new();

        // Go through the script executing __the magic regex__.
        let re = RegexBuilder::
            new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
            .multi_line(true)
            .build()
            .expect("Scenario script regex is invalid");

        for cap in re.captures_iter(script) {
            // Parse the exec time, groups 1 and 3 always participate in a match
            let exec_time_s: f64 = cap[1].parse()
                .map_err(|e| ScriptError::InvalidTimestamp(format!("{}", e)))?;

            // Frames must be in time order so the queue can be consumed from
            // the front.
            if let Some(prev) = frames.back() {
                if exec_time_s < prev.exec_time_s {
                    return Err(ScriptError::OutOfOrder(exec_time_s))
                }
            }

            // Parse the frame from the payload. The scripts contain JSON only.
            let frame = SimFrame::from_json(&cap[3])
                .map_err(|e| ScriptError::InvalidFrame(exec_time_s, e))?;

            frames.push_back(ScriptedFrame {
                exec_time_s,
                frame
            });
        }

        if frames.is_empty() {
            return Err(ScriptError::ScriptEmpty)
        }

        Ok(ScriptInterpreter {
            _script_path: None,
            frames
        })
    }

    /// Return the frames which apply at or before `current_time_s`.
    ///
    /// Once every frame has been returned `EndOfScript` is given.
    pub fn get_pending_frames(&mut self, current_time_s: f64) -> PendingFrames {

        // If the queue is empty the script is over and we return the end of
        // script variant
        if self.frames.is_empty() {
            return PendingFrames::EndOfScript
        }

        let mut frame_vec: Vec<SimFrame> = vec![];

        while let Some(f) = self.frames.front() {
            if f.exec_time_s > current_time_s + TIME_TOLERANCE_S {
                break
            }

            if let Some(f) = self.frames.pop_front() {
                frame_vec.push(f.frame);
            }
        }

        if frame_vec.is_empty() {
            PendingFrames::None
        }
        else {
            PendingFrames::Some(frame_vec)
        }
    }

    /// Get the number of frames remaining in the script
    pub fn get_num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.frames.back() {
            Some(f) => f.exec_time_s,
            None => 0f64
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SCRIPT: &str = r#"
        # Obstacle approaching
        0.0: {"distance": {"distance sensor": 12.0}};
        0.064: {"distance": {"distance sensor": 6.0}};
        0.096: {
            "distance": {"distance sensor": 5.0}
        };
    "#;

    #[test]
    fn test_parse_script() {
        let si = ScriptInterpreter::from_script(SCRIPT).unwrap();

        assert_eq!(si.get_num_frames(), 3);
        assert_eq!(si.get_duration(), 0.096);
    }

    #[test]
    fn test_pending_frames() {
        let mut si = ScriptInterpreter::from_script(SCRIPT).unwrap();

        match si.get_pending_frames(0.032) {
            PendingFrames::Some(f) => {
                assert_eq!(f.len(), 1);
                assert_eq!(f[0].distance["distance sensor"], 12.0);
            },
            p => panic!("Expected one frame, got {:?}", p)
        }

        // Accumulated time steps won't land exactly on the frame time
        match si.get_pending_frames(0.032 * 3.0) {
            PendingFrames::Some(f) => assert_eq!(f.len(), 2),
            p => panic!("Expected two frames, got {:?}", p)
        }

        assert!(matches!(si.get_pending_frames(0.128), PendingFrames::EndOfScript));
    }

    #[test]
    fn test_no_pending_frames() {
        let mut si = ScriptInterpreter::from_script("1.0: {};").unwrap();

        assert!(matches!(si.get_pending_frames(0.5), PendingFrames::None));
        assert!(matches!(si.get_pending_frames(1.0), PendingFrames::Some(_)));
    }

    #[test]
    fn test_script_errors() {
        assert!(matches!(
            ScriptInterpreter::from_script("# nothing here"),
            Err(ScriptError::ScriptEmpty)
        ));
        assert!(matches!(
            ScriptInterpreter::from_script("0.0: {\"distance\": 3};"),
            Err(ScriptError::InvalidFrame(_, _))
        ));
        assert!(matches!(
            ScriptInterpreter::from_script("1.0: {};\n0.5: {};"),
            Err(ScriptError::OutOfOrder(_))
        ));
        assert!(matches!(
            ScriptInterpreter::new("/this/script/does/not/exist.txt"),
            Err(ScriptError::ScriptNotFound(_))
        ));
    }
}

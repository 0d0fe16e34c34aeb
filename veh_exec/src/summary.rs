//! Summary of an executable's run, saved as JSON into the session directory

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::{fs::File, path::Path};
use log::info;
use serde::Serialize;
use thiserror::Error;

// Internal
use crate::sim_host::ScriptedSim;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// What happened during a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Name of the executable
    pub exec_name: String,

    /// Number of ticks executed by the host
    pub num_ticks: u64,

    /// Simulation time at the end of the run
    ///
    /// Units: seconds
    pub sim_time_s: f64,

    /// Speed demanded on the last tick
    ///
    /// Units: kilometers/hour
    pub final_speed_kph: f64,

    /// Steering demanded on the last tick
    ///
    /// Units: radians
    pub final_str_angle_rad: f64,

    /// How the controller finished
    pub outcome: String,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Could not create the summary file: {0}")]
    CreateError(std::io::Error),

    #[error("Could not serialise the summary: {0}")]
    SerialiseError(serde_json::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl RunSummary {
    /// Summarise the run held by the host.
    pub fn from_sim<S: Into<String>>(exec_name: &str, sim: &ScriptedSim, outcome: S) -> Self {
        let cmd = sim.current_cmd();

        Self {
            exec_name: exec_name.into(),
            num_ticks: sim.num_ticks(),
            sim_time_s: sim.time_s(),
            final_speed_kph: cmd.speed_kph,
            final_str_angle_rad: cmd.str_angle_rad,
            outcome: outcome.into()
        }
    }

    /// Write the summary to the given path as JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SummaryError> {
        let file = File::create(path.as_ref()).map_err(SummaryError::CreateError)?;

        serde_json::to_writer_pretty(&file, self)
            .map_err(SummaryError::SerialiseError)?;

        info!("Run summary saved to {:?}", path.as_ref());

        Ok(())
    }
}

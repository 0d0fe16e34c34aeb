//! Forward collision avoidance executable
//!
//! Drives the vehicle at its cruising speed until the distance sensor reports
//! an obstacle within the threshold, then stops the vehicle and exits.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::path::PathBuf;
use log::info;
use color_eyre::{Report, eyre::WrapErr};
use structopt::StructOpt;

// Internal
use sim_if::TickSource;
use util::{
    archive::Archiver,
    logger::{logger_init, LevelFilter},
    script_interpreter::ScriptInterpreter,
    session::Session
};
use veh_lib::{
    fca::{self, Fca, FcaState},
    sim_host::{self, ScriptedSim},
    summary::RunSummary
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

const EXEC_NAME: &str = "forward_collision_avoidance";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Debug, StructOpt)]
#[structopt(
    name = "forward_collision_avoidance",
    about = "Cruise until an obstacle is detected ahead"
)]
struct Opt {
    /// Scenario script to run
    #[structopt(parse(from_os_str))]
    script: PathBuf,

    /// FCA parameter file, replaces params/fca.toml
    #[structopt(long, parse(from_os_str))]
    params: Option<PathBuf>,

    /// Host parameter file, replaces params/sim_host.toml
    #[structopt(long, parse(from_os_str))]
    sim_params: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opt = Opt::from_args();

    // ---- EARLY INITIALISATION ----

    let session = Session::new(EXEC_NAME, "sessions")
        .wrap_err("Failed to create the session")?;

    logger_init(LevelFilter::Debug, &session)
        .wrap_err("Failed to initialise logging")?;

    info!("Forward Collision Avoidance\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let params: fca::Params = match opt.params {
        Some(ref p) => util::params::load_from_path(p),
        None => util::params::load("fca.toml")
    }.wrap_err("Could not load FCA params")?;

    let sim_params: sim_host::Params = match opt.sim_params {
        Some(ref p) => util::params::load_from_path(p),
        None => util::params::load("sim_host.toml")
    }.wrap_err("Could not load host params")?;

    // ---- INITIALISE ----

    let si = ScriptInterpreter::new(&opt.script)
        .wrap_err("Failed to load script")?;

    info!(
        "Loaded script {:?} lasting {:.02} s\n",
        opt.script,
        si.get_duration()
    );

    let mut sim = ScriptedSim::new(sim_params, si);

    let sensor = sim.distance_sensor(&params.sensor_name)
        .wrap_err("Failed to get the distance sensor")?;
    let step_ms = sim.basic_time_step_ms();

    let mut fca = Fca::new(sensor, params, step_ms)
        .wrap_err("Failed to initialise the FCA")?;

    let mut status_arch = Archiver::from_path(&session, "fca_status.csv")
        .wrap_err("Failed to create the status archive")?;

    // ---- MAIN LOOP ----

    let mut arch_result = Ok(());
    let state = fca::run_fca(&mut sim, &mut fca, |_, report| {
        if arch_result.is_ok() {
            arch_result = status_arch.serialise(report);
        }
    }).wrap_err("FCA failed")?;

    arch_result.wrap_err("Failed to archive the FCA status")?;

    // ---- SHUTDOWN ----

    let mut cmd_arch = Archiver::from_path(&session, "actuator_cmds.csv")
        .wrap_err("Failed to create the command archive")?;
    sim.archive(&mut cmd_arch)
        .wrap_err("Failed to archive the actuator commands")?;

    let outcome = match state {
        FcaState::Stopped => "stopped for obstacle",
        FcaState::Cruising => "end of simulation"
    };

    RunSummary::from_sim(EXEC_NAME, &sim, outcome)
        .save(session.session_root.join("summary.json"))
        .wrap_err("Failed to save the run summary")?;

    info!("FCA finished at {:.3} s: {}", sim.time_s(), outcome);

    Ok(())
}

//! Follower vehicle executable
//!
//! Runs the follower controller against a scenario script. The follower tracks
//! the leading vehicle recognised by its front camera, steering towards it and
//! adapting its speed to keep the following distance.
//!
//! Each cycle's commands and status are archived into the session.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::path::PathBuf;
use log::{info, warn};
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
    follower::{self, Follower},
    sim_host::{self, ScriptedSim},
    summary::RunSummary
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

const EXEC_NAME: &str = "follower_vehicle";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Debug, StructOpt)]
#[structopt(name = "follower_vehicle", about = "Follow the vehicle ahead")]
struct Opt {
    /// Scenario script to run
    #[structopt(parse(from_os_str))]
    script: PathBuf,

    /// Follower parameter file, replaces params/follower.toml
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

    info!("Follower Vehicle\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let params: follower::Params = match opt.params {
        Some(ref p) => util::params::load_from_path(p),
        None => util::params::load("follower.toml")
    }.wrap_err("Could not load follower params")?;

    let sim_params: sim_host::Params = match opt.sim_params {
        Some(ref p) => util::params::load_from_path(p),
        None => util::params::load("sim_host.toml")
    }.wrap_err("Could not load host params")?;

    info!("Parameters loaded");

    // ---- INITIALISE HOST ----

    info!("Loading script from {:?}", opt.script);

    let si = ScriptInterpreter::new(&opt.script)
        .wrap_err("Failed to load script")?;

    info!(
        "Loaded script lasts {:.02} s and contains {} frames\n",
        si.get_duration(),
        si.get_num_frames()
    );

    let mut sim = ScriptedSim::new(sim_params, si);

    // ---- INITIALISE FOLLOWER ----

    let camera = sim.camera(&params.camera_name)
        .wrap_err("Failed to get the follower's camera")?;
    let step_ms = sim.basic_time_step_ms();

    let mut follower = Follower::new(camera, params, step_ms)
        .wrap_err("Failed to initialise the follower")?;

    let mut status_arch = Archiver::from_path(&session, "follower_status.csv")
        .wrap_err("Failed to create the status archive")?;

    // ---- MAIN LOOP ----

    info!("Beginning main loop\n");

    let mut arch_result = Ok(());
    let num_cycles = follower::run_follower(&mut sim, &mut follower, |_, report| {
        if arch_result.is_ok() {
            arch_result = status_arch.serialise(report);
        }
    }).wrap_err("Follower failed")?;

    if let Err(e) = arch_result {
        warn!("Status archiving stopped early: {}", e);
    }

    // ---- SHUTDOWN ----

    let mut cmd_arch = Archiver::from_path(&session, "actuator_cmds.csv")
        .wrap_err("Failed to create the command archive")?;
    sim.archive(&mut cmd_arch)
        .wrap_err("Failed to archive the actuator commands")?;

    let outcome = match follower.ctrl().is_tracking() {
        true => "tracking",
        false => "target lost"
    };

    RunSummary::from_sim(EXEC_NAME, &sim, outcome)
        .save(session.session_root.join("summary.json"))
        .wrap_err("Failed to save the run summary")?;

    info!("Follower finished after {} cycles, {}", num_cycles, outcome);

    Ok(())
}

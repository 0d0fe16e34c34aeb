//! Remote control car executable
//!
//! Drives the car from the arrow keys. Up and down drive forwards and
//! backwards, left and right steer. With a script the key presses are
//! replayed from the scenario.

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
    logger::{logger_init, LevelFilter},
    archive::Archiver,
    script_interpreter::ScriptInterpreter,
    session::Session
};
use veh_lib::{
    remote_ctrl::{self, RemoteControl},
    sim_host::{self, ScriptedSim},
    summary::RunSummary
};

const EXEC_NAME: &str = "remote_control_car";

#[derive(Debug, StructOpt)]
#[structopt(name = "remote_control_car", about = "Drive the car from the keyboard")]
struct Opt {
    /// Scenario script holding the key presses
    #[structopt(parse(from_os_str))]
    script: PathBuf,

    /// Remote control parameter file, replaces params/remote_ctrl.toml
    #[structopt(long, parse(from_os_str))]
    params: Option<PathBuf>,

    /// Host parameter file, replaces params/sim_host.toml
    #[structopt(long, parse(from_os_str))]
    sim_params: Option<PathBuf>,

    /// Log every cycle
    #[structopt(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opt = Opt::from_args();

    let session = Session::new(EXEC_NAME, "sessions")
        .wrap_err("Failed to create the session")?;

    let level = match opt.verbose {
        true => LevelFilter::Trace,
        false => LevelFilter::Info
    };
    logger_init(level, &session)
        .wrap_err("Failed to initialise logging")?;

    info!("Remote Control Car\n");

    let params: remote_ctrl::Params = match opt.params {
        Some(ref p) => util::params::load_from_path(p),
        None => util::params::load("remote_ctrl.toml")
    }.wrap_err("Could not load remote control params")?;

    let sim_params: sim_host::Params = match opt.sim_params {
        Some(ref p) => util::params::load_from_path(p),
        None => util::params::load("sim_host.toml")
    }.wrap_err("Could not load host params")?;

    let si = ScriptInterpreter::new(&opt.script)
        .wrap_err("Failed to load script")?;
    let mut sim = ScriptedSim::new(sim_params, si);

    let keyboard = sim.keyboard()
        .wrap_err("Failed to get the keyboard")?;
    let step_ms = sim.basic_time_step_ms();

    let mut rc = RemoteControl::new(keyboard, params, step_ms)
        .wrap_err("Failed to initialise the remote control")?;

    let num_cycles = remote_ctrl::run_remote_control(&mut sim, &mut rc, |_, _| ())
        .wrap_err("Remote control failed")?;

    let mut cmd_arch = Archiver::from_path(&session, "actuator_cmds.csv")
        .wrap_err("Failed to create the command archive")?;
    sim.archive(&mut cmd_arch)
        .wrap_err("Failed to archive the actuator commands")?;

    RunSummary::from_sim(EXEC_NAME, &sim, "end of simulation")
        .save(session.session_root.join("summary.json"))
        .wrap_err("Failed to save the run summary")?;

    info!("Drove for {} cycles", num_cycles);

    Ok(())
}

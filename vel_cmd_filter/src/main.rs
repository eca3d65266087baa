//! Velocity command filter executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise the session, logging, and parameters
//!     - Start the command dispatcher, which writes every recieved command into the ingest
//!     - Main loop at 10 Hz:
//!         - Read the latest command from the ingest
//!         - Filter the command to the safety limits
//!         - Publish the filtered command to the actuator interface if non-zero
//!     - On Ctrl-C stop the dispatcher and exit

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{Report, eyre::WrapErr};
use log::{debug, info, warn};
use std::sync::{Arc, atomic::{AtomicBool, Ordering}};
use std::thread;
use std::time::{Duration, Instant};

// Internal
use vel_cmd_lib::{
    cmd_filter::CmdFilter,
    cmd_ingest::CmdIngest,
    cmd_pub::CmdPublisher,
    cmd_sub::CmdSubscriber,
    params::VelCmdFilterParams,
    relay::relay_tick,
    stats::RelayStats,
};
use util::{
    host,
    logger::{logger_init, LogLevels, LevelFilter},
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Name of the executable, used for the session directory and log file.
const EXEC_NAME: &str = "vel_cmd_filter";

/// Target period of one cycle.
const CYCLE_PERIOD_S: f64 = 0.10;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        EXEC_NAME,
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(
        LogLevels { stdout: LevelFilter::Debug, file: LevelFilter::Info },
        &session
    )
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Velocity Command Filter Executable\n");
    info!(
        "Running on: {:#?}",
        host::get_uname().wrap_err("Failed to get host information")?
    );
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let params: VelCmdFilterParams = util::params::load(
        "vel_cmd_filter.toml"
    ).wrap_err("Could not load vel_cmd_filter params")?;

    info!("Parameters loaded");
    debug!("{:#?}", params);

    // ---- INITIALISE MODULES ----

    let ingest = CmdIngest::new();

    let mut cmd_filter = CmdFilter::default();

    // ---- SHUTDOWN HANDLING ----

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || shutdown.store(true, Ordering::Relaxed))
            .wrap_err("Failed to set the shutdown signal handler")?;
    }

    // ---- INITIALISE NETWORK ----

    info!("Initialising network");

    let zmq_ctx = comms_if::net::zmq::Context::new();

    let publisher = CmdPublisher::new(&zmq_ctx, &params)
        .wrap_err("Failed to initialise CmdPublisher")?;
    info!(
        "CmdPublisher bound to {} on topic \"{}\"",
        params.actuator_endpoint, params.actuator_topic
    );

    let dispatcher_stop = Arc::new(AtomicBool::new(false));
    let dispatcher = CmdSubscriber::new(&zmq_ctx, &params, ingest.clone())
        .wrap_err("Failed to initialise CmdSubscriber")?
        .spawn(dispatcher_stop.clone());
    info!(
        "CmdSubscriber connecting to {} on topic \"{}\"",
        params.cmd_vel_endpoint, params.cmd_vel_topic
    );

    info!("Network initialisation complete");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    let cycle_period = Duration::from_secs_f64(CYCLE_PERIOD_S);
    let mut stats = RelayStats::default();

    while !shutdown.load(Ordering::Relaxed) {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // ---- FILTER AND PUBLISH ----

        let tick = relay_tick(&ingest, &mut cmd_filter, &publisher);
        stats.record_cycle(&tick.report, &tick.outcome);

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match cycle_period.checked_sub(cycle_dur) {
            Some(d) => thread::sleep(d),
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - cycle_period.as_secs_f64()
                );
                stats.num_cycle_overruns += 1;
            }
        }
    }

    // ---- SHUTDOWN ----

    info!("Shutdown requested, stopping command dispatcher");

    dispatcher_stop.store(true, Ordering::Relaxed);
    if dispatcher.join().is_err() {
        warn!("Command dispatcher panicked");
    }

    info!("Relay statistics: {:#?}", stats);
    if let Err(e) = session.save_json("relay_stats.json", &stats) {
        warn!("Could not save relay statistics: {}", e);
    }

    info!("End of execution");

    Ok(())
}

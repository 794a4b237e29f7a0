//! PumpkinPi main entry point
//!
//! Hexagonal architecture with one servo worker fed by a command queue.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareServo   PirSensor x2     LogEventSink   LocalClock    │
//! │  (ServoPort)     (MotionSensor)   (EventSink)    (ClockPort)   │
//! │  EnvConfigAdapter (ConfigPort)    SystemDelay (DelayNs)        │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │        PositionController (pure logic)                 │    │
//! │  │  position · MovingLock · active window                 │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  CommandQueue · servo-worker · pir watchers · Scheduler        │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::{Context, Result, bail};
use log::{debug, info};

use pumpkinpi::adapters::env_config::EnvConfigAdapter;
use pumpkinpi::adapters::hardware::Peripherals;
use pumpkinpi::adapters::log_sink::LogEventSink;
use pumpkinpi::adapters::time::{LocalClock, SystemDelay};
use pumpkinpi::app::commands::Side;
use pumpkinpi::app::controller::PositionController;
use pumpkinpi::app::ports::ConfigPort;
use pumpkinpi::config::MotionConfig;
use pumpkinpi::runtime::{
    CommandQueue, run_scheduler, spawn_controller_worker, spawn_sensor_watcher,
};
use pumpkinpi::scheduler::{CENTER_RESET_LABEL, Schedule, Scheduler};
use pumpkinpi::{duration, logging};

/// Upper bound on how long the scheduler loop sleeps between ticks.
const MAX_TICK: Duration = Duration::from_secs(1);

fn main() -> Result<()> {
    // ── 1. Configuration ──────────────────────────────────────
    let config = EnvConfigAdapter::from_process_env()
        .load()
        .context("failed to load configuration")?;

    // ── 2. Logging ────────────────────────────────────────────
    let level = logging::parse_level(&config.log_level).context("invalid LOG_LEVEL")?;
    logging::init(level).context("failed to initialise logger")?;

    info!("╔══════════════════════════════════════╗");
    info!("║  PumpkinPi v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");
    debug!("current time: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S %Z"));
    debug!(
        "config: {}",
        serde_json::to_string(&config).context("failed to serialise config")?
    );

    // ── 3. Hardware ───────────────────────────────────────────
    let hw = Peripherals::claim(&config).context("failed to claim peripherals")?;

    // ── 4. Controller + startup centering ─────────────────────
    let mut controller = PositionController::new(
        MotionConfig::from(&config),
        hw.servo,
        SystemDelay,
        LocalClock::new(),
    );
    let mut sink = LogEventSink::new();
    controller.start(&mut sink);

    // ── 5. Worker and trigger threads ─────────────────────────
    let queue = CommandQueue::new(controller.moving_lock());
    let worker = spawn_controller_worker(controller, queue.clone(), sink)
        .context("failed to spawn servo worker")?;
    let _pir_left = spawn_sensor_watcher(Side::Left, hw.pir_left, queue.clone())
        .context("failed to spawn left PIR watcher")?;
    let _pir_right = spawn_sensor_watcher(Side::Right, hw.pir_right, queue.clone())
        .context("failed to spawn right PIR watcher")?;

    // ── 6. Center-reset schedule ──────────────────────────────
    let mut sched = Scheduler::new();
    sched
        .add(Schedule {
            label: CENTER_RESET_LABEL,
            interval: config.servo_center_reset_interval,
            enabled: true,
        })
        .context("failed to add center-reset schedule")?;
    info!(
        "center reset every {}",
        duration::format(config.servo_center_reset_interval)
    );

    // ── 7. Main loop ──────────────────────────────────────────
    let mut delegate = queue;
    run_scheduler(&mut sched, &mut delegate, &worker, MAX_TICK);

    match worker.join() {
        Ok(controller) => bail!(
            "servo worker exited unexpectedly at position {}",
            controller.position()
        ),
        Err(_) => bail!("servo worker panicked"),
    }
}

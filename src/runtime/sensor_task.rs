//! PIR watcher threads.
//!
//! One thread per sensor blocks on [`MotionSensorPort::wait_for_motion`]
//! and turns each detection into a [`ServoCommand::Motion`]. The sensor
//! may fire rapidly; triggers arriving mid-movement are discarded by the
//! queue.

use core::time::Duration;
use std::thread::JoinHandle;

use log::{debug, error};

use crate::app::commands::{ServoCommand, Side};
use crate::app::ports::MotionSensorPort;
use crate::error::SensorError;

use super::queue::{CommandQueue, SubmitOutcome};
use super::spawn_named;

/// Pause after a failed sensor read before trying again.
pub const SENSOR_ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// Wait for one detection and submit it.
pub fn watch_once(
    side: Side,
    sensor: &mut impl MotionSensorPort,
    queue: &CommandQueue,
) -> Result<SubmitOutcome, SensorError> {
    sensor.wait_for_motion()?;
    debug!("{} motion detected", side);
    Ok(queue.submit(ServoCommand::Motion(side)))
}

/// Watch `sensor` forever on a `pir-left` / `pir-right` thread.
///
/// A failed read is logged and retried after [`SENSOR_ERROR_BACKOFF`].
pub fn spawn_sensor_watcher<M>(
    side: Side,
    sensor: M,
    queue: CommandQueue,
) -> std::io::Result<JoinHandle<()>>
where
    M: MotionSensorPort + Send + 'static,
{
    spawn_sensor_watcher_with_backoff(side, sensor, queue, SENSOR_ERROR_BACKOFF)
}

/// [`spawn_sensor_watcher`] with a custom pause after failed reads.
pub fn spawn_sensor_watcher_with_backoff<M>(
    side: Side,
    mut sensor: M,
    queue: CommandQueue,
    backoff: Duration,
) -> std::io::Result<JoinHandle<()>>
where
    M: MotionSensorPort + Send + 'static,
{
    let name = match side {
        Side::Left => "pir-left",
        Side::Right => "pir-right",
    };
    spawn_named(name, move || {
        loop {
            if let Err(e) = watch_once(side, &mut sensor, &queue) {
                error!("{} motion sensor: {}", side, e);
                std::thread::sleep(backoff);
            }
        }
    })
}

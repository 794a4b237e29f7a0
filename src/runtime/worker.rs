//! Servo worker: the only thread that ever touches the controller.

use std::thread::JoinHandle;

use embedded_hal::delay::DelayNs;
use log::info;

use crate::app::commands::ServoCommand;
use crate::app::controller::PositionController;
use crate::app::ports::{ClockPort, EventSink, ServoPort};

use super::queue::{CommandQueue, SubmitOutcome};
use super::spawn_named;

/// Execute queued commands in order until [`ServoCommand::Shutdown`].
///
/// Returns the controller so the caller can inspect its final state.
pub fn run_controller_worker<S, D, C, E>(
    mut controller: PositionController<S, D, C>,
    queue: &CommandQueue,
    mut sink: E,
) -> PositionController<S, D, C>
where
    S: ServoPort,
    D: DelayNs,
    C: ClockPort,
    E: EventSink,
{
    loop {
        let cmd = queue.receive();
        if controller.handle_command(cmd, &mut sink).is_none() {
            info!("servo worker: shutdown at position {}", controller.position());
            return controller;
        }
    }
}

/// Run [`run_controller_worker`] on a dedicated `servo-worker` thread.
pub fn spawn_controller_worker<S, D, C, E>(
    controller: PositionController<S, D, C>,
    queue: CommandQueue,
    sink: E,
) -> std::io::Result<JoinHandle<PositionController<S, D, C>>>
where
    S: ServoPort + Send + 'static,
    D: DelayNs + Send + 'static,
    C: ClockPort + Send + 'static,
    E: EventSink + Send + 'static,
{
    spawn_named("servo-worker", move || {
        run_controller_worker(controller, &queue, sink)
    })
}

/// Ask the worker to stop once everything queued before it has run.
pub fn request_shutdown(queue: &CommandQueue) {
    // Shutdown bypasses the moving-lock discard; a full queue only delays it.
    while queue.submit(ServoCommand::Shutdown) != SubmitOutcome::Queued {
        std::thread::sleep(core::time::Duration::from_millis(10));
    }
}

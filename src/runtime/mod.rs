//! Threads and the channel between them.
//!
//! ```text
//! ┌────────────┐ ┌────────────┐ ┌──────────────┐
//! │ pir-left   │ │ pir-right  │ │ main (sched) │   producers
//! └─────┬──────┘ └─────┬──────┘ └──────┬───────┘
//!       └──────────────┼───────────────┘
//!                      ▼
//!               CommandQueue (depth 8)
//!                      ▼
//!               servo-worker                       single consumer
//!          PositionController + EventSink
//! ```

pub mod queue;
pub mod schedule_loop;
pub mod sensor_task;
pub mod worker;

pub use queue::{CommandQueue, SubmitOutcome};
pub use schedule_loop::run_scheduler;
pub use sensor_task::{spawn_sensor_watcher, spawn_sensor_watcher_with_backoff};
pub use worker::{request_shutdown, run_controller_worker, spawn_controller_worker};

use std::thread::JoinHandle;

/// Stack size for every runtime thread.
const THREAD_STACK_KB: usize = 64;

/// Spawn a named thread with the runtime's stack size.
fn spawn_named<T, F>(name: &'static str, f: F) -> std::io::Result<JoinHandle<T>>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    log::info!("Spawning '{}' (stack={}KB)", name, THREAD_STACK_KB);
    std::thread::Builder::new()
        .name(name.into())
        .stack_size(THREAD_STACK_KB * 1024)
        .spawn(f)
}

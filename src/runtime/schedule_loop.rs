//! The main thread's scheduler loop.

use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::error;

use crate::app::ports::SchedulerDelegate;
use crate::scheduler::Scheduler;

/// Tick `sched` with wall-clock time until `worker` has finished.
///
/// Sleeps until the next schedule is due, but never longer than `max_tick`,
/// so a dead worker is noticed within one `max_tick`.
pub fn run_scheduler<T>(
    sched: &mut Scheduler,
    delegate: &mut dyn SchedulerDelegate,
    worker: &JoinHandle<T>,
    max_tick: Duration,
) {
    let mut last = Instant::now();
    while !worker.is_finished() {
        let wait = sched.time_until_next().map_or(max_tick, |d| d.min(max_tick));
        std::thread::sleep(wait);
        let now = Instant::now();
        sched.tick(now.duration_since(last), delegate);
        last = now;
    }
    error!("servo worker is no longer running; scheduler loop stopped");
}

//! Timer/scheduler engine.
//!
//! Runs alongside the motion-triggered movements. The scheduler notifies a
//! [`SchedulerDelegate`] when a schedule fires; the binary implements the
//! delegate to post a command into the queue.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Trigger Sources                          │
//! │                                                              │
//! │  ┌────────────┐  ┌────────────┐  ┌──────────────────────┐    │
//! │  │ Left PIR   │  │ Right PIR  │  │ Scheduler            │    │
//! │  │ (watcher)  │  │ (watcher)  │  │ "center-reset"       │    │
//! │  └─────┬──────┘  └─────┬──────┘  └──────────┬───────────┘    │
//! │        │               │          SchedulerDelegate          │
//! │        ▼               ▼                    ▼                │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │                    CommandQueue                        │  │
//! │  └───────────────────────┬────────────────────────────────┘  │
//! │                          ▼                                   │
//! │              PositionController.handle_command()             │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Time is fed in explicitly through [`Scheduler::tick`], which keeps the
//! engine deterministic under test.

use core::time::Duration;

use heapless::Vec;
use log::info;

use crate::app::ports::SchedulerDelegate;

// ═══════════════════════════════════════════════════════════════
//  Schedule types
// ═══════════════════════════════════════════════════════════════

/// A periodic schedule entry.
#[derive(Debug, Clone)]
pub struct Schedule {
    /// Human-readable label (e.g., "center-reset").
    pub label: &'static str,
    /// Fire every `interval`; the first fire comes after one full interval.
    pub interval: Duration,
    /// Whether this schedule is currently enabled.
    pub enabled: bool,
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// Maximum number of concurrent schedules (stack-allocated).
const MAX_SCHEDULES: usize = 4;

/// Label of the periodic return-to-center schedule.
pub const CENTER_RESET_LABEL: &str = "center-reset";

/// Why [`Scheduler::add`] refused a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddScheduleError {
    /// All slots are taken.
    Full,
    /// A zero interval would fire on every tick.
    ZeroInterval,
}

impl core::fmt::Display for AddScheduleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Full => write!(f, "all {MAX_SCHEDULES} schedule slots are in use"),
            Self::ZeroInterval => write!(f, "schedule interval must be non-zero"),
        }
    }
}

impl std::error::Error for AddScheduleError {}

/// The scheduler engine.
///
/// Decoupled from the command queue: when a schedule fires it invokes the
/// [`SchedulerDelegate`] callback instead of posting commands itself.
pub struct Scheduler {
    entries: Vec<ScheduleEntry, MAX_SCHEDULES>,
}

/// Internal bookkeeping for a live schedule.
#[derive(Debug, Clone)]
struct ScheduleEntry {
    schedule: Schedule,
    /// Time accumulated since the last fire.
    elapsed: Duration,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a schedule. Returns its slot index.
    pub fn add(&mut self, schedule: Schedule) -> Result<usize, AddScheduleError> {
        if schedule.interval.is_zero() {
            return Err(AddScheduleError::ZeroInterval);
        }
        let label = schedule.label;
        let interval = schedule.interval;
        self.entries
            .push(ScheduleEntry {
                schedule,
                elapsed: Duration::ZERO,
            })
            .map_err(|_| AddScheduleError::Full)?;
        let slot = self.entries.len() - 1;
        info!(
            "Scheduler: added '{}' at slot {} (every {})",
            label,
            slot,
            crate::duration::format(interval)
        );
        Ok(slot)
    }

    /// Advance every enabled schedule by `elapsed`.
    ///
    /// A schedule whose accumulated time reaches its interval fires once and
    /// keeps the overshoot, so fires stay on the interval grid. A single long
    /// tick never fires the same schedule twice: an overshoot of a whole
    /// interval or more is dropped.
    pub fn tick(&mut self, elapsed: Duration, delegate: &mut dyn SchedulerDelegate) {
        for entry in self.entries.iter_mut().filter(|e| e.schedule.enabled) {
            entry.elapsed = entry.elapsed.saturating_add(elapsed);
            let interval = entry.schedule.interval;
            if entry.elapsed >= interval {
                info!("Scheduler: '{}' periodic fire", entry.schedule.label);
                delegate.on_schedule_fired(entry.schedule.label);
                let over = entry.elapsed - interval;
                entry.elapsed = if over < interval { over } else { Duration::ZERO };
            }
        }
    }

    /// Time until the next enabled schedule fires, if any.
    pub fn time_until_next(&self) -> Option<Duration> {
        self.entries
            .iter()
            .filter(|e| e.schedule.enabled)
            .map(|e| e.schedule.interval.saturating_sub(e.elapsed))
            .min()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════

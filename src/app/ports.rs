//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ PositionController (domain)
//! ```
//!
//! Driven adapters (servo, PIR sensors, wall clock, event sinks, config
//! source) implement these traits. The
//! [`PositionController`](super::controller::PositionController) consumes
//! them via generics, so the domain core never touches hardware directly.
//! The per-step delay uses [`embedded_hal::delay::DelayNs`] rather than a
//! port of its own.

use crate::app::events::AppEvent;
use crate::config::PropConfig;
use crate::error::{ActuatorError, SensorError};

pub use crate::error::ConfigError;

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command the servo.
pub trait ServoPort {
    /// Drive the servo to `position`. Repeating the same position is harmless.
    fn move_to(&mut self, position: u8) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Motion sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// One PIR sensor. Carries no payload beyond "motion happened".
pub trait MotionSensorPort {
    /// Block until the next motion detection.
    fn wait_for_motion(&mut self) -> Result<(), SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Local wall-clock time as far as the active window cares.
pub trait ClockPort {
    /// Current hour-of-day (0–23).
    fn current_hour(&self) -> u8;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port
// ───────────────────────────────────────────────────────────────

/// Loads the startup configuration.
///
/// Implementations MUST run [`PropConfig::validate`] before returning, so
/// the controller can rely on `left <= center <= right`.
pub trait ConfigPort {
    fn load(&self) -> Result<PropConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate (decouples scheduler from the command queue)
// ───────────────────────────────────────────────────────────────

/// Callback trait that the scheduler invokes when a schedule fires.
///
/// The binary implements this by submitting a command to the
/// [`CommandQueue`](crate::runtime::CommandQueue); the scheduler itself
/// knows nothing about commands or threads.
pub trait SchedulerDelegate {
    /// Called when the schedule labelled `label` fires.
    fn on_schedule_fired(&mut self, label: &str);
}

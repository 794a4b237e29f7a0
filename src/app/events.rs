//! Outbound application events.
//!
//! The [`PositionController`](super::controller::PositionController) emits
//! these through the [`EventSink`](super::ports::EventSink) port. Adapters
//! on the other side decide what to do with them; in production they are
//! written to the log.

use crate::error::ActuatorError;

use super::commands::Side;

/// What started a movement sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Motion(Side),
    CenterReset,
}

/// Why a trigger did not move the servo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Motion outside the configured active hours.
    OutsideActiveWindow { hour: u8 },
    /// Another movement sequence holds the moving lock.
    AlreadyMoving,
    /// The servo is already at the trigger's target.
    AlreadyAtTarget,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Startup centering finished (carries the initial position).
    Started { position: u8 },

    /// A movement sequence acquired the lock and is about to step.
    MovementStarted { trigger: Trigger, from: u8, to: u8 },

    /// One step of a sequence failed; the sequence carries on.
    StepFailed { position: u8, error: ActuatorError },

    /// A sequence reached its target and released the lock.
    MovementFinished {
        trigger: Trigger,
        position: u8,
        steps: u16,
        failed_steps: u16,
    },

    /// A trigger was discarded without moving.
    MovementSkipped { trigger: Trigger, reason: SkipReason },
}

//! Inbound commands to the position controller.
//!
//! Trigger sources (PIR watchers, the center-reset schedule) never touch the
//! controller directly; they post one of these into the
//! [`CommandQueue`](crate::runtime::CommandQueue) and the single worker
//! interprets it.

use core::fmt;

/// Which sensor saw motion, and therefore which way the prop turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// Commands that trigger sources can send into the controller worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServoCommand {
    /// A PIR sensor fired; turn toward it.
    Motion(Side),

    /// Idle timer fired; return to center.
    ResetToCenter,

    /// Stop the worker after the commands queued before it.
    Shutdown,
}

impl ServoCommand {
    /// Whether executing this command may start a movement sequence.
    pub fn is_movement(&self) -> bool {
        !matches!(self, Self::Shutdown)
    }
}

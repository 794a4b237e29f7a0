//! Active-hours window.
//!
//! Motion only moves the prop during the configured hours (e.g. trick-or-treat
//! time). The window is half-open, `[start, end)`, and does not wrap past
//! midnight: a window whose start is not before its end is never open. When
//! the window is disabled every hour counts as active.

/// Configured active hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveWindow {
    /// When `false`, [`ActiveWindow::is_active`] is always `true`.
    pub enabled: bool,
    /// First active hour (0-23 inclusive).
    pub start_hour: u8,
    /// First inactive hour after the window (0-23).
    pub end_hour: u8,
}

impl ActiveWindow {
    /// A window that is always open.
    pub const ALWAYS: Self = Self {
        enabled: false,
        start_hour: 0,
        end_hour: 0,
    };

    pub fn new(enabled: bool, start_hour: u8, end_hour: u8) -> Self {
        Self {
            enabled,
            start_hour,
            end_hour,
        }
    }

    /// Whether motion should be acted on at `hour`.
    pub fn is_active(&self, hour: u8) -> bool {
        is_active(self.enabled, hour, self.start_hour, self.end_hour)
    }
}

/// `!enabled || (start <= hour && hour < end)`.
pub fn is_active(enabled: bool, hour: u8, start: u8, end: u8) -> bool {
    !enabled || (hour >= start && hour < end)
}

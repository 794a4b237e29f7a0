//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (stderr via the fmt subscriber in production).

use log::Level;

use crate::app::commands::Side;
use crate::app::events::{AppEvent, SkipReason, Trigger};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] in a `TAG | key=value` format.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        let (level, line) = render(event);
        log::log!(level, "{}", line);
    }
}

/// Level and text of the log line for `event`.
fn render(event: &AppEvent) -> (Level, String) {
    match event {
        AppEvent::Started { position } => (Level::Info, format!("START | position={position}")),
        AppEvent::MovementStarted { trigger, from, to } => (
            Level::Info,
            format!("MOVE  | trigger={} | {} -> {}", label(*trigger), from, to),
        ),
        AppEvent::StepFailed { position, error: e } => (
            Level::Error,
            format!("STEP  | position={position} | error={e}"),
        ),
        AppEvent::MovementFinished {
            trigger,
            position,
            steps,
            failed_steps,
        } => (
            Level::Info,
            format!(
                "DONE  | trigger={} | position={} | steps={} failed={}",
                label(*trigger),
                position,
                steps,
                failed_steps
            ),
        ),
        AppEvent::MovementSkipped { trigger, reason } => {
            let why = match reason {
                SkipReason::OutsideActiveWindow { hour } => {
                    format!("outside active window (hour={hour})")
                }
                SkipReason::AlreadyMoving => "already moving".to_string(),
                SkipReason::AlreadyAtTarget => "already at target".to_string(),
            };
            (
                Level::Debug,
                format!("SKIP  | trigger={} | {}", label(*trigger), why),
            )
        }
    }
}

fn label(trigger: Trigger) -> &'static str {
    match trigger {
        Trigger::Motion(Side::Left) => "motion-left",
        Trigger::Motion(Side::Right) => "motion-right",
        Trigger::CenterReset => "center-reset",
    }
}

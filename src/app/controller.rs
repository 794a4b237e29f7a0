//! Position controller, the hexagonal core.
//!
//! [`PositionController`] owns the servo's current position and the
//! [`MovingLock`]. Every servo movement goes through it, whether it was
//! triggered by a PIR sensor or by the center-reset schedule.
//!
//! ```text
//!  Motion(Left/Right) ──▶ ┌──────────────────────┐ ──▶ ServoPort
//!  ResetToCenter      ──▶ │  PositionController  │ ──▶ EventSink
//!                         │  position · lock     │
//!          ClockPort  ──▶ └──────────────────────┘ ◀── DelayNs
//! ```
//!
//! ## State machine
//!
//! | State  | Lock | Leaves on                                           |
//! |--------|------|-----------------------------------------------------|
//! | Idle   | free | motion (window open, not at target) or reset        |
//! | Moving | held | last step of the sequence, failed steps included    |
//!
//! A sequence steps one position unit at a time with the configured delay
//! before each step, commanding both endpoints. Step failures are logged
//! and emitted as events; the position advances regardless and the
//! sequence always finishes at its target.

use std::sync::Arc;

use core::time::Duration;
use embedded_hal::delay::DelayNs;
use log::{debug, error, info};

use crate::config::MotionConfig;

use super::commands::{ServoCommand, Side};
use super::events::{AppEvent, SkipReason, Trigger};
use super::moving_lock::MovingLock;
use super::ports::{ClockPort, EventSink, ServoPort};

/// Result of a single trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// A full step sequence ran.
    Completed {
        from: u8,
        to: u8,
        /// Actuator calls issued (both endpoints included).
        steps: u16,
        failed_steps: u16,
    },
    /// Nothing moved.
    Skipped(SkipReason),
}

impl MoveOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

// ───────────────────────────────────────────────────────────────
// PositionController
// ───────────────────────────────────────────────────────────────

pub struct PositionController<S, D, C> {
    config: MotionConfig,
    servo: S,
    delay: D,
    clock: C,
    position: u8,
    lock: Arc<MovingLock>,
}

impl<S, D, C> PositionController<S, D, C>
where
    S: ServoPort,
    D: DelayNs,
    C: ClockPort,
{
    /// Construct the controller. The tracked position starts at center.
    ///
    /// Does **not** move the servo; call [`start`](Self::start) next.
    pub fn new(config: MotionConfig, servo: S, delay: D, clock: C) -> Self {
        Self {
            position: config.limits.center,
            config,
            servo,
            delay,
            clock,
            lock: Arc::new(MovingLock::new()),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Command the servo to center once, without stepping or delay.
    ///
    /// A failed move is logged and otherwise ignored; the tracked
    /// position is center either way.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        let center = self.config.limits.center;
        debug!("setting servo to center position");
        if let Err(e) = self.servo.move_to(center) {
            error!("initial centering to {} failed: {}", center, e);
            sink.emit(&AppEvent::StepFailed {
                position: center,
                error: e,
            });
        }
        self.position = center;
        sink.emit(&AppEvent::Started { position: center });
        info!("PositionController started at {}", center);
    }

    // ── Triggers ──────────────────────────────────────────────

    /// React to motion on `side`: turn toward that side's bound.
    ///
    /// No-op outside the active window, while another sequence is moving,
    /// or when already at the bound.
    pub fn handle_motion(&mut self, side: Side, sink: &mut impl EventSink) -> MoveOutcome {
        let trigger = Trigger::Motion(side);
        let hour = self.clock.current_hour();
        if !self.config.window.is_active(hour) {
            debug!("{} motion ignored: hour {} outside active window", side, hour);
            return skip(trigger, SkipReason::OutsideActiveWindow { hour }, sink);
        }
        debug!("current time is between motion times or motion times are disabled");

        let target = match side {
            Side::Left => self.config.limits.left,
            Side::Right => self.config.limits.right,
        };
        self.run_sequence(trigger, target, sink)
    }

    /// Return to center. Not gated by the active window.
    pub fn reset_to_center(&mut self, sink: &mut impl EventSink) -> MoveOutcome {
        debug!("executing reset back to center");
        let center = self.config.limits.center;
        self.run_sequence(Trigger::CenterReset, center, sink)
    }

    /// Dispatch a queued command. `None` for [`ServoCommand::Shutdown`].
    pub fn handle_command(
        &mut self,
        cmd: ServoCommand,
        sink: &mut impl EventSink,
    ) -> Option<MoveOutcome> {
        match cmd {
            ServoCommand::Motion(side) => Some(self.handle_motion(side, sink)),
            ServoCommand::ResetToCenter => Some(self.reset_to_center(sink)),
            ServoCommand::Shutdown => None,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Last commanded position.
    pub fn position(&self) -> u8 {
        self.position
    }

    pub fn is_moving(&self) -> bool {
        self.lock.is_moving()
    }

    /// Shared handle to the moving lock (for the command queue).
    pub fn moving_lock(&self) -> Arc<MovingLock> {
        Arc::clone(&self.lock)
    }

    // ── Internal ──────────────────────────────────────────────

    fn run_sequence(
        &mut self,
        trigger: Trigger,
        target: u8,
        sink: &mut impl EventSink,
    ) -> MoveOutcome {
        if self.lock.is_moving() {
            debug!("{:?} ignored: servo already moving", trigger);
            return skip(trigger, SkipReason::AlreadyMoving, sink);
        }
        if self.position == target {
            debug!("{:?} ignored: already at {}", trigger, target);
            return skip(trigger, SkipReason::AlreadyAtTarget, sink);
        }

        let lock = Arc::clone(&self.lock);
        let Some(_guard) = lock.try_acquire() else {
            return skip(trigger, SkipReason::AlreadyMoving, sink);
        };

        let from = self.position;
        debug!("{:?}: moving servo {} -> {}", trigger, from, target);
        sink.emit(&AppEvent::MovementStarted {
            trigger,
            from,
            to: target,
        });

        let mut steps: u16 = 0;
        let mut failed_steps: u16 = 0;
        let mut position = from;
        loop {
            pause(&mut self.delay, self.config.step_delay);
            if let Err(e) = self.servo.move_to(position) {
                error!("servo step to {} failed: {}", position, e);
                sink.emit(&AppEvent::StepFailed { position, error: e });
                failed_steps += 1;
            }
            // Optimistic: the position advances even when the step failed.
            self.position = position;
            steps += 1;
            if position == target {
                break;
            }
            position = if target < position {
                position - 1
            } else {
                position + 1
            };
        }

        sink.emit(&AppEvent::MovementFinished {
            trigger,
            position: target,
            steps,
            failed_steps,
        });

        MoveOutcome::Completed {
            from,
            to: target,
            steps,
            failed_steps,
        }
    }
}

fn skip(trigger: Trigger, reason: SkipReason, sink: &mut impl EventSink) -> MoveOutcome {
    sink.emit(&AppEvent::MovementSkipped { trigger, reason });
    MoveOutcome::Skipped(reason)
}

/// Sleep for the step delay; zero skips the call entirely.
///
/// Whole microseconds go through `delay_us`, the sub-microsecond remainder
/// through `delay_ns`.
fn pause(delay: &mut impl DelayNs, d: Duration) {
    let micros = u32::try_from(d.as_micros()).unwrap_or(u32::MAX);
    if micros > 0 {
        delay.delay_us(micros);
    }
    let rem_ns = d.subsec_nanos() % 1_000;
    if rem_ns > 0 {
        delay.delay_ns(rem_ns);
    }
}

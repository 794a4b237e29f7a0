//! Command queue between trigger threads and the servo worker.
//!
//! A bounded `embassy-sync` channel carries [`ServoCommand`]s from any
//! number of producers (PIR watchers, the scheduler loop) to the single
//! controller worker.
//!
//! ```text
//! ┌──────────────┐
//! │ PIR left     │──┐
//! ├──────────────┤  │  submit()   ┌────────────────┐  receive()  ┌──────────────┐
//! │ PIR right    │──┼───────────▶│ Channel<8>     │────────────▶│ servo worker │
//! ├──────────────┤  │            └────────────────┘             └──────────────┘
//! │ scheduler    │──┘                    ▲
//! └──────────────┘        MovingLock ────┘ (discard while moving)
//! ```

use std::sync::Arc;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::{debug, warn};

use crate::app::commands::ServoCommand;
use crate::app::moving_lock::MovingLock;
use crate::app::ports::SchedulerDelegate;
use crate::scheduler::CENTER_RESET_LABEL;

/// Channel depth for servo commands.
pub const QUEUE_DEPTH: usize = 8;

type CommandChannel = Channel<CriticalSectionRawMutex, ServoCommand, QUEUE_DEPTH>;

/// What happened to a submitted command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Queued,
    /// A movement sequence was in progress; the trigger was dropped.
    DiscardedWhileMoving,
    /// The channel was full; the command was dropped.
    QueueFull,
}

/// Cloneable producer/consumer handle to the shared command channel.
#[derive(Clone)]
pub struct CommandQueue {
    channel: Arc<CommandChannel>,
    lock: Arc<MovingLock>,
}

impl CommandQueue {
    /// Create a queue that consults `lock` before accepting movement
    /// commands. Pass the controller's
    /// [`moving_lock`](crate::app::controller::PositionController::moving_lock).
    pub fn new(lock: Arc<MovingLock>) -> Self {
        Self {
            channel: Arc::new(Channel::new()),
            lock,
        }
    }

    /// Post a command without blocking.
    pub fn submit(&self, cmd: ServoCommand) -> SubmitOutcome {
        if cmd.is_movement() && self.lock.is_moving() {
            debug!("{:?} discarded: servo is moving", cmd);
            return SubmitOutcome::DiscardedWhileMoving;
        }
        match self.channel.try_send(cmd) {
            Ok(()) => SubmitOutcome::Queued,
            Err(_) => {
                warn!("command queue full, dropping {:?}", cmd);
                SubmitOutcome::QueueFull
            }
        }
    }

    /// Block the calling thread until a command arrives.
    pub fn receive(&self) -> ServoCommand {
        futures_lite::future::block_on(self.channel.receive())
    }

    /// Take a command if one is waiting.
    pub fn try_receive(&self) -> Option<ServoCommand> {
        self.channel.try_receive().ok()
    }

    /// Commands waiting to be executed.
    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}

/// Schedules post straight into the queue.
impl SchedulerDelegate for CommandQueue {
    fn on_schedule_fired(&mut self, label: &str) {
        if label == CENTER_RESET_LABEL {
            self.submit(ServoCommand::ResetToCenter);
        } else {
            warn!("no command bound to schedule '{}'", label);
        }
    }
}

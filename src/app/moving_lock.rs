//! Moving lock: at most one movement sequence at a time.
//!
//! Acquisition is a single atomic compare-exchange, so two triggers can
//! never both observe the lock free and both start moving. The returned
//! [`MovingGuard`] releases the lock when dropped, which also covers a
//! sequence that unwinds part-way.
//!
//! The lock is shared (`Arc`) between the controller, which holds it for
//! the whole step sequence, and the command queue, which peeks at it to
//! discard triggers that arrive mid-movement.

use core::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct MovingLock {
    moving: AtomicBool,
}

impl MovingLock {
    pub const fn new() -> Self {
        Self {
            moving: AtomicBool::new(false),
        }
    }

    /// Take the lock, or `None` if a sequence is already in progress.
    pub fn try_acquire(&self) -> Option<MovingGuard<'_>> {
        self.moving
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| MovingGuard { lock: self })
    }

    /// Whether a movement sequence currently holds the lock.
    pub fn is_moving(&self) -> bool {
        self.moving.load(Ordering::Acquire)
    }
}

/// Proof of holding the [`MovingLock`]; releases on drop.
#[derive(Debug)]
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct MovingGuard<'a> {
    lock: &'a MovingLock,
}

impl Drop for MovingGuard<'_> {
    fn drop(&mut self) {
        self.lock.moving.store(false, Ordering::Release);
    }
}

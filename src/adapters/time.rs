//! Time adapters.
//!
//! - [`LocalClock`] reads the local wall-clock hour through `chrono`.
//! - [`SystemDelay`] implements `embedded_hal`'s [`DelayNs`] with
//!   `std::thread::sleep`, for the per-step servo delay.

use chrono::{Local, Timelike};
use embedded_hal::delay::DelayNs;

use crate::app::ports::ClockPort;

/// Local-time hour source for the active window.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl LocalClock {
    pub fn new() -> Self {
        Self
    }
}

impl ClockPort for LocalClock {
    fn current_hour(&self) -> u8 {
        Local::now().hour() as u8
    }
}

/// Blocking delay for the worker thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemDelay;

impl DelayNs for SystemDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(core::time::Duration::from_nanos(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(core::time::Duration::from_micros(u64::from(us)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(core::time::Duration::from_millis(u64::from(ms)));
    }
}

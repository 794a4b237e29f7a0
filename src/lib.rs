//! PumpkinPi controller library.
//!
//! Exposes the domain core, adapters and runtime for the `pumpkin-pi`
//! binary and for integration testing. Raspberry Pi peripheral access is
//! guarded by the `rpi` feature inside each driver.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod duration;
pub mod error;
pub mod logging;
pub mod pins;
pub mod runtime;
pub mod scheduler;
pub mod window;

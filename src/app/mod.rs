//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the business rules for the prop: the servo
//! position state machine, its moving lock, and the commands and events
//! that flow in and out of it. All interaction with hardware happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod commands;
pub mod controller;
pub mod events;
pub mod moving_lock;
pub mod ports;

//! Peripheral drivers for the servo and the PIR sensors.

pub mod pir;
pub mod servo;

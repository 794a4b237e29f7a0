//! Unified error types for the PumpkinPi controller.
//!
//! A single top-level `Error` enum that every subsystem can convert into.
//! Hardware-facing variants are `Copy` so they can be passed through the
//! controller and the event sink without allocation; the underlying OS error
//! is logged by the driver that observed it.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Peripheral and logger startup failures funnel into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The servo could not be commanded.
    Actuator(ActuatorError),
    /// A motion sensor could not be read.
    Sensor(SensorError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// PWM duty-cycle write failed.
    PwmWriteFailed,
    /// The PWM channel could not be exported or enabled.
    PwmUnavailable,
    /// Requested position is outside the servo's 0–180 range.
    OutOfRange(u8),
    /// The header pin is not wired to a hardware PWM channel.
    NotAPwmPin(u8),
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PwmWriteFailed => write!(f, "PWM write failed"),
            Self::PwmUnavailable => write!(f, "PWM channel unavailable"),
            Self::OutOfRange(pos) => write!(f, "position {pos} out of range"),
            Self::NotAPwmPin(pin) => write!(f, "header pin {pin} has no hardware PWM"),
        }
    }
}

impl std::error::Error for ActuatorError {}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The GPIO line could not be requested for edge events.
    LineRequestFailed,
    /// Reading the next edge event failed.
    EventReadFailed,
    /// The header pin has no GPIO line behind it.
    NotAGpioPin(u8),
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LineRequestFailed => write!(f, "GPIO line request failed"),
            Self::EventReadFailed => write!(f, "GPIO event read failed"),
            Self::NotAGpioPin(pin) => write!(f, "header pin {pin} is not a GPIO"),
        }
    }
}

impl std::error::Error for SensorError {}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from [`ConfigPort`](crate::app::ports::ConfigPort) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but could not be parsed into its field type.
    Parse { key: &'static str, value: String },
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { key, value } => write!(f, "cannot parse {key}={value:?}"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Logger errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLevelError(pub String);

impl fmt::Display for LogLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a valid log level: {:?}", self.0)
    }
}

impl std::error::Error for LogLevelError {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

//! Logger setup.
//!
//! The crate logs through the `log` facade. The binary installs
//! `tracing-subscriber`'s fmt subscriber, whose `tracing-log` bridge picks
//! up every `log` record, at the level named by `LOG_LEVEL`.

use tracing_subscriber::filter::LevelFilter;

use crate::error::{Error, LogLevelError, Result};

/// Map a `LOG_LEVEL` value onto a filter.
///
/// Case-insensitive. `warning` is accepted for `warn`; `fatal` and `panic`
/// both mean "errors only".
pub fn parse_level(name: &str) -> core::result::Result<LevelFilter, LogLevelError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" | "warning" => Ok(LevelFilter::WARN),
        "error" | "fatal" | "panic" => Ok(LevelFilter::ERROR),
        _ => Err(LogLevelError(name.to_string())),
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(level: LevelFilter) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .map_err(|_| Error::Init("global logger already installed"))
}

//! Go-style duration strings (`150ms`, `1.5s`, `5m`, `1h30m`).
//!
//! Durations in the environment use the same notation operators already
//! write for the original prop, so the parser accepts a sequence of
//! decimal numbers, each with an optional fraction and a mandatory unit
//! suffix. A bare `0` is the only unit-less value allowed. Negative
//! durations are rejected.

use core::fmt;
use core::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Errors from [`parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseDurationError {
    Empty,
    /// A number was expected (e.g. `ms` or `.s`).
    InvalidNumber,
    /// A number had no unit suffix (e.g. `150`).
    MissingUnit,
    UnknownUnit(String),
    Negative,
    Overflow,
}

impl fmt::Display for ParseDurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty duration"),
            Self::InvalidNumber => write!(f, "invalid number"),
            Self::MissingUnit => write!(f, "missing unit"),
            Self::UnknownUnit(u) => write!(f, "unknown unit {u:?}"),
            Self::Negative => write!(f, "negative duration"),
            Self::Overflow => write!(f, "duration overflows"),
        }
    }
}

impl std::error::Error for ParseDurationError {}

fn unit_nanos(unit: &str) -> Option<u128> {
    Some(match unit {
        "ns" => 1,
        "us" | "\u{b5}s" | "\u{3bc}s" => 1_000,
        "ms" => 1_000_000,
        "s" => NANOS_PER_SEC,
        "m" => 60 * NANOS_PER_SEC,
        "h" => 3_600 * NANOS_PER_SEC,
        _ => return None,
    })
}

/// Parse a Go-style duration string.
pub fn parse(input: &str) -> Result<Duration, ParseDurationError> {
    let mut s = input.trim();
    if s.is_empty() {
        return Err(ParseDurationError::Empty);
    }
    if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    } else if s.starts_with('-') {
        return Err(ParseDurationError::Negative);
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err(ParseDurationError::InvalidNumber);
    }

    let mut total: u128 = 0;
    while !s.is_empty() {
        // Integer part.
        let int_len = s.bytes().take_while(u8::is_ascii_digit).count();
        let (int_str, rest) = s.split_at(int_len);
        s = rest;

        // Optional fraction.
        let mut frac_str = "";
        if let Some(rest) = s.strip_prefix('.') {
            let frac_len = rest.bytes().take_while(u8::is_ascii_digit).count();
            (frac_str, s) = rest.split_at(frac_len);
        }
        if int_str.is_empty() && frac_str.is_empty() {
            return Err(ParseDurationError::InvalidNumber);
        }

        // Unit runs until the next digit or dot.
        let unit_len = s
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() || *c == '.')
            .map_or(s.len(), |(i, _)| i);
        let (unit, rest) = s.split_at(unit_len);
        s = rest;
        if unit.is_empty() {
            return Err(ParseDurationError::MissingUnit);
        }
        let scale = unit_nanos(unit).ok_or_else(|| ParseDurationError::UnknownUnit(unit.to_string()))?;

        let int: u128 = if int_str.is_empty() {
            0
        } else {
            int_str.parse().map_err(|_| ParseDurationError::Overflow)?
        };
        let mut nanos = int.checked_mul(scale).ok_or(ParseDurationError::Overflow)?;

        // Fractions finer than a nanosecond are truncated.
        let mut frac_scale = scale;
        for digit in frac_str.bytes() {
            frac_scale /= 10;
            if frac_scale == 0 {
                break;
            }
            nanos = nanos
                .checked_add(u128::from(digit - b'0') * frac_scale)
                .ok_or(ParseDurationError::Overflow)?;
        }

        total = total.checked_add(nanos).ok_or(ParseDurationError::Overflow)?;
    }

    let secs = u64::try_from(total / NANOS_PER_SEC).map_err(|_| ParseDurationError::Overflow)?;
    Ok(Duration::new(secs, (total % NANOS_PER_SEC) as u32))
}

/// Render a duration in the largest unit that represents it exactly.
pub fn format(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    for (unit, scale) in [
        ("h", 3_600 * NANOS_PER_SEC),
        ("m", 60 * NANOS_PER_SEC),
        ("s", NANOS_PER_SEC),
        ("ms", 1_000_000),
        ("us", 1_000),
    ] {
        if nanos % scale == 0 {
            return format!("{}{}", nanos / scale, unit);
        }
    }
    format!("{nanos}ns")
}

/// `#[serde(with = "crate::duration::serde_go")]` adapter.
pub mod serde_go {
    use core::time::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format(*d))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse(&s).map_err(serde::de::Error::custom)
    }
}

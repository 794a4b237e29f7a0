//! Hobby servo driver (Linux sysfs hardware PWM).
//!
//! 50 Hz frame; positions `0..=180` map linearly onto a 500–2500 µs pulse.
//!
//! ## Dual-target design
//!
//! With the `rpi` feature: exports the PWM channel behind the configured
//! header pin, enables it with a zero duty cycle and writes `duty_cycle` on
//! every move.
//! Without it: tracks the last position in memory only.

use crate::error::ActuatorError;
use crate::pins;

/// PWM frame period (50 Hz).
pub const PWM_PERIOD_NS: u32 = 20_000_000;
/// Pulse width at position 0.
pub const MIN_PULSE_NS: u32 = 500_000;
/// Pulse width at position 180.
pub const MAX_PULSE_NS: u32 = 2_500_000;
/// Highest position the servo accepts.
pub const MAX_POSITION: u8 = 180;

/// Pulse width for `position`, in nanoseconds.
pub fn pulse_ns_for(position: u8) -> Result<u32, ActuatorError> {
    if position > MAX_POSITION {
        return Err(ActuatorError::OutOfRange(position));
    }
    let span = MAX_PULSE_NS - MIN_PULSE_NS;
    Ok(MIN_PULSE_NS + span * u32::from(position) / u32::from(MAX_POSITION))
}

pub struct ServoDriver {
    channel: u32,
    last_position: Option<u8>,
    #[cfg(feature = "rpi")]
    duty_path: std::path::PathBuf,
}

impl ServoDriver {
    /// Claim the PWM channel wired to `header_pin`.
    ///
    /// The channel is enabled with a zero duty cycle, so the servo receives
    /// no pulse until the first [`set_position`](Self::set_position).
    #[cfg(feature = "rpi")]
    pub fn new(header_pin: u8) -> Result<Self, ActuatorError> {
        Self::with_chip(header_pin, std::path::Path::new(pins::PWM_CHIP_PATH))
    }

    /// Like [`new`](Self::new), against the PWM controller at `chip`.
    #[cfg(feature = "rpi")]
    pub fn with_chip(header_pin: u8, chip: &std::path::Path) -> Result<Self, ActuatorError> {
        let channel = channel_for(header_pin)?;
        let duty_path = sysfs::enable(chip, channel)?;
        Ok(Self {
            channel,
            last_position: None,
            duty_path,
        })
    }

    /// Claim the (simulated) PWM channel wired to `header_pin`.
    #[cfg(not(feature = "rpi"))]
    pub fn new(header_pin: u8) -> Result<Self, ActuatorError> {
        let channel = channel_for(header_pin)?;
        Ok(Self {
            channel,
            last_position: None,
        })
    }

    /// Drive the horn to `position` (0–180).
    pub fn set_position(&mut self, position: u8) -> Result<(), ActuatorError> {
        let pulse_ns = pulse_ns_for(position)?;
        self.write_pulse_hw(pulse_ns)?;
        self.last_position = Some(position);
        Ok(())
    }

    #[cfg(feature = "rpi")]
    fn write_pulse_hw(&self, pulse_ns: u32) -> Result<(), ActuatorError> {
        std::fs::write(&self.duty_path, pulse_ns.to_string()).map_err(|e| {
            log::error!("PWM{}: duty_cycle write failed: {}", self.channel, e);
            ActuatorError::PwmWriteFailed
        })
    }

    #[cfg(not(feature = "rpi"))]
    fn write_pulse_hw(&self, pulse_ns: u32) -> Result<(), ActuatorError> {
        log::trace!("PWM{} (sim): duty_cycle={}", self.channel, pulse_ns);
        Ok(())
    }

    /// Last position successfully written, if any.
    pub fn last_position(&self) -> Option<u8> {
        self.last_position
    }
}

fn channel_for(header_pin: u8) -> Result<u32, ActuatorError> {
    let channel = pins::pwm_channel(header_pin).ok_or(ActuatorError::NotAPwmPin(header_pin))?;
    log::info!(
        "Servo on header pin {} (PWM channel {}, {} Hz)",
        header_pin,
        channel,
        1_000_000_000 / PWM_PERIOD_NS
    );
    Ok(channel)
}

#[cfg(feature = "rpi")]
mod sysfs {
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::thread;
    use std::time::Duration;

    use super::PWM_PERIOD_NS;
    use crate::error::ActuatorError;

    /// udev needs a moment to fix permissions on a freshly exported channel.
    const EXPORT_SETTLE_ATTEMPTS: u32 = 20;
    const EXPORT_SETTLE_DELAY: Duration = Duration::from_millis(50);

    /// Export `channel` under `chip`, set the 50 Hz period and enable output
    /// with a zero duty cycle. Returns the channel's `duty_cycle` path.
    pub(super) fn enable(chip: &Path, channel: u32) -> Result<PathBuf, ActuatorError> {
        let dir = chip.join(format!("pwm{channel}"));

        if !dir.exists() {
            write(&chip.join("export"), channel)?;
        }

        // Retry until udev has made the attribute writable.
        let period = dir.join("period");
        let mut attempt = 0;
        loop {
            match fs::write(&period, PWM_PERIOD_NS.to_string()) {
                Ok(()) => break,
                Err(e) if attempt < EXPORT_SETTLE_ATTEMPTS => {
                    log::debug!("PWM{}: period not writable yet ({})", channel, e);
                    attempt += 1;
                    thread::sleep(EXPORT_SETTLE_DELAY);
                }
                Err(e) => {
                    log::error!("PWM{}: cannot set period: {}", channel, e);
                    return Err(ActuatorError::PwmUnavailable);
                }
            }
        }

        let duty = dir.join("duty_cycle");
        write(&duty, 0)?;
        write(&dir.join("enable"), 1)?;
        Ok(duty)
    }

    fn write(path: &Path, value: u32) -> Result<(), ActuatorError> {
        fs::write(path, value.to_string()).map_err(|e| {
            log::error!("PWM: write {} to {} failed: {}", value, path.display(), e);
            ActuatorError::PwmUnavailable
        })
    }
}

//! System configuration parameters
//!
//! All tunable parameters for the PumpkinPi prop. Values are read once at
//! startup from `PUMPKINPI_*` environment variables (see
//! [`EnvConfigAdapter`](crate::adapters::env_config::EnvConfigAdapter)) and
//! never change while the process runs.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::drivers::servo::MAX_POSITION;
use crate::error::ConfigError;
use crate::pins;
use crate::window::ActiveWindow;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropConfig {
    // --- Logging ---
    /// Log level name (`trace`, `debug`, `info`, `warn`, `error`, ...)
    pub log_level: String,

    // --- Active hours ---
    /// Only respond to motion between `motion_time_start` and `motion_time_end`
    pub motion_times_enabled: bool,
    /// First active hour (0-23)
    pub motion_time_start: u8,
    /// First inactive hour (0-23)
    pub motion_time_end: u8,

    // --- Servo positions ---
    /// Resting position
    pub servo_center: u8,
    /// Position when facing the left sensor
    pub servo_left: u8,
    /// Position when facing the right sensor
    pub servo_right: u8,

    // --- Timing ---
    /// Pause before each single-unit servo step
    #[serde(with = "crate::duration::serde_go")]
    pub servo_rotate_delay: Duration,
    /// Idle period after which the servo is returned to center
    #[serde(with = "crate::duration::serde_go")]
    pub servo_center_reset_interval: Duration,

    // --- Wiring (physical header pins) ---
    pub servo_gpio_pin: u8,
    pub pir_left_motion_sensor_gpio_pin: u8,
    pub pir_right_motion_sensor_gpio_pin: u8,
}

impl Default for PropConfig {
    fn default() -> Self {
        Self {
            log_level: "debug".to_string(),

            // Active hours (6 PM – 10 PM when enabled)
            motion_times_enabled: false,
            motion_time_start: 18,
            motion_time_end: 22,

            // Positions tuned for the stock pumpkin linkage
            servo_center: 32,
            servo_left: 23,
            servo_right: 40,

            // Timing
            servo_rotate_delay: Duration::from_millis(150),
            servo_center_reset_interval: Duration::from_secs(5 * 60),

            // Wiring
            servo_gpio_pin: pins::SERVO_HEADER_PIN,
            pir_left_motion_sensor_gpio_pin: pins::PIR_LEFT_HEADER_PIN,
            pir_right_motion_sensor_gpio_pin: pins::PIR_RIGHT_HEADER_PIN,
        }
    }
}

impl PropConfig {
    /// Check ranges and cross-field invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.servo_right > MAX_POSITION {
            return Err(ConfigError::ValidationFailed("servo_right exceeds 180"));
        }
        if self.servo_left > self.servo_center {
            return Err(ConfigError::ValidationFailed(
                "servo_left must not exceed servo_center",
            ));
        }
        if self.servo_center > self.servo_right {
            return Err(ConfigError::ValidationFailed(
                "servo_center must not exceed servo_right",
            ));
        }
        if self.motion_time_start > 23 {
            return Err(ConfigError::ValidationFailed("motion_time_start must be 0-23"));
        }
        if self.motion_time_end > 23 {
            return Err(ConfigError::ValidationFailed("motion_time_end must be 0-23"));
        }
        if self.servo_center_reset_interval.is_zero() {
            return Err(ConfigError::ValidationFailed(
                "servo_center_reset_interval must be non-zero",
            ));
        }
        Ok(())
    }

    /// The configured active-hours window.
    pub fn active_window(&self) -> ActiveWindow {
        ActiveWindow::new(
            self.motion_times_enabled,
            self.motion_time_start,
            self.motion_time_end,
        )
    }

    /// Left/center/right positions.
    pub fn servo_limits(&self) -> ServoLimits {
        ServoLimits {
            left: self.servo_left,
            center: self.servo_center,
            right: self.servo_right,
        }
    }
}

/// The three servo positions the controller moves between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServoLimits {
    pub left: u8,
    pub center: u8,
    pub right: u8,
}

/// Everything the position controller needs from the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionConfig {
    pub limits: ServoLimits,
    pub step_delay: Duration,
    pub window: ActiveWindow,
}

impl From<&PropConfig> for MotionConfig {
    fn from(c: &PropConfig) -> Self {
        Self {
            limits: c.servo_limits(),
            step_delay: c.servo_rotate_delay,
            window: c.active_window(),
        }
    }
}

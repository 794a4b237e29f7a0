//! Environment configuration adapter.
//!
//! Implements [`ConfigPort`] over `PUMPKINPI_*` variables. Each variable
//! overrides one [`PropConfig`] field; unset or empty variables keep the
//! default. The result is validated before it is returned.
//!
//! | Variable (after prefix)            | Field                              |
//! |------------------------------------|------------------------------------|
//! | `LOG_LEVEL`                        | `log_level`                        |
//! | `MOTION_TIMES_ENABLED`             | `motion_times_enabled`             |
//! | `MOTION_TIME_START` / `_END`       | `motion_time_start` / `_end`       |
//! | `SERVO_CENTER` / `_LEFT` / `_RIGHT`| `servo_center` / `_left` / `_right`|
//! | `SERVO_ROTATE_DELAY`               | `servo_rotate_delay`               |
//! | `SERVO_CENTER_RESET_INTERVAL`      | `servo_center_reset_interval`      |
//! | `SERVO_GPIO_PIN`                   | `servo_gpio_pin`                   |
//! | `PIR_LEFT_MOTION_SENSOR_GPIO_PIN`  | `pir_left_motion_sensor_gpio_pin`  |
//! | `PIR_RIGHT_MOTION_SENSOR_GPIO_PIN` | `pir_right_motion_sensor_gpio_pin` |

use core::time::Duration;
use std::collections::HashMap;

use log::debug;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::PropConfig;
use crate::duration;

/// Prefix shared by every configuration variable.
pub const ENV_PREFIX: &str = "PUMPKINPI_";

/// Configuration snapshot taken from an environment.
#[derive(Debug, Clone, Default)]
pub struct EnvConfigAdapter {
    vars: HashMap<String, String>,
}

impl EnvConfigAdapter {
    /// Capture the `PUMPKINPI_*` variables of the running process.
    pub fn from_process_env() -> Self {
        Self::from_vars(std::env::vars().filter(|(k, _)| k.starts_with(ENV_PREFIX)))
    }

    /// Use an explicit list of fully-prefixed variables.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Trimmed value of `PUMPKINPI_<key>`, `None` when unset or empty.
    fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(&format!("{ENV_PREFIX}{key}"))
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn parse_with<T>(
        &self,
        key: &'static str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<Option<T>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => parse(raw).map(Some).ok_or_else(|| ConfigError::Parse {
                key,
                value: raw.to_string(),
            }),
        }
    }

    fn u8_var(&self, key: &'static str) -> Result<Option<u8>, ConfigError> {
        self.parse_with(key, |s| s.parse().ok())
    }

    fn bool_var(&self, key: &'static str) -> Result<Option<bool>, ConfigError> {
        self.parse_with(key, parse_bool)
    }

    fn duration_var(&self, key: &'static str) -> Result<Option<Duration>, ConfigError> {
        self.parse_with(key, |s| duration::parse(s).ok())
    }
}

impl ConfigPort for EnvConfigAdapter {
    fn load(&self) -> Result<PropConfig, ConfigError> {
        let mut cfg = PropConfig::default();

        if let Some(level) = self.get("LOG_LEVEL") {
            cfg.log_level = level.to_string();
        }
        if let Some(v) = self.bool_var("MOTION_TIMES_ENABLED")? {
            cfg.motion_times_enabled = v;
        }
        if let Some(v) = self.u8_var("MOTION_TIME_START")? {
            cfg.motion_time_start = v;
        }
        if let Some(v) = self.u8_var("MOTION_TIME_END")? {
            cfg.motion_time_end = v;
        }
        if let Some(v) = self.u8_var("SERVO_CENTER")? {
            cfg.servo_center = v;
        }
        if let Some(v) = self.u8_var("SERVO_LEFT")? {
            cfg.servo_left = v;
        }
        if let Some(v) = self.u8_var("SERVO_RIGHT")? {
            cfg.servo_right = v;
        }
        if let Some(v) = self.duration_var("SERVO_ROTATE_DELAY")? {
            cfg.servo_rotate_delay = v;
        }
        if let Some(v) = self.duration_var("SERVO_CENTER_RESET_INTERVAL")? {
            cfg.servo_center_reset_interval = v;
        }
        if let Some(v) = self.u8_var("SERVO_GPIO_PIN")? {
            cfg.servo_gpio_pin = v;
        }
        if let Some(v) = self.u8_var("PIR_LEFT_MOTION_SENSOR_GPIO_PIN")? {
            cfg.pir_left_motion_sensor_gpio_pin = v;
        }
        if let Some(v) = self.u8_var("PIR_RIGHT_MOTION_SENSOR_GPIO_PIN")? {
            cfg.pir_right_motion_sensor_gpio_pin = v;
        }

        cfg.validate()?;
        debug!("EnvConfigAdapter: {} variable(s) applied", self.vars.len());
        Ok(cfg)
    }
}

/// `true/false/1/0/t/f`, case-insensitive.
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Some(true),
        "false" | "f" | "0" => Some(false),
        _ => None,
    }
}

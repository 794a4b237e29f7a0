//! Fuzz target: environment configuration loading
//!
//! Splits the input into `KEY=value` lines, loads them through
//! `EnvConfigAdapter`, and verifies:
//! - No panics for any variable contents
//! - Every accepted config satisfies `left <= center <= right <= 180`
//!
//! cargo fuzz run fuzz_env_config

#![no_main]

use libfuzzer_sys::fuzz_target;
use pumpkinpi::adapters::env_config::{ENV_PREFIX, EnvConfigAdapter};
use pumpkinpi::app::ports::ConfigPort;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let vars = text.lines().filter_map(|line| {
        let (k, v) = line.split_once('=')?;
        Some((format!("{ENV_PREFIX}{k}"), v.to_string()))
    });
    if let Ok(cfg) = EnvConfigAdapter::from_vars(vars).load() {
        assert!(cfg.servo_left <= cfg.servo_center);
        assert!(cfg.servo_center <= cfg.servo_right);
        assert!(cfg.servo_right <= 180);
        assert!(!cfg.servo_center_reset_interval.is_zero());
    }
});

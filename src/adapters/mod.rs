//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements         | Connects to                  |
//! |--------------|--------------------|------------------------------|
//! | `env_config` | ConfigPort         | `PUMPKINPI_*` environment    |
//! | `hardware`   | ServoPort          | sysfs hardware PWM           |
//! |              | MotionSensorPort   | GPIO character device        |
//! | `log_sink`   | EventSink          | `log` facade                 |
//! | `time`       | ClockPort, DelayNs | Local wall clock, sleep      |

pub mod env_config;
pub mod hardware;
pub mod log_sink;
pub mod time;

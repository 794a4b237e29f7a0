//! PIR motion sensor driver (HC-SR501 style digital output).
//!
//! The sensor pulls its output high when it sees motion; the driver waits
//! for rising edges on the GPIO line.
//!
//! ## Dual-target design
//!
//! With the `rpi` feature: requests a rising-edge event handle from the
//! GPIO character device and blocks on it.
//! Without it: the sensor never fires and `wait_for_edge` parks forever.

use crate::error::SensorError;
use crate::pins;

#[cfg(feature = "rpi")]
use gpio_cdev::{Chip, EventRequestFlags, LineEventHandle, LineRequestFlags};

/// Consumer label shown by `gpioinfo`.
#[cfg(feature = "rpi")]
const CONSUMER: &str = "pumpkin-pi";

pub struct PirDriver {
    line: u32,
    #[cfg(feature = "rpi")]
    events: LineEventHandle,
}

impl PirDriver {
    /// Request edge events for the sensor wired to `header_pin`.
    pub fn new(header_pin: u8) -> Result<Self, SensorError> {
        let line = pins::bcm_line(header_pin).ok_or(SensorError::NotAGpioPin(header_pin))?;

        #[cfg(feature = "rpi")]
        let events = request_rising_edges(line)?;

        log::info!("PIR on header pin {} (BCM {})", header_pin, line);
        Ok(Self {
            line,
            #[cfg(feature = "rpi")]
            events,
        })
    }

    /// Block until the next rising edge.
    #[cfg(feature = "rpi")]
    pub fn wait_for_edge(&mut self) -> Result<(), SensorError> {
        self.events.get_event().map(|_| ()).map_err(|e| {
            log::error!("PIR BCM {}: event read failed: {}", self.line, e);
            SensorError::EventReadFailed
        })
    }

    /// Simulation: no motion ever arrives.
    #[cfg(not(feature = "rpi"))]
    pub fn wait_for_edge(&mut self) -> Result<(), SensorError> {
        log::debug!("PIR BCM {} (sim): no events", self.line);
        loop {
            std::thread::park();
        }
    }
}

#[cfg(feature = "rpi")]
fn request_rising_edges(line: u32) -> Result<LineEventHandle, SensorError> {
    let mut chip = Chip::new(pins::GPIO_CHIP_PATH).map_err(|e| {
        log::error!("cannot open {}: {}", pins::GPIO_CHIP_PATH, e);
        SensorError::LineRequestFailed
    })?;
    chip.get_line(line)
        .and_then(|l| {
            l.events(
                LineRequestFlags::INPUT,
                EventRequestFlags::RISING_EDGE,
                CONSUMER,
            )
        })
        .map_err(|e| {
            log::error!("cannot request edge events on BCM {}: {}", line, e);
            SensorError::LineRequestFailed
        })
}

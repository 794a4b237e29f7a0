//! Hardware adapters bridging the drivers to the domain port traits.
//!
//! This is the only module that hands real peripherals to the domain.
//! Without the `rpi` feature the underlying drivers are simulation stubs.

use crate::app::ports::{MotionSensorPort, ServoPort};
use crate::config::PropConfig;
use crate::drivers::pir::PirDriver;
use crate::drivers::servo::ServoDriver;
use crate::error::{ActuatorError, Error, SensorError};

/// The servo behind [`ServoPort`].
pub struct HardwareServo {
    driver: ServoDriver,
}

impl HardwareServo {
    pub fn new(header_pin: u8) -> Result<Self, ActuatorError> {
        Ok(Self {
            driver: ServoDriver::new(header_pin)?,
        })
    }
}

impl ServoPort for HardwareServo {
    fn move_to(&mut self, position: u8) -> Result<(), ActuatorError> {
        self.driver.set_position(position)
    }
}

/// One PIR sensor behind [`MotionSensorPort`].
pub struct PirSensor {
    driver: PirDriver,
}

impl PirSensor {
    pub fn new(header_pin: u8) -> Result<Self, SensorError> {
        Ok(Self {
            driver: PirDriver::new(header_pin)?,
        })
    }
}

impl MotionSensorPort for PirSensor {
    fn wait_for_motion(&mut self) -> Result<(), SensorError> {
        self.driver.wait_for_edge()
    }
}

/// Every peripheral the prop needs, claimed from the configured pins.
pub struct Peripherals {
    pub servo: HardwareServo,
    pub pir_left: PirSensor,
    pub pir_right: PirSensor,
}

impl Peripherals {
    /// Claim the sensors, then the servo.
    ///
    /// The PWM channel is enabled last so a sensor failure never leaves an
    /// output driving the horn.
    pub fn claim(config: &PropConfig) -> Result<Self, Error> {
        let pir_left = PirSensor::new(config.pir_left_motion_sensor_gpio_pin)?;
        let pir_right = PirSensor::new(config.pir_right_motion_sensor_gpio_pin)?;
        let servo = HardwareServo::new(config.servo_gpio_pin)?;
        Ok(Self {
            servo,
            pir_left,
            pir_right,
        })
    }
}

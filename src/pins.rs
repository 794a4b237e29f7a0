//! Raspberry Pi 40-pin header assignments.
//!
//! Pins are configured the way they are labelled on the board: by
//! **physical header position** (e.g. `12`), not by BCM GPIO number.
//! This module is the single source of truth for translating them into
//! the GPIO line offsets and PWM channels the Linux drivers expect.

// ---------------------------------------------------------------------------
// Default wiring
// ---------------------------------------------------------------------------

/// Servo signal wire on header pin 12 (BCM 18, PWM0).
pub const SERVO_HEADER_PIN: u8 = 12;
/// Left PIR sensor output on header pin 11 (BCM 17).
pub const PIR_LEFT_HEADER_PIN: u8 = 11;
/// Right PIR sensor output on header pin 13 (BCM 27).
pub const PIR_RIGHT_HEADER_PIN: u8 = 13;

// ---------------------------------------------------------------------------
// Linux device paths
// ---------------------------------------------------------------------------

/// GPIO character device exposing the header's BCM lines.
pub const GPIO_CHIP_PATH: &str = "/dev/gpiochip0";
/// sysfs PWM controller (requires `dtoverlay=pwm-2chan`).
pub const PWM_CHIP_PATH: &str = "/sys/class/pwm/pwmchip0";

// ---------------------------------------------------------------------------
// Header → BCM mapping
// ---------------------------------------------------------------------------

/// `(header pin, BCM GPIO)` for every GPIO-capable header position.
const HEADER_TO_BCM: [(u8, u32); 28] = [
    (3, 2),
    (5, 3),
    (7, 4),
    (8, 14),
    (10, 15),
    (11, 17),
    (12, 18),
    (13, 27),
    (15, 22),
    (16, 23),
    (18, 24),
    (19, 10),
    (21, 9),
    (22, 25),
    (23, 11),
    (24, 8),
    (26, 7),
    (27, 0),
    (28, 1),
    (29, 5),
    (31, 6),
    (32, 12),
    (33, 13),
    (35, 19),
    (36, 16),
    (37, 26),
    (38, 20),
    (40, 21),
];

/// BCM GPIO line behind a header pin, or `None` for power/ground pins.
pub fn bcm_line(header_pin: u8) -> Option<u32> {
    HEADER_TO_BCM
        .iter()
        .find(|(pin, _)| *pin == header_pin)
        .map(|(_, bcm)| *bcm)
}

/// Hardware PWM channel routed to a header pin, if any.
pub fn pwm_channel(header_pin: u8) -> Option<u32> {
    match bcm_line(header_pin)? {
        12 | 18 => Some(0),
        13 | 19 => Some(1),
        _ => None,
    }
}

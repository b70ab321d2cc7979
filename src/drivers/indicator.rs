//! Status indicator LED driver (discrete LEDs, active HIGH).
//!
//! One instance per LED; the pin is fixed at construction.  Indicator
//! changes are not individually logged — state transitions already are.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the LED GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;

pub struct IndicatorLed {
    gpio: i32,
    on: bool,
}

impl IndicatorLed {
    pub fn new(gpio: i32) -> Self {
        Self { gpio, on: false }
    }

    /// Set the LED level.  Applied unconditionally — outputs are idempotent.
    pub fn set(&mut self, on: bool) {
        hw_init::gpio_write(self.gpio, on);
        self.on = on;
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

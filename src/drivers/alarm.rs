//! Alarm buzzer driver (active HIGH).
//!
//! The toggle cadence lives in the actuation policy; this driver just
//! applies levels and logs value changes.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the buzzer GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use log::info;

use crate::drivers::hw_init;
use crate::pins;

pub struct AlarmDriver {
    on: bool,
}

impl AlarmDriver {
    pub fn new() -> Self {
        Self { on: false }
    }

    /// Set the buzzer level.  Idempotent; logged only on a value change.
    pub fn set(&mut self, on: bool) {
        hw_init::gpio_write(pins::BUZZER_GPIO, on);
        if self.on != on {
            self.on = on;
            info!("alarm: {}", if on { "ON" } else { "OFF" });
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

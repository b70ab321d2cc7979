//! Heater output driver (solid-state relay, active HIGH).
//!
//! ## Safety contract
//!
//! The heater must never run outside the `Heating` state.  Enforced by the
//! controller; this driver is a dumb actuator.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the SSR gate GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use log::info;

use crate::drivers::hw_init;
use crate::pins;

pub struct HeaterDriver {
    on: bool,
}

impl HeaterDriver {
    pub fn new() -> Self {
        Self { on: false }
    }

    /// Set the heater level.  Idempotent; the change is logged only when
    /// the commanded value actually flips.
    pub fn set(&mut self, on: bool) {
        hw_init::gpio_write(pins::HEATER_GPIO, on);
        if self.on != on {
            self.on = on;
            info!("heater: {}", if on { "ON" } else { "OFF" });
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the temperature gateway and all output drivers, exposing them
//! through [`SensorPort`] and [`ActuatorPort`].  This is the only module
//! in the system that touches actual hardware.  On non-espidf targets,
//! the underlying drivers use cfg-gated simulation stubs.

use core::time::Duration;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::alarm::AlarmDriver;
use crate::drivers::heater::HeaterDriver;
use crate::drivers::indicator::IndicatorLed;
use crate::health::SensorSample;
use crate::pins;
use crate::sensors::temperature::TemperatureSensor;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sensor: TemperatureSensor,
    heater: HeaterDriver,
    alarm: AlarmDriver,
    heating_led: IndicatorLed,
    target_led: IndicatorLed,
    overheat_led: IndicatorLed,
}

impl HardwareAdapter {
    pub fn new(sensor: TemperatureSensor) -> Self {
        Self {
            sensor,
            heater: HeaterDriver::new(),
            alarm: AlarmDriver::new(),
            heating_led: IndicatorLed::new(pins::HEATING_LED_GPIO),
            target_led: IndicatorLed::new(pins::TARGET_LED_GPIO),
            overheat_led: IndicatorLed::new(pins::OVERHEAT_LED_GPIO),
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn poll(&mut self, now: Duration) -> Option<SensorSample> {
        self.sensor.poll(now)
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_heater(&mut self, on: bool) {
        self.heater.set(on);
    }

    fn set_heating_led(&mut self, on: bool) {
        self.heating_led.set(on);
    }

    fn set_target_led(&mut self, on: bool) {
        self.target_led.set(on);
    }

    fn set_overheat_led(&mut self, on: bool) {
        self.overheat_led.set(on);
    }

    fn set_alarm(&mut self, on: bool) {
        self.alarm.set(on);
    }

    fn all_off(&mut self) {
        self.heater.set(false);
        self.alarm.set(false);
        self.heating_led.set(false);
        self.target_led.set(false);
        self.overheat_led.set(false);
    }
}

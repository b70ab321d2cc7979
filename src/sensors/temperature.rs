//! NTC thermistor temperature sensor (10 kOhm @ 25 C, B = 3950).
//!
//! Wired in a voltage-divider with a fixed 10 kOhm resistor, read via the
//! ESP32 ADC. The simplified Beta (Steinhart-Hart) equation converts
//! resistance to temperature.
//!
//! A probe that has fallen off pulls the divider to a supply rail, so a
//! rail-pegged voltage is reported as "no sample" rather than a bogus
//! temperature — the analogue of a disconnected-device code on a digital
//! bus.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the ADC via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static AtomicU16 for injection.

use core::sync::atomic::AtomicU16;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;
use core::time::Duration;

use log::error;

use crate::error::SensorError;
use crate::health::SensorSample;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

static SIM_TEMP_ADC: AtomicU16 = AtomicU16::new(2048);

/// Inject a raw ADC value for host-side tests and simulation.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_temp_adc(raw: u16) {
    SIM_TEMP_ADC.store(raw, Ordering::Relaxed);
}

const R25: f32 = 10_000.0;
const BETA: f32 = 3950.0;
const T25_K: f32 = 298.15;
const R_DIVIDER: f32 = 10_000.0;
const ADC_MAX: f32 = 4095.0;
const V_REF: f32 = 3.3;

pub struct TemperatureSensor {
    _adc_gpio: i32,
}

impl TemperatureSensor {
    pub fn new(adc_gpio: i32) -> Self {
        Self {
            _adc_gpio: adc_gpio,
        }
    }

    /// Acquire one reading.  `None` means the probe is unreachable; the
    /// caller retains its previous working temperature.
    pub fn poll(&mut self, now: Duration) -> Option<SensorSample> {
        match self.read_celsius() {
            Ok(celsius) => Some(SensorSample {
                temperature_c: celsius,
                captured_at: now,
                valid: true,
            }),
            Err(e) => {
                error!("temperature sensor: {e}");
                None
            }
        }
    }

    fn read_celsius(&self) -> Result<f32, SensorError> {
        let raw = self.read_adc();
        adc_to_celsius(raw)
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(hw_init::ADC1_CH_TEMP)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_TEMP_ADC.load(Ordering::Relaxed)
    }
}

fn adc_to_celsius(raw: u16) -> Result<f32, SensorError> {
    let voltage = (f32::from(raw) / ADC_MAX) * V_REF;
    // Open or shorted divider pegs the ADC at a rail.
    if voltage <= 0.01 || voltage >= (V_REF - 0.01) {
        return Err(SensorError::Disconnected);
    }
    let r_ntc = R_DIVIDER * voltage / (V_REF - voltage);
    let inv_t = (1.0 / T25_K) + (1.0 / BETA) * (r_ntc / R25).ln();
    if inv_t <= 0.0 {
        return Err(SensorError::ConversionFailed);
    }
    Ok((1.0 / inv_t) - 273.15)
}

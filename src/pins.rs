//! GPIO / peripheral pin assignments for the heater controller board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Heater (solid-state relay, active HIGH)
// ---------------------------------------------------------------------------

/// Digital output driving the heater SSR gate.
pub const HEATER_GPIO: i32 = 14;

// ---------------------------------------------------------------------------
// Temperature sensor — Analog (ADC1)
// ---------------------------------------------------------------------------

/// NTC thermistor — 10 kΩ @ 25 °C, voltage-divider to ADC.
/// ADC1 channel 4 (GPIO 4 on ESP32).
pub const TEMP_ADC_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Status indicators (discrete LEDs, active HIGH)
// ---------------------------------------------------------------------------

/// Lit while the heater is energised.
pub const HEATING_LED_GPIO: i32 = 5;
/// Lit once the target temperature is confirmed stable.
pub const TARGET_LED_GPIO: i32 = 13;
/// Blinks while the controller is in the overheat fail-safe state.
pub const OVERHEAT_LED_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// Alarm buzzer (active HIGH)
// ---------------------------------------------------------------------------

pub const BUZZER_GPIO: i32 = 19;

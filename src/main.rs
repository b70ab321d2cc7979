//! Heatguard Firmware — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter        LogEventSink        Esp32TimeAdapter   │
//! │  (Sensor+Actuator)      (EventSink)         (monotonic clock)  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            ControlService (pure logic)                 │    │
//! │  │  Health Monitor · State Machine · Actuation Policy     │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  esp_timer (sampling trigger, raises sample-ready flag)        │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
mod actuation;
mod config;
mod error;
mod events;
mod fsm;
mod health;
mod pins;

mod adapters;
mod app;
mod drivers;
mod sensors;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::info;

use adapters::hardware::HardwareAdapter;
use adapters::log_sink::LogEventSink;
use adapters::time::Esp32TimeAdapter;
use app::events::AppEvent;
use app::ports::{EventSink, SensorPort};
use app::service::ControlService;
use config::ControlConfig;
use sensors::temperature::TemperatureSensor;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }

    info!("=== Heater Control System v{} ===", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = ControlConfig::default();
    if let Err(e) = config.validate() {
        // A config that defeats the safety logic must never run the heater.
        log::error!("invalid configuration: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    info!("target temperature: {:.1} C", config.target_temperature_c);
    info!("safety threshold:   {:.1} C", config.safety_threshold_c);
    info!("hysteresis:         {:.1} C", config.hysteresis_c);

    // ── 3. Initialise hardware peripherals ────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    drivers::hw_timer::start_sample_timer(config.sample_interval_ms);

    // ── 4. Construct adapters ─────────────────────────────────
    let mut hw = HardwareAdapter::new(TemperatureSensor::new(pins::TEMP_ADC_GPIO));
    let mut sink = LogEventSink::new();
    let time = Esp32TimeAdapter::new();

    // ── 5. Construct the control service ──────────────────────
    let mut service = ControlService::new(config.clone());
    service.start(&mut sink);

    // Initial reading so the first cycles evaluate a real temperature.
    service.prime_sensor(hw.poll(time.now()));

    info!("system ready, entering control loop");

    // ── 6. Control loop ───────────────────────────────────────
    let cycle_ms = u64::from(config.control_loop_interval_ms);
    let status_interval_ms = u64::from(config.status_interval_secs) * 1000;
    let mut status_elapsed_ms: u64 = 0;

    #[cfg(not(target_os = "espidf"))]
    let mut sim_sample_elapsed_ms: u64 = 0;

    loop {
        std::thread::sleep(std::time::Duration::from_millis(cycle_ms));

        // Simulate the sampling timer on non-espidf targets.  On real
        // hardware, esp_timer raises the flag from its own task context.
        #[cfg(not(target_os = "espidf"))]
        {
            sim_sample_elapsed_ms += cycle_ms;
            if sim_sample_elapsed_ms >= u64::from(config.sample_interval_ms) {
                events::raise_sample_ready();
                sim_sample_elapsed_ms = 0;
            }
        }

        let now = time.now();

        // Atomic test-and-clear: a trigger landing mid-cycle is kept for
        // the next one.
        let sample = if events::take_sample_ready() {
            hw.poll(now)
        } else {
            None
        };

        service.tick(sample, &mut hw, &mut sink, now);

        // Status report on its own, slower cadence.
        status_elapsed_ms += cycle_ms;
        if status_elapsed_ms >= status_interval_ms {
            sink.emit(&AppEvent::Status(service.snapshot(now)));
            status_elapsed_ms = 0;
        }
    }
}

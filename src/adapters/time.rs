//! ESP32 time adapter.
//!
//! Provides monotonic time queries for the control loop.
//!
//! - **`target_os = "espidf"`** — wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer (microsecond precision, monotonic).
//! - **`not(target_os = "espidf")`** — uses `std::time::Instant` for
//!   host-side testing and simulation.

use core::time::Duration;

/// Monotonic clock for the ESP32 platform.
pub struct Esp32TimeAdapter {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for Esp32TimeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Esp32TimeAdapter {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Monotonic time since boot.
    #[cfg(target_os = "espidf")]
    pub fn now(&self) -> Duration {
        // SAFETY: esp_timer_get_time is a monotonic counter read with no
        // preconditions; safe from any context.
        Duration::from_micros((unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64)
    }

    /// Monotonic time since boot.
    #[cfg(not(target_os = "espidf"))]
    pub fn now(&self) -> Duration {
        self.start.elapsed()
    }

    /// Whole seconds since boot.
    pub fn uptime_secs(&self) -> u64 {
        self.now().as_secs()
    }
}

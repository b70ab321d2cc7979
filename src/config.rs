//! System configuration parameters
//!
//! All tunable parameters for the heater controller.  Constructed once at
//! startup and never mutated afterwards; the controller, health monitor and
//! actuation policy each receive their slice of it by value.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Core control configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlConfig {
    // --- Setpoint ---
    /// Target temperature (Celsius).
    pub target_temperature_c: f32,
    /// Hysteresis band below the target (Celsius).  Re-heating starts only
    /// once the temperature falls below `target - hysteresis`.
    pub hysteresis_c: f32,

    // --- Safety ---
    /// Overheat protection threshold (Celsius).  At or above this the
    /// controller is forced into the fail-safe state unconditionally.
    pub safety_threshold_c: f32,
    /// Required cooling below the safety threshold before the fail-safe
    /// state may be left (Celsius).
    pub overheat_cooldown_margin_c: f32,

    // --- Stabilization ---
    /// Continuous time at or above the hysteresis band required before the
    /// target is declared reached (seconds).
    pub stabilization_window_secs: u16,

    // --- Sensor health ---
    /// Maximum age of the last valid sample before it is considered stale
    /// (seconds).
    pub sensor_timeout_secs: u16,
    /// Lower bound of physically plausible readings (Celsius).
    pub valid_range_min_c: f32,
    /// Upper bound of physically plausible readings (Celsius).
    pub valid_range_max_c: f32,

    // --- Timing ---
    /// Sensor sampling interval (milliseconds).
    pub sample_interval_ms: u32,
    /// Evaluation cycle interval (milliseconds).
    pub control_loop_interval_ms: u32,
    /// Status report interval (seconds).
    pub status_interval_secs: u32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            // Setpoint
            target_temperature_c: 35.0,
            hysteresis_c: 2.0,

            // Safety
            safety_threshold_c: 42.0,
            overheat_cooldown_margin_c: 5.0,

            // Stabilization
            stabilization_window_secs: 30,

            // Sensor health
            sensor_timeout_secs: 5,
            valid_range_min_c: -50.0,
            valid_range_max_c: 120.0,

            // Timing
            sample_interval_ms: 1000,      // 1 Hz sampling
            control_loop_interval_ms: 100, // 10 Hz evaluation
            status_interval_secs: 5,
        }
    }
}

impl ControlConfig {
    /// Stabilization window as a [`Duration`].
    pub fn stabilization_window(&self) -> Duration {
        Duration::from_secs(u64::from(self.stabilization_window_secs))
    }

    /// Sensor staleness timeout as a [`Duration`].
    pub fn sensor_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.sensor_timeout_secs))
    }

    /// Temperature below which the fail-safe state may be left.
    pub fn overheat_exit_c(&self) -> f32 {
        self.safety_threshold_c - self.overheat_cooldown_margin_c
    }

    /// Reject configurations that would defeat the safety logic.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.hysteresis_c <= 0.0 {
            return Err(Error::Config("hysteresis must be positive"));
        }
        if self.safety_threshold_c <= self.target_temperature_c {
            return Err(Error::Config("safety threshold must be above target"));
        }
        if self.overheat_cooldown_margin_c <= 0.0 {
            return Err(Error::Config("cooldown margin must be positive"));
        }
        if self.valid_range_min_c >= self.valid_range_max_c {
            return Err(Error::Config("valid range is empty"));
        }
        if self.control_loop_interval_ms == 0 || self.sample_interval_ms == 0 {
            return Err(Error::Config("intervals must be non-zero"));
        }
        Ok(())
    }
}

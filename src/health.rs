//! Sensor health monitor.
//!
//! The monitor runs **every cycle before the controller** and accumulates a
//! fault bitmask.  Two duties:
//!
//! 1. **Sample acceptance** — decide whether an incoming sample updates the
//!    working temperature.  Missing or implausible samples are discarded and
//!    the previous working temperature is retained.
//! 2. **Fail-safe escalation** — when the last valid sample is older than
//!    the sensor timeout, or when the last reading was implausible, request
//!    a forced transition into `Overheat`.
//!
//! ## Fault lifecycle
//!
//! 1. A condition triggers a fault (e.g. no valid sample for 5 s).
//! 2. The monitor sets the corresponding bit in the mask.
//! 3. The control service forces the controller into `Overheat`.
//! 4. Each cycle the monitor re-evaluates; when the condition clears it
//!    unsets the bit.
//! 5. While any bit is set, the controller's cooldown exit stays blocked —
//!    the system does not leave `Overheat` until *every* fault is resolved
//!    and the temperature is below the cooldown threshold.

use core::time::Duration;

use log::{error, info, warn};

use crate::config::ControlConfig;
use crate::error::HealthFault;

// ---------------------------------------------------------------------------
// Sensor sample
// ---------------------------------------------------------------------------

/// One reading from the sensor gateway.  Owned transiently by the health
/// monitor until superseded by the next poll.
#[derive(Debug, Clone, Copy)]
pub struct SensorSample {
    /// Temperature in Celsius.
    pub temperature_c: f32,
    /// Monotonic capture instant (time since boot).
    pub captured_at: Duration,
    /// Cleared by the gateway when the reading arrived but failed its own
    /// integrity check (e.g. a conversion that cannot be trusted).
    pub valid: bool,
}

// ---------------------------------------------------------------------------
// Health monitor
// ---------------------------------------------------------------------------

/// Tracks sample recency and plausibility for the control service.
pub struct HealthMonitor {
    sensor_timeout: Duration,
    valid_min_c: f32,
    valid_max_c: f32,
    /// Latest accepted temperature, retained across discarded samples.
    working_temperature_c: f32,
    /// Capture instant of the last accepted sample.
    last_valid_sample: Duration,
    /// The most recent *polled* reading was out of range.  Cleared only by
    /// the next accepted sample.
    last_reading_implausible: bool,
    /// Latched fault bitmask.
    faults: u8,
}

impl HealthMonitor {
    pub fn new(config: &ControlConfig) -> Self {
        Self {
            sensor_timeout: config.sensor_timeout(),
            valid_min_c: config.valid_range_min_c,
            valid_max_c: config.valid_range_max_c,
            working_temperature_c: 0.0,
            last_valid_sample: Duration::ZERO,
            last_reading_implausible: false,
            faults: 0,
        }
    }

    /// Accept or discard one sample.
    ///
    /// A plausible sample updates the working temperature and recency; an
    /// implausible one is discarded (local recovery) but flags the range
    /// fault, since a value this far off means the sensing chain is broken,
    /// not merely absent.
    pub fn ingest(&mut self, sample: SensorSample) {
        if !sample.valid {
            warn!("health: discarding sample flagged invalid by the gateway");
            return;
        }
        if !self.in_range(sample.temperature_c) {
            warn!(
                "health: discarding implausible reading ({:.1} C)",
                sample.temperature_c
            );
            self.last_reading_implausible = true;
            return;
        }

        self.working_temperature_c = sample.temperature_c;
        self.last_valid_sample = sample.captured_at;
        self.last_reading_implausible = false;
    }

    /// Evaluate all health conditions.  Returns the updated fault bitmask.
    pub fn evaluate(&mut self, now: Duration) -> u8 {
        self.eval_fault(
            HealthFault::SensorStale,
            now.saturating_sub(self.last_valid_sample) > self.sensor_timeout,
        );

        self.eval_fault(
            HealthFault::ReadingOutOfRange,
            self.last_reading_implausible || !self.in_range(self.working_temperature_c),
        );

        self.faults
    }

    /// Latest accepted temperature.
    pub fn working_temperature_c(&self) -> f32 {
        self.working_temperature_c
    }

    /// Current fault bitmask.
    pub fn faults(&self) -> u8 {
        self.faults
    }

    /// True if **any** fault is active.
    pub fn has_faults(&self) -> bool {
        self.faults != 0
    }

    /// Check if a specific fault is active.
    pub fn has_fault(&self, fault: HealthFault) -> bool {
        self.faults & fault.mask() != 0
    }

    // ── Internal ──────────────────────────────────────────────

    fn in_range(&self, temperature_c: f32) -> bool {
        (self.valid_min_c..=self.valid_max_c).contains(&temperature_c)
    }

    /// Set or clear a fault bit based on a boolean condition.
    fn eval_fault(&mut self, fault: HealthFault, condition: bool) {
        if condition {
            if self.faults & fault.mask() == 0 {
                error!("HEALTH FAULT SET: {fault}");
            }
            self.faults |= fault.mask();
        } else {
            if self.faults & fault.mask() != 0 {
                info!("HEALTH FAULT CLEARED: {fault}");
            }
            self.faults &= !fault.mask();
        }
    }
}

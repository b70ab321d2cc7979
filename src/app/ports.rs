//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlService (domain)
//! ```
//!
//! Driven adapters (the temperature gateway, the output drivers, the status
//! reporter) implement these traits.  The
//! [`ControlService`](super::service::ControlService) consumes them via
//! generics, so the domain core never touches hardware directly.

use core::time::Duration;

use crate::health::SensorSample;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the main cycle calls this when the sampling trigger
/// fires.  Must not block longer than one cycle's budget.
pub trait SensorPort {
    /// Acquire one reading, or `None` when the sensor is unreachable.
    fn poll(&mut self, now: Duration) -> Option<SensorSample>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: discrete boolean outputs, set unconditionally every
/// cycle.  Implementations are expected to log heater and alarm changes
/// when the commanded value actually flips.
pub trait ActuatorPort {
    fn set_heater(&mut self, on: bool);
    fn set_heating_led(&mut self, on: bool);
    fn set_target_led(&mut self, on: bool);
    fn set_overheat_led(&mut self, on: bool);
    fn set_alarm(&mut self, on: bool);

    /// Kill every output — safe shutdown.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / reporting)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log, display,
/// etc.); the core never builds display text.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

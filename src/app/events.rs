//! Outbound application events.
//!
//! The [`ControlService`](super::service::ControlService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them — log to serial, drive a
//! display, etc.

use core::time::Duration;

use crate::fsm::ControlState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic status snapshot.
    Status(ControllerSnapshot),

    /// The controller transitioned between states.
    StateChanged {
        from: ControlState,
        to: ControlState,
    },

    /// The controller entered the fail-safe state — one-time alert, distinct
    /// from the steady-state alarm cadence.
    AlarmLatched,

    /// One or more health faults were raised.
    FaultDetected(u8),

    /// All health faults have been cleared.
    FaultCleared,

    /// The control service has started (carries the initial state).
    Started(ControlState),
}

/// A point-in-time view of the controller, recomputed each time it is
/// requested and never persisted.
#[derive(Debug, Clone, Copy)]
pub struct ControllerSnapshot {
    pub state: ControlState,
    /// Last accepted temperature (Celsius).
    pub last_temperature_c: f32,
    /// Configured setpoint, for rendering alongside the reading.
    pub target_temperature_c: f32,
    /// Heater command as of the last completed cycle.
    pub heater_on: bool,
    /// Stabilization window start, while in `Stabilizing`.
    pub stabilizing_since: Option<Duration>,
    /// Configured stabilization window, for elapsed/required rendering.
    pub stabilization_window: Duration,
    /// Monotonic time the snapshot was taken (time since boot).
    pub now: Duration,
}

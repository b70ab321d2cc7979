//! Actuation policy — maps the control state to actuator and indicator
//! commands.
//!
//! Pure apart from the alarm cadence timer: the same `(state, now)` pair
//! always yields the same indicator output.  The overheat indicator blinks
//! on wall-clock parity (`now / half-period`), not an internal counter, so
//! it self-synchronises after any pause; the alarm toggles on its own
//! interval measured from the last toggle, independent of the blink phase.

use core::time::Duration;

use crate::fsm::ControlState;

/// Overheat indicator half-period: 500 ms on, 500 ms off.
pub const OVERHEAT_BLINK_HALF_PERIOD_MS: u64 = 500;

/// Alarm buzzer toggle interval while overheated.
pub const ALARM_TOGGLE_INTERVAL_MS: u64 = 200;

// ---------------------------------------------------------------------------
// Output command
// ---------------------------------------------------------------------------

/// One cycle's worth of actuator levels.  Applied unconditionally every
/// cycle — outputs are idempotent, not edge-triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputCommand {
    pub heater: bool,
    pub heating_led: bool,
    pub target_led: bool,
    pub overheat_led: bool,
    pub alarm: bool,
}

impl OutputCommand {
    /// Everything off — safe default.
    pub fn all_off() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Derives output levels from the final state of each cycle.
pub struct ActuationPolicy {
    alarm_on: bool,
    last_alarm_toggle: Duration,
}

impl ActuationPolicy {
    pub fn new() -> Self {
        Self {
            alarm_on: false,
            last_alarm_toggle: Duration::ZERO,
        }
    }

    /// Compute this cycle's output levels.
    ///
    /// `heater_on` comes from the controller (on iff the final state is
    /// `Heating`); the indicators and alarm are derived here.
    pub fn outputs(&mut self, state: ControlState, heater_on: bool, now: Duration) -> OutputCommand {
        let overheat = state == ControlState::Overheat;

        if overheat {
            let interval = Duration::from_millis(ALARM_TOGGLE_INTERVAL_MS);
            if now.saturating_sub(self.last_alarm_toggle) > interval {
                self.alarm_on = !self.alarm_on;
                self.last_alarm_toggle = now;
            }
        } else {
            // Forced off immediately on leaving Overheat.
            self.alarm_on = false;
        }

        OutputCommand {
            heater: heater_on,
            heating_led: state == ControlState::Heating,
            target_led: state == ControlState::TargetReached,
            overheat_led: overheat && blink_phase_on(now),
            alarm: self.alarm_on,
        }
    }
}

/// Wall-clock blink phase: on during odd half-periods.
fn blink_phase_on(now: Duration) -> bool {
    (now.as_millis() / u128::from(OVERHEAT_BLINK_HALF_PERIOD_MS)) % 2 == 1
}

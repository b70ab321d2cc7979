//! Mock hardware adapter for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO registers.

use heatguard::app::events::AppEvent;
use heatguard::app::ports::{ActuatorPort, EventSink};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    SetHeater(bool),
    SetHeatingLed(bool),
    SetTargetLed(bool),
    SetOverheatLed(bool),
    SetAlarm(bool),
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

/// Records the call history and tracks the current level of each output.
#[derive(Default)]
pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
    pub heater: bool,
    pub heating_led: bool,
    pub target_led: bool,
    pub overheat_led: bool,
    pub alarm: bool,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_call(&self) -> Option<&ActuatorCall> {
        self.calls.last()
    }

    /// Number of heater commands that changed the level.
    pub fn heater_flips(&self) -> usize {
        let mut level = false;
        let mut flips = 0;
        for call in &self.calls {
            if let ActuatorCall::SetHeater(on) = call {
                if *on != level {
                    level = *on;
                    flips += 1;
                }
            }
        }
        flips
    }
}

impl ActuatorPort for MockHardware {
    fn set_heater(&mut self, on: bool) {
        self.heater = on;
        self.calls.push(ActuatorCall::SetHeater(on));
    }

    fn set_heating_led(&mut self, on: bool) {
        self.heating_led = on;
        self.calls.push(ActuatorCall::SetHeatingLed(on));
    }

    fn set_target_led(&mut self, on: bool) {
        self.target_led = on;
        self.calls.push(ActuatorCall::SetTargetLed(on));
    }

    fn set_overheat_led(&mut self, on: bool) {
        self.overheat_led = on;
        self.calls.push(ActuatorCall::SetOverheatLed(on));
    }

    fn set_alarm(&mut self, on: bool) {
        self.alarm = on;
        self.calls.push(ActuatorCall::SetAlarm(on));
    }

    fn all_off(&mut self) {
        self.heater = false;
        self.heating_led = false;
        self.target_led = false;
        self.overheat_led = false;
        self.alarm = false;
        self.calls.push(ActuatorCall::AllOff);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Collects every emitted [`AppEvent`] for assertion.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alarm_latches(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::AlarmLatched))
            .count()
    }

    pub fn state_changes(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::StateChanged { from, to } => {
                    Some(format!("{}->{}", from.name(), to.name()))
                }
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

//! Control service — the hexagonal core.
//!
//! [`ControlService`] owns the controller, health monitor, and actuation
//! policy, and runs the fixed per-cycle order:
//!
//! ```text
//!  sample ──▶ health monitor ──▶ controller ──▶ actuation ──▶ outputs
//!              (validate,         (table +       (levels)     (ports)
//!               fail-safe)         override)
//! ```
//!
//! All I/O flows through port traits injected at call sites, making the
//! entire service testable with mock adapters.

use core::time::Duration;

use log::{info, warn};

use crate::actuation::{ActuationPolicy, OutputCommand};
use crate::config::ControlConfig;
use crate::fsm::{ControlState, Controller};
use crate::health::{HealthMonitor, SensorSample};

use super::events::{AppEvent, ControllerSnapshot};
use super::ports::{ActuatorPort, EventSink};

// ───────────────────────────────────────────────────────────────
// ControlService
// ───────────────────────────────────────────────────────────────

/// Orchestrates one evaluation cycle at a time.  Single-threaded by
/// construction: the caller invokes [`tick`](Self::tick) from exactly one
/// context, and every field is mutated only there, once per cycle.
pub struct ControlService {
    controller: Controller,
    health: HealthMonitor,
    actuation: ActuationPolicy,
    config: ControlConfig,
    cycle_count: u64,
}

impl ControlService {
    pub fn new(config: ControlConfig) -> Self {
        let controller = Controller::new(config.clone());
        let health = HealthMonitor::new(&config);
        Self {
            controller,
            health,
            actuation: ActuationPolicy::new(),
            config,
            cycle_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce the initial state.  Call once, before the first cycle.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        info!("control service started in {}", self.controller.state().name());
        sink.emit(&AppEvent::Started(self.controller.state()));
    }

    /// Feed a boot-time reading into the monitor so the first cycles do not
    /// run on a phantom default temperature.
    pub fn prime_sensor(&mut self, sample: Option<SensorSample>) {
        if let Some(s) = sample {
            self.health.ingest(s);
        }
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full evaluation cycle.
    ///
    /// `sample` is `Some` only on cycles where the sampling trigger fired
    /// *and* the gateway produced a reading; cycles in between evaluate on
    /// the retained working temperature.
    pub fn tick(
        &mut self,
        sample: Option<SensorSample>,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
        now: Duration,
    ) {
        self.cycle_count += 1;

        // 1. Sample acceptance
        if let Some(s) = sample {
            self.health.ingest(s);
        }

        // 2. Health evaluation and forced fail-safe
        let prev_faults = self.health.faults();
        let faults = self.health.evaluate(now);

        if faults != 0 && prev_faults == 0 {
            sink.emit(&AppEvent::FaultDetected(faults));
        } else if faults == 0 && prev_faults != 0 {
            sink.emit(&AppEvent::FaultCleared);
        }

        if faults != 0 && self.controller.state() != ControlState::Overheat {
            warn!("health check failed (flags=0b{:04b}), entering fail-safe", faults);
            let from = self.controller.state();
            if self.controller.force_overheat(now) {
                sink.emit(&AppEvent::StateChanged {
                    from,
                    to: ControlState::Overheat,
                });
                sink.emit(&AppEvent::AlarmLatched);
            }
        }

        // 3. Controller evaluation (nominal table + overheat override)
        let outcome = self
            .controller
            .step(self.health.working_temperature_c(), now, faults != 0);

        if let Some((from, to)) = outcome.transition {
            sink.emit(&AppEvent::StateChanged { from, to });
        }
        if outcome.alarm_latched {
            sink.emit(&AppEvent::AlarmLatched);
        }

        // 4. Actuation — recomputed from the final state, applied every cycle
        let cmd = self
            .actuation
            .outputs(self.controller.state(), outcome.heater_on, now);
        Self::apply_outputs(&cmd, hw);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a status snapshot for the reporter.
    pub fn snapshot(&self, now: Duration) -> ControllerSnapshot {
        ControllerSnapshot {
            state: self.controller.state(),
            last_temperature_c: self.controller.last_temperature_c(),
            target_temperature_c: self.config.target_temperature_c,
            heater_on: self.controller.heater_on(),
            stabilizing_since: self.controller.stabilizing_since(),
            stabilization_window: self.config.stabilization_window(),
            now,
        }
    }

    /// Current control state.
    pub fn state(&self) -> ControlState {
        self.controller.state()
    }

    /// Latest accepted temperature.
    pub fn working_temperature_c(&self) -> f32 {
        self.health.working_temperature_c()
    }

    /// Current active fault bitmask (0 = healthy).
    pub fn fault_flags(&self) -> u8 {
        self.health.faults()
    }

    /// Total evaluation cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    // ── Internal ──────────────────────────────────────────────

    /// Push every output level through the actuator port.  Idempotent:
    /// values are re-asserted even when unchanged.
    fn apply_outputs(cmd: &OutputCommand, hw: &mut impl ActuatorPort) {
        hw.set_heater(cmd.heater);
        hw.set_heating_led(cmd.heating_led);
        hw.set_target_led(cmd.target_led);
        hw.set_overheat_led(cmd.overheat_led);
        hw.set_alarm(cmd.alarm);
    }
}

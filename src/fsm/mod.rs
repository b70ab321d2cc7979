//! Hysteresis state machine for the heater control loop.
//!
//! ```text
//!  IDLE ──[T < target − hyst]──▶ HEATING ──[T ≥ target]──▶ STABILIZING
//!    ▲                             ▲  ▲                        │    │
//!    │                             │  └──[T < target − hyst]───┘    │
//!    │                             │                     [window elapsed]
//!    │                             │                                ▼
//!    │                             └──[T < target − hyst]── TARGET_REACHED
//!    │
//!    └──[T < threshold − margin]── OVERHEAT ◀──[T ≥ threshold]── (any state)
//! ```
//!
//! Each evaluation cycle runs two phases:
//!
//! 1. **Nominal transition** — a pure lookup over the table above.  Guards
//!    are evaluated in row order and the first match wins; no row matching
//!    leaves the state unchanged.
//! 2. **Overheat override** — if the temperature is at or above the safety
//!    threshold, the result of phase 1 is discarded and the state is forced
//!    to `Overheat`.  The override is re-evaluated every cycle, so no
//!    nominal transition can route around it.
//!
//! The heater command is recomputed from the *final* state each cycle:
//! on if and only if the controller ends the cycle in `Heating`.

use core::time::Duration;

use log::{info, warn};

use crate::config::ControlConfig;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Control states.  Exactly one is active at any time; there are no
/// hidden sub-states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ControlState {
    /// Heater off, waiting for the temperature to leave the hysteresis band.
    Idle,
    /// Heater on, driving towards the target.
    Heating,
    /// At or above target; waiting out the stabilization window.
    Stabilizing,
    /// Target confirmed stable.
    TargetReached,
    /// Fail-safe: heater locked off until the cooldown guard clears.
    Overheat,
}

impl ControlState {
    /// Human-readable state name for logs and status reports.
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Heating => "HEATING",
            Self::Stabilizing => "STABILIZING",
            Self::TargetReached => "TARGET_REACHED",
            Self::Overheat => "OVERHEAT",
        }
    }
}

// ---------------------------------------------------------------------------
// Step outcome
// ---------------------------------------------------------------------------

/// What one evaluation cycle produced.
#[derive(Debug, Clone, Copy)]
pub struct StepOutcome {
    /// `(from, to)` when the cycle changed state.
    pub transition: Option<(ControlState, ControlState)>,
    /// Heater command for this cycle, derived from the final state.
    pub heater_on: bool,
    /// Set exactly once, on the cycle that enters `Overheat`.
    pub alarm_latched: bool,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Owns every mutable field of the control loop: the state, the last
/// accepted temperature, the heater command, and the stabilization timer.
/// No I/O happens here — the controller is a pure function of
/// `(state, temperature, config, now)` plus this bookkeeping.
pub struct Controller {
    config: ControlConfig,
    state: ControlState,
    last_temperature_c: f32,
    heater_on: bool,
    /// Set on the `Heating → Stabilizing` edge, cleared on leaving
    /// `Stabilizing` through any edge.
    stabilizing_since: Option<Duration>,
}

impl Controller {
    pub fn new(config: ControlConfig) -> Self {
        Self {
            config,
            state: ControlState::Idle,
            last_temperature_c: 0.0,
            heater_on: false,
            stabilizing_since: None,
        }
    }

    // ── Per-cycle evaluation ──────────────────────────────────

    /// Advance the state machine by one evaluation cycle.
    ///
    /// `fault_active` gates the `Overheat → Idle` cooldown guard: while the
    /// health monitor holds any fault, the fail-safe state cannot be left
    /// regardless of temperature.
    pub fn step(&mut self, temperature_c: f32, now: Duration, fault_active: bool) -> StepOutcome {
        self.last_temperature_c = temperature_c;

        let prev = self.state;
        let nominal = self.nominal_transition(temperature_c, now, fault_active);
        let next = self.overheat_override(nominal, temperature_c);

        let mut alarm_latched = false;
        if next != prev {
            self.apply_transition(prev, next, now);
            alarm_latched = next == ControlState::Overheat;
        }

        self.heater_on = self.state == ControlState::Heating;

        StepOutcome {
            transition: (next != prev).then_some((prev, next)),
            heater_on: self.heater_on,
            alarm_latched,
        }
    }

    /// Jump straight into the fail-safe state, bypassing the transition
    /// table.  Used by the health monitor.  Returns `true` if this call
    /// performed the transition (i.e. the controller was not already there).
    pub fn force_overheat(&mut self, now: Duration) -> bool {
        if self.state == ControlState::Overheat {
            return false;
        }
        let prev = self.state;
        self.apply_transition(prev, ControlState::Overheat, now);
        self.heater_on = false;
        true
    }

    // ── Phase 1: nominal transition table ─────────────────────

    /// Pure table lookup.  Guards in row order, first match wins; no match
    /// leaves the state unchanged.
    fn nominal_transition(
        &self,
        temperature_c: f32,
        now: Duration,
        fault_active: bool,
    ) -> ControlState {
        use ControlState::{Heating, Idle, Overheat, Stabilizing, TargetReached};

        let cfg = &self.config;
        let lower_band = cfg.target_temperature_c - cfg.hysteresis_c;

        match self.state {
            Idle if temperature_c < lower_band => Heating,
            Heating if temperature_c >= cfg.target_temperature_c => Stabilizing,
            Stabilizing if temperature_c < lower_band => Heating,
            Stabilizing if self.stabilization_elapsed(now) >= cfg.stabilization_window() => {
                TargetReached
            }
            TargetReached if temperature_c < lower_band => Heating,
            Overheat if !fault_active && temperature_c < cfg.overheat_exit_c() => Idle,
            unchanged => unchanged,
        }
    }

    // ── Phase 2: overheat override ────────────────────────────

    /// Unconditional safety check applied to the nominal result.  Cannot be
    /// bypassed by any table row.
    fn overheat_override(&self, nominal: ControlState, temperature_c: f32) -> ControlState {
        if temperature_c >= self.config.safety_threshold_c {
            ControlState::Overheat
        } else {
            nominal
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> ControlState {
        self.state
    }

    pub fn last_temperature_c(&self) -> f32 {
        self.last_temperature_c
    }

    /// Heater command as of the last completed cycle.
    pub fn heater_on(&self) -> bool {
        self.heater_on
    }

    /// Instant the stabilization window started, while in `Stabilizing`.
    pub fn stabilizing_since(&self) -> Option<Duration> {
        self.stabilizing_since
    }

    // ── Internal ──────────────────────────────────────────────

    /// Continuous time spent in `Stabilizing` so far.
    fn stabilization_elapsed(&self, now: Duration) -> Duration {
        self.stabilizing_since
            .map_or(Duration::ZERO, |since| now.saturating_sub(since))
    }

    /// Commit a state change and run entry bookkeeping.
    fn apply_transition(&mut self, from: ControlState, to: ControlState, now: Duration) {
        info!("state: {} -> {}", from.name(), to.name());

        // The window restarts on every Heating -> Stabilizing edge; elapsed
        // time never survives leaving Stabilizing.
        self.stabilizing_since = match (from, to) {
            (ControlState::Heating, ControlState::Stabilizing) => Some(now),
            _ => None,
        };

        if to == ControlState::Overheat {
            warn!("overheat: emergency heater shutdown");
        }

        self.state = to;
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════

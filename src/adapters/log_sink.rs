//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! A future display adapter would implement the same trait.

use log::{error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::fsm::ControlState;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Status(s) => {
                info!(
                    "STATUS | T={:.2}\u{00b0}C | target={:.1}\u{00b0}C | state={} | heater={} | up={}s",
                    s.last_temperature_c,
                    s.target_temperature_c,
                    s.state.name(),
                    if s.heater_on { "ON" } else { "OFF" },
                    s.now.as_secs(),
                );
                if s.state == ControlState::Stabilizing {
                    if let Some(since) = s.stabilizing_since {
                        info!(
                            "STATUS | stabilizing {}s / {}s",
                            s.now.saturating_sub(since).as_secs(),
                            s.stabilization_window.as_secs(),
                        );
                    }
                }
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {} -> {}", from.name(), to.name());
            }
            AppEvent::AlarmLatched => {
                error!("ALARM | overheat detected, emergency heater shutdown");
            }
            AppEvent::FaultDetected(flags) => {
                warn!("FAULT | detected, flags=0b{:04b}", flags);
            }
            AppEvent::FaultCleared => {
                info!("FAULT | all cleared");
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={}", state.name());
            }
        }
    }
}

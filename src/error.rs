#![allow(dead_code)] // Taxonomy variants reserved for typed port returns

//! Unified error types for the heater controller firmware.
//!
//! Follows embedded best practice: a single `Error` enum that every subsystem
//! can convert into, keeping the top-level control loop's error handling uniform.
//! All variants are `Copy` so they can be cheaply passed through the health
//! monitor and controller without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The temperature sensor could not be read or returned implausible data.
    Sensor(SensorError),
    /// A health fault forced the fail-safe state.
    Health(HealthFault),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Health(e) => write!(f, "health: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The probe did not answer — divider pegged at a supply rail.
    Disconnected,
    /// The raw reading converts to a physically meaningless temperature.
    ConversionFailed,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "probe disconnected"),
            Self::ConversionFailed => write!(f, "conversion failed"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Health faults
// ---------------------------------------------------------------------------

/// Health faults are a special category: any active fault pins the controller
/// in the `Overheat` fail-safe state with the heater off.  They are
/// accumulated in a bitfield by the health monitor so that simultaneous
/// faults can be tracked and individually cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum HealthFault {
    /// No valid sample for longer than the configured sensor timeout.
    SensorStale = 0b0000_0001,
    /// The last reading (or the retained working temperature) lies outside
    /// the plausible temperature range.
    ReadingOutOfRange = 0b0000_0010,
}

impl HealthFault {
    /// Return the bitmask for this fault.
    pub const fn mask(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for HealthFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SensorStale => write!(f, "sensor stale"),
            Self::ReadingOutOfRange => write!(f, "reading out of range"),
        }
    }
}

impl From<HealthFault> for Error {
    fn from(e: HealthFault) -> Self {
        Self::Health(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

//! Sensor subsystem.
//!
//! A single gateway: the NTC temperature probe.  The gateway produces a
//! [`SensorSample`](crate::health::SensorSample) per poll, or nothing when
//! the probe is unreachable; validation beyond reachability belongs to the
//! health monitor.

pub mod temperature;

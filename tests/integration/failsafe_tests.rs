//! Health-monitor fail-safe paths: staleness, implausible readings, and
//! recovery. Both escalation paths converge on `Overheat` and leave it
//! through the same cooldown guard.

use core::time::Duration;

use heatguard::app::events::AppEvent;
use heatguard::app::service::ControlService;
use heatguard::config::ControlConfig;
use heatguard::error::HealthFault;
use heatguard::fsm::ControlState;
use heatguard::health::SensorSample;

use crate::mock_hw::{MockHardware, RecordingSink};

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

fn sample(temp: f32, at: Duration) -> SensorSample {
    SensorSample {
        temperature_c: temp,
        captured_at: at,
        valid: true,
    }
}

fn fault_events(sink: &RecordingSink) -> (usize, usize) {
    let detected = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::FaultDetected(_)))
        .count();
    let cleared = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::FaultCleared))
        .count();
    (detected, cleared)
}

#[test]
fn staleness_forces_overheat_regardless_of_temperature() {
    let mut svc = ControlService::new(ControlConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    // Healthy sample at a comfortable temperature, inside the band.
    svc.tick(Some(sample(34.0, secs(1))), &mut hw, &mut sink, secs(1));
    assert_eq!(svc.state(), ControlState::Idle);

    // The sensor goes quiet.  Within the 5 s timeout: nothing happens.
    for s in 2..=6 {
        svc.tick(None, &mut hw, &mut sink, secs(s));
        assert_eq!(svc.state(), ControlState::Idle);
    }

    // Past the timeout: fail-safe, despite the last temperature being fine.
    svc.tick(None, &mut hw, &mut sink, secs(7));
    assert_eq!(svc.state(), ControlState::Overheat);
    assert!(!hw.heater);
    assert_eq!(svc.fault_flags() & HealthFault::SensorStale.mask(), HealthFault::SensorStale.mask());

    let (detected, _) = fault_events(&sink);
    assert_eq!(detected, 1);
    assert_eq!(sink.alarm_latches(), 1);
}

#[test]
fn stale_system_stays_in_overheat_until_samples_resume() {
    let mut svc = ControlService::new(ControlConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    svc.tick(Some(sample(20.0, secs(1))), &mut hw, &mut sink, secs(1));
    for s in 2..20 {
        svc.tick(None, &mut hw, &mut sink, secs(s));
    }
    // Cold (20 C, well below the cooldown exit), yet pinned in the
    // fail-safe: the stale sensor means the reading cannot be trusted.
    assert_eq!(svc.state(), ControlState::Overheat);

    // A valid cool sample resumes: fault clears, cooldown guard releases.
    svc.tick(Some(sample(20.0, secs(20))), &mut hw, &mut sink, secs(20));
    assert_eq!(svc.state(), ControlState::Idle);

    let (detected, cleared) = fault_events(&sink);
    assert_eq!((detected, cleared), (1, 1));
}

#[test]
fn implausible_reading_escalates_immediately() {
    let mut svc = ControlService::new(ControlConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    svc.tick(Some(sample(25.0, secs(1))), &mut hw, &mut sink, secs(1));
    assert_eq!(svc.state(), ControlState::Heating);

    // A 300 C reading is physically impossible: fail-safe on the spot,
    // no waiting for the staleness timeout.
    svc.tick(Some(sample(300.0, secs(2))), &mut hw, &mut sink, secs(2));
    assert_eq!(svc.state(), ControlState::Overheat);
    assert!(!hw.heater, "heater off in the same cycle");
    assert_eq!(
        svc.fault_flags() & HealthFault::ReadingOutOfRange.mask(),
        HealthFault::ReadingOutOfRange.mask()
    );
    // The bogus value never became the working temperature.
    assert!((svc.working_temperature_c() - 25.0).abs() < f32::EPSILON);
}

#[test]
fn missing_samples_inside_timeout_are_local_recovery() {
    let mut svc = ControlService::new(ControlConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    svc.tick(Some(sample(30.0, secs(1))), &mut hw, &mut sink, secs(1));
    assert_eq!(svc.state(), ControlState::Heating);

    // Two dropped polls: the working temperature is retained and control
    // carries on undisturbed.
    svc.tick(None, &mut hw, &mut sink, secs(2));
    svc.tick(None, &mut hw, &mut sink, secs(3));
    assert_eq!(svc.state(), ControlState::Heating);
    assert!(hw.heater);
    assert_eq!(svc.fault_flags(), 0);
    assert!((svc.working_temperature_c() - 30.0).abs() < f32::EPSILON);
}

#[test]
fn gateway_flagged_invalid_sample_does_not_escalate() {
    let mut svc = ControlService::new(ControlConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    svc.tick(Some(sample(30.0, secs(1))), &mut hw, &mut sink, secs(1));
    svc.tick(
        Some(SensorSample {
            temperature_c: 31.0,
            captured_at: secs(2),
            valid: false,
        }),
        &mut hw,
        &mut sink,
        secs(2),
    );

    // Discarded quietly; only sustained absence escalates.
    assert_eq!(svc.fault_flags(), 0);
    assert_eq!(svc.state(), ControlState::Heating);
}

#[test]
fn both_failsafe_paths_share_the_recovery_guard() {
    // Path 1: threshold breach.
    let mut svc = ControlService::new(ControlConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    svc.tick(Some(sample(43.0, secs(1))), &mut hw, &mut sink, secs(1));
    assert_eq!(svc.state(), ControlState::Overheat);
    svc.tick(Some(sample(36.5, secs(2))), &mut hw, &mut sink, secs(2));
    assert_eq!(svc.state(), ControlState::Idle);

    // Path 2: health escalation (stale sensor).
    let mut svc = ControlService::new(ControlConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    svc.tick(Some(sample(34.0, secs(1))), &mut hw, &mut sink, secs(1));
    for s in 2..=10 {
        svc.tick(None, &mut hw, &mut sink, secs(s));
    }
    assert_eq!(svc.state(), ControlState::Overheat);
    svc.tick(Some(sample(34.0, secs(11))), &mut hw, &mut sink, secs(11));
    assert_eq!(svc.state(), ControlState::Idle);
}

#[test]
fn hot_and_stale_requires_both_recoveries() {
    let mut svc = ControlService::new(ControlConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    // Overheat by temperature.
    svc.tick(Some(sample(43.0, secs(1))), &mut hw, &mut sink, secs(1));
    assert_eq!(svc.state(), ControlState::Overheat);

    // Sensor dies while overheated.
    for s in 2..15 {
        svc.tick(None, &mut hw, &mut sink, secs(s));
    }
    assert_eq!(svc.state(), ControlState::Overheat);

    // Samples resume but still too hot: the cooldown guard holds.
    svc.tick(Some(sample(39.0, secs(15))), &mut hw, &mut sink, secs(15));
    assert_eq!(svc.state(), ControlState::Overheat);

    // Cool and fresh: released.
    svc.tick(Some(sample(35.0, secs(16))), &mut hw, &mut sink, secs(16));
    assert_eq!(svc.state(), ControlState::Idle);
}

//! End-to-end escalation scenarios driven through the service layer.
//!
//! Each test walks a timed sequence of line levels and asserts both the
//! returned state and the indicator the hardware would actually show.

use crate::mock_hw::{LogSink, MockHardware};

use sentinel::app::service::AppService;
use sentinel::config::SystemConfig;
use sentinel::fsm::AlarmState;

fn make_app(yellow_dwell_ms: u32) -> (AppService, MockHardware, LogSink) {
    let mut config = SystemConfig::default();
    config.yellow_dwell_ms = yellow_dwell_ms;
    let mut app = AppService::new(config);
    let mut hw = MockHardware::new();
    let mut sink = LogSink::new();
    app.start(&mut hw, &mut sink);
    (app, hw, sink)
}

#[test]
fn grace_period_escalation_timeline() {
    let (mut app, mut hw, mut sink) = make_app(500);

    // t=0: alarm trips → Yellow, grace period starts.
    hw.set_lines(true, false);
    assert_eq!(app.tick(0, &mut hw, &mut sink), AlarmState::Yellow);

    // t=200: line quiet again, grace period still running → hold Yellow.
    hw.set_lines(false, false);
    assert_eq!(app.tick(200, &mut hw, &mut sink), AlarmState::Yellow);

    // t=600: 500ms grace period expired → Red.
    assert_eq!(app.tick(600, &mut hw, &mut sink), AlarmState::Red);

    // t=650: operator clears → Green immediately.
    hw.set_lines(false, true);
    assert_eq!(app.tick(650, &mut hw, &mut sink), AlarmState::Green);
}

#[test]
fn clear_during_grace_period_cancels_escalation() {
    let (mut app, mut hw, mut sink) = make_app(500);

    hw.set_lines(true, false);
    assert_eq!(app.tick(0, &mut hw, &mut sink), AlarmState::Yellow);

    // Operator clears well inside the grace period — the dwell is
    // cancelled, not merely paused.
    hw.set_lines(false, true);
    assert_eq!(app.tick(250, &mut hw, &mut sink), AlarmState::Green);

    // Long after the original dwell would have expired, still Green.
    hw.set_lines(false, false);
    assert_eq!(app.tick(2000, &mut hw, &mut sink), AlarmState::Green);
}

#[test]
fn zero_dwell_escalates_in_two_ticks() {
    let (mut app, mut hw, mut sink) = make_app(0);

    hw.set_lines(true, false);
    assert_eq!(app.tick(0, &mut hw, &mut sink), AlarmState::Yellow);
    assert_eq!(app.tick(50, &mut hw, &mut sink), AlarmState::Red);
}

#[test]
fn simultaneous_alarm_and_clear_favours_green() {
    let (mut app, mut hw, mut sink) = make_app(500);

    hw.set_lines(true, false);
    app.tick(0, &mut hw, &mut sink);

    // Operator holds clear while the zone loop is still tripped.
    hw.set_lines(true, true);
    assert_eq!(app.tick(100, &mut hw, &mut sink), AlarmState::Green);

    // Release clear with the alarm still held → a fresh grace period.
    hw.set_lines(true, false);
    assert_eq!(app.tick(200, &mut hw, &mut sink), AlarmState::Yellow);
    assert_eq!(app.tick(400, &mut hw, &mut sink), AlarmState::Yellow);
    assert_eq!(app.tick(750, &mut hw, &mut sink), AlarmState::Red);
}

#[test]
fn indicator_always_matches_returned_state() {
    let (mut app, mut hw, mut sink) = make_app(300);

    // A walk that touches every state, including held and released lines.
    let timeline: &[(u64, bool, bool)] = &[
        (0, false, false),
        (50, true, false),
        (100, true, false),
        (200, false, false),
        (450, false, false), // grace period expires here
        (500, true, false),
        (550, false, true),
        (600, true, true),
        (650, false, false),
    ];

    for &(t, alarm, clear) in timeline {
        hw.set_lines(alarm, clear);
        let state = app.tick(t, &mut hw, &mut sink);
        assert_eq!(
            hw.lit(),
            Some(state),
            "indicator must track the state at t={}",
            t
        );
    }
}

#[test]
fn telemetry_reports_dwell_countdown() {
    let (mut app, mut hw, mut sink) = make_app(500);

    hw.set_lines(true, false);
    app.tick(0, &mut hw, &mut sink);

    let t = app.build_telemetry(200);
    assert_eq!(t.state, AlarmState::Yellow);
    assert_eq!(t.dwell_remaining_ms, 300);
    assert!(t.alarm_line);
}

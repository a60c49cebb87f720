//! Integration tests for the AppService → FSM → indicator pipeline.
//!
//! These run on the host (x86_64) and verify that the full chain from a
//! line-level change or an incoming command down to an indicator call
//! works correctly without any real hardware.

use crate::mock_hw::{IndicatorCall, LogSink, MockHardware, MockNvs};

use sentinel::app::commands::AppCommand;
use sentinel::app::ports::ConfigPort;
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

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_lights_green_and_announces() {
    let (app, hw, sink) = make_app(500);
    assert_eq!(app.state(), AlarmState::Green);
    assert_eq!(hw.lit(), Some(AlarmState::Green));
    assert!(sink.contains("Started(Green)"));
}

// ── Line-driven transitions ───────────────────────────────────

#[test]
fn alarm_line_raises_yellow() {
    let (mut app, mut hw, mut sink) = make_app(500);
    hw.set_lines(true, false);

    let state = app.tick(0, &mut hw, &mut sink);
    assert_eq!(state, AlarmState::Yellow);
    assert_eq!(hw.lit(), Some(AlarmState::Yellow));
    assert!(sink.contains("AlarmRaised"));
}

#[test]
fn clear_line_resets_from_any_state() {
    let (mut app, mut hw, mut sink) = make_app(500);
    hw.set_lines(true, false);
    app.tick(0, &mut hw, &mut sink);
    hw.set_lines(false, false);
    app.tick(600, &mut hw, &mut sink);
    assert_eq!(app.state(), AlarmState::Red);

    hw.set_lines(false, true);
    let state = app.tick(700, &mut hw, &mut sink);
    assert_eq!(state, AlarmState::Green);
    assert_eq!(hw.lit(), Some(AlarmState::Green));
    assert!(sink.contains("AlarmCleared"));
}

#[test]
fn indicator_not_rewritten_while_stable() {
    let (mut app, mut hw, mut sink) = make_app(500);
    let calls_after_start = hw.calls.len();

    for t in 0..20 {
        app.tick(t * 50, &mut hw, &mut sink);
    }
    assert_eq!(
        hw.calls.len(),
        calls_after_start,
        "quiet ticks must not touch the indicator outputs"
    );
}

#[test]
fn escalation_emits_latched_event() {
    let (mut app, mut hw, mut sink) = make_app(500);
    hw.set_lines(true, false);
    app.tick(0, &mut hw, &mut sink);
    hw.set_lines(false, false);
    app.tick(600, &mut hw, &mut sink);

    assert_eq!(app.state(), AlarmState::Red);
    assert!(sink.contains("AlarmLatched"));
    assert_eq!(hw.lit(), Some(AlarmState::Red));
}

// ── Commands ──────────────────────────────────────────────────

#[test]
fn clear_command_acts_like_clear_line() {
    let (mut app, mut hw, mut sink) = make_app(500);
    hw.set_lines(true, false);
    app.tick(0, &mut hw, &mut sink);
    assert_eq!(app.state(), AlarmState::Yellow);

    app.handle_command(AppCommand::ClearAlarm, 100, &mut hw, &mut sink);
    assert_eq!(app.state(), AlarmState::Green);
    assert_eq!(hw.lit(), Some(AlarmState::Green));
}

#[test]
fn clear_command_in_green_is_a_no_op() {
    let (mut app, mut hw, mut sink) = make_app(500);
    let calls_before = hw.calls.len();
    app.handle_command(AppCommand::ClearAlarm, 0, &mut hw, &mut sink);
    assert_eq!(app.state(), AlarmState::Green);
    assert_eq!(hw.calls.len(), calls_before);
}

#[test]
fn force_state_jumps_and_lights() {
    let (mut app, mut hw, mut sink) = make_app(500);
    app.handle_command(
        AppCommand::ForceState(AlarmState::Red),
        0,
        &mut hw,
        &mut sink,
    );
    assert_eq!(app.state(), AlarmState::Red);
    assert_eq!(hw.calls.last(), Some(&IndicatorCall::Set(AlarmState::Red)));
}

#[test]
fn forced_yellow_still_escalates_after_dwell() {
    let (mut app, mut hw, mut sink) = make_app(500);
    app.handle_command(
        AppCommand::ForceState(AlarmState::Yellow),
        1000,
        &mut hw,
        &mut sink,
    );
    app.tick(1100, &mut hw, &mut sink);
    assert_eq!(app.state(), AlarmState::Yellow);
    app.tick(1600, &mut hw, &mut sink);
    assert_eq!(app.state(), AlarmState::Red);
}

// ── Config management ─────────────────────────────────────────

#[test]
fn update_config_marks_config_dirty() {
    let (mut app, mut hw, mut sink) = make_app(500);
    assert!(!app.is_config_dirty(), "should not be dirty on start");

    let mut new_cfg = SystemConfig::default();
    new_cfg.yellow_dwell_ms = 2000;
    app.handle_command(AppCommand::UpdateConfig(new_cfg), 0, &mut hw, &mut sink);

    assert!(app.is_config_dirty());
    assert_eq!(app.current_config().yellow_dwell_ms, 2000);
}

#[test]
fn update_config_applies_new_dwell_to_next_alarm() {
    let (mut app, mut hw, mut sink) = make_app(500);
    let mut new_cfg = SystemConfig::default();
    new_cfg.yellow_dwell_ms = 2000;
    app.handle_command(AppCommand::UpdateConfig(new_cfg), 0, &mut hw, &mut sink);

    hw.set_lines(true, false);
    app.tick(100, &mut hw, &mut sink);
    assert_eq!(app.state(), AlarmState::Yellow);

    // Old dwell (500ms) would have escalated by now; the new one holds.
    hw.set_lines(false, false);
    app.tick(1000, &mut hw, &mut sink);
    assert_eq!(app.state(), AlarmState::Yellow);
    app.tick(2200, &mut hw, &mut sink);
    assert_eq!(app.state(), AlarmState::Red);
}

#[test]
fn auto_save_flushes_after_debounce() {
    // Default config: 50ms ticks → 5s debounce is 100 ticks.
    let (mut app, mut hw, mut sink) = make_app(500);
    let nvs = MockNvs::new();

    let mut cfg = SystemConfig::default();
    cfg.yellow_dwell_ms = 750;
    app.handle_command(AppCommand::UpdateConfig(cfg), 0, &mut hw, &mut sink);

    assert!(!app.auto_save_if_needed(&nvs), "must debounce, not save at once");
    assert_eq!(nvs.save_count(), 0);

    for t in 0..120u64 {
        app.tick(t * 50, &mut hw, &mut sink);
    }
    assert!(app.auto_save_if_needed(&nvs));
    assert_eq!(nvs.save_count(), 1);
    assert!(!app.is_config_dirty());
    assert_eq!(nvs.load().unwrap().yellow_dwell_ms, 750);
}

//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the [`AlarmFsm`] and the live configuration and
//! runs the per-tick pipeline: sample the lines, advance the FSM, and
//! touch the indicator only when a new state was entered.  Every port is
//! injected at the call site, so the whole service runs against mocks.
//!
//! ```text
//!  InputPort ────▶ ┌────────────────────────┐ ──▶ EventSink
//!                  │       AppService        │
//!  IndicatorPort ◀─│  AlarmFsm · config      │
//!                  └────────────────────────┘
//! ```

use log::{info, warn};

use crate::config::SystemConfig;
use crate::fsm::{AlarmFsm, AlarmState, InputSymbol, TransitionTable};

use super::commands::AppCommand;
use super::events::{AppEvent, TelemetryData};
use super::ports::{ConfigPort, EventSink, IndicatorPort, InputPort};

/// Config changes sit in RAM this long before the auto-save flushes
/// them, so a burst of updates costs one flash write.
const AUTO_SAVE_DEBOUNCE_MS: u64 = 5_000;

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// Orchestrates the alarm FSM against the injected ports.
pub struct AppService {
    fsm: AlarmFsm,
    config: SystemConfig,
    tick_count: u64,
    /// Line levels sampled on the most recent tick, kept for telemetry.
    last_alarm_line: bool,
    last_clear_line: bool,
    config_dirty: bool,
    dirty_since_tick: u64,
}

impl AppService {
    /// Build the service around `config`.  The indicator stays dark
    /// until [`Self::start`] runs.
    pub fn new(config: SystemConfig) -> Self {
        let table = TransitionTable::new(u64::from(config.yellow_dwell_ms));

        Self {
            fsm: AlarmFsm::new(table),
            config,
            tick_count: 0,
            last_alarm_line: false,
            last_clear_line: false,
            config_dirty: false,
            dirty_since_tick: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Light the indicator for the initial state and announce startup.
    pub fn start(&mut self, hw: &mut impl IndicatorPort, sink: &mut impl EventSink) {
        hw.set_indicator(self.fsm.state());
        sink.emit(&AppEvent::Started(self.fsm.state()));
        info!("AppService started in {:?}", self.fsm.state());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// One full control cycle: sample lines → FSM → indicator.
    ///
    /// `hw` satisfies **both** [`InputPort`] and [`IndicatorPort`], which
    /// keeps the port boundary explicit without a double mutable borrow.
    /// Returns the (possibly unchanged) current state.
    pub fn tick(
        &mut self,
        now_ms: u64,
        hw: &mut (impl InputPort + IndicatorPort),
        sink: &mut impl EventSink,
    ) -> AlarmState {
        self.tick_count += 1;
        let prev_state = self.fsm.state();

        self.last_alarm_line = hw.read_alarm_line();
        self.last_clear_line = hw.read_clear_line();
        let symbol = InputSymbol::from_lines(self.last_alarm_line, self.last_clear_line);

        let state = self.fsm.tick(symbol, now_ms);

        // Indicator and events fire on entry only, never on a quiet tick.
        if self.fsm.just_entered() {
            hw.set_indicator(state);
            self.emit_transition(prev_state, state, sink);
        }

        state
    }

    // ── Command handling ──────────────────────────────────────

    /// Act on a command from the outside world (serial console, panel bus).
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        now_ms: u64,
        hw: &mut impl IndicatorPort,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            AppCommand::ClearAlarm => {
                // Same path as a physical clear-line assertion.
                let prev = self.fsm.state();
                let state = self.fsm.tick(InputSymbol::Clear, now_ms);
                if self.fsm.just_entered() {
                    hw.set_indicator(state);
                    self.emit_transition(prev, state, sink);
                }
            }
            AppCommand::ForceState(target) => {
                let prev = self.fsm.state();
                self.fsm.force(target, now_ms);
                if self.fsm.just_entered() {
                    hw.set_indicator(target);
                    self.emit_transition(prev, target, sink);
                }
            }
            AppCommand::UpdateConfig(new_config) => {
                self.mark_config_dirty();
                self.fsm
                    .set_table(TransitionTable::new(u64::from(new_config.yellow_dwell_ms)));
                self.config = new_config;
                info!("configuration updated at runtime");
            }
            AppCommand::SaveConfig => {
                // Backdate the dirty epoch so the next auto-save check
                // flushes without waiting out the debounce.
                self.config_dirty = true;
                self.dirty_since_tick = 0;
                info!("config save requested, flushing on next auto-save check");
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Telemetry snapshot of the current context.
    pub fn build_telemetry(&self, now_ms: u64) -> TelemetryData {
        TelemetryData {
            state: self.fsm.state(),
            alarm_line: self.last_alarm_line,
            clear_line: self.last_clear_line,
            dwell_remaining_ms: self.fsm.dwell_remaining_ms(now_ms),
            tick_count: self.tick_count,
        }
    }

    /// Current FSM state.
    pub fn state(&self) -> AlarmState {
        self.fsm.state()
    }

    /// Control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Clone of the live configuration.
    pub fn current_config(&self) -> SystemConfig {
        self.config.clone()
    }

    // ── Internal ──────────────────────────────────────────────

    fn emit_transition(&self, from: AlarmState, to: AlarmState, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::StateChanged { from, to });
        match to {
            AlarmState::Yellow => sink.emit(&AppEvent::AlarmRaised {
                dwell_ms: u64::from(self.config.yellow_dwell_ms),
            }),
            AlarmState::Red => sink.emit(&AppEvent::AlarmLatched),
            AlarmState::Green => sink.emit(&AppEvent::AlarmCleared { from }),
        }
    }

    // ── Config dirty-flag management ──────────────────────────

    /// Note an in-RAM config change; the auto-save picks it up later.
    pub fn mark_config_dirty(&mut self) {
        if !self.config_dirty {
            self.config_dirty = true;
            self.dirty_since_tick = self.tick_count;
        }
    }

    /// Flush a dirty config once it has been stable for the debounce
    /// window.  Returns `true` when a save actually happened.
    pub fn auto_save_if_needed(&mut self, storage: &impl ConfigPort) -> bool {
        if !self.config_dirty {
            return false;
        }
        let ticks = self.tick_count.saturating_sub(self.dirty_since_tick);
        let elapsed_ms = ticks.saturating_mul(u64::from(self.config.control_loop_interval_ms));
        if elapsed_ms < AUTO_SAVE_DEBOUNCE_MS {
            return false;
        }
        match storage.save(&self.config) {
            Ok(()) => {
                self.config_dirty = false;
                info!("config auto-saved");
                true
            }
            Err(e) => {
                warn!("config auto-save failed: {}", e);
                false
            }
        }
    }

    /// Whether the config has unsaved changes.
    pub fn is_config_dirty(&self) -> bool {
        self.config_dirty
    }
}

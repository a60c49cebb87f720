//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the two [`LineInput`] drivers and the [`IndicatorLeds`] bank,
//! exposing them through [`InputPort`] and [`IndicatorPort`].  This is
//! the only module in the system that touches actual hardware.  On
//! non-espidf targets, the underlying drivers use cfg-gated simulation
//! stubs.

use crate::app::ports::{IndicatorPort, InputPort};
use crate::drivers::indicator_led::IndicatorLeds;
use crate::drivers::line_input::LineInput;
use crate::fsm::AlarmState;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    alarm_line: LineInput,
    clear_line: LineInput,
    leds: IndicatorLeds,
}

impl HardwareAdapter {
    pub fn new(alarm_line: LineInput, clear_line: LineInput, leds: IndicatorLeds) -> Self {
        Self {
            alarm_line,
            clear_line,
            leds,
        }
    }
}

// ── InputPort implementation ──────────────────────────────────

impl InputPort for HardwareAdapter {
    fn read_alarm_line(&mut self) -> bool {
        self.alarm_line.is_asserted()
    }

    fn read_clear_line(&mut self) -> bool {
        self.clear_line.is_asserted()
    }
}

// ── IndicatorPort implementation ──────────────────────────────

impl IndicatorPort for HardwareAdapter {
    fn set_indicator(&mut self, state: AlarmState) {
        self.leds.set(state);
    }

    fn all_off(&mut self) {
        self.leds.off();
    }
}

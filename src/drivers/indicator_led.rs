//! Indicator LED bank driver.
//!
//! Three discrete LEDs, one per controller state.  `set()` asserts
//! exactly one and clears the other two in a single call, so the bank can
//! never show a mixed indication.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives three GPIO outputs via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::fsm::AlarmState;
use crate::pins;

pub struct IndicatorLeds {
    lit: Option<AlarmState>,
}

impl IndicatorLeds {
    pub fn new() -> Self {
        Self { lit: None }
    }

    /// Light the LED for `state`, extinguishing the other two.
    pub fn set(&mut self, state: AlarmState) {
        hw_init::gpio_write(pins::LED_GREEN_GPIO, state == AlarmState::Green);
        hw_init::gpio_write(pins::LED_YELLOW_GPIO, state == AlarmState::Yellow);
        hw_init::gpio_write(pins::LED_RED_GPIO, state == AlarmState::Red);
        self.lit = Some(state);
    }

    pub fn off(&mut self) {
        hw_init::gpio_write(pins::LED_GREEN_GPIO, false);
        hw_init::gpio_write(pins::LED_YELLOW_GPIO, false);
        hw_init::gpio_write(pins::LED_RED_GPIO, false);
        self.lit = None;
    }

    /// Which LED is currently lit (None after `off`).
    pub fn lit(&self) -> Option<AlarmState> {
        self.lit
    }
}

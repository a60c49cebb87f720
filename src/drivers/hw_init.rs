//! One-shot GPIO bring-up for the annunciator board.
//!
//! The two sensor lines become pulled-up inputs and the three indicator
//! LEDs push-pull outputs, all via raw ESP-IDF sys calls.  Runs once from
//! `main()` before the control loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
        }
    }
}

// ── Bring-up ──────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: runs once from main() before the control loop; nothing else
    // touches the GPIO matrix yet.
    unsafe {
        for pin in [pins::ALARM_GPIO, pins::CLEAR_GPIO] {
            configure_pin(pin, gpio_mode_t_GPIO_MODE_INPUT, true)?;
        }
        for pin in [
            pins::LED_GREEN_GPIO,
            pins::LED_YELLOW_GPIO,
            pins::LED_RED_GPIO,
        ] {
            configure_pin(pin, gpio_mode_t_GPIO_MODE_OUTPUT, false)?;
            gpio_set_level(pin, 0);
        }
    }
    info!("hw_init: 2 sensor lines + 3 indicator outputs configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

/// Program one pin's direction and pull.  Inputs get the internal
/// pull-up (the lines idle high and are pulled to ground when the
/// contact closes); outputs are plain push-pull.
#[cfg(target_os = "espidf")]
unsafe fn configure_pin(pin: i32, mode: gpio_mode_t, pull_up: bool) -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode,
        pull_up_en: if pull_up {
            gpio_pullup_t_GPIO_PULLUP_ENABLE
        } else {
            gpio_pullup_t_GPIO_PULLUP_DISABLE
        },
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let rc = unsafe { gpio_config(&cfg) };
    if rc == ESP_OK as i32 {
        Ok(())
    } else {
        Err(HwInitError::GpioConfigFailed(rc))
    }
}

// ── Level shims ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: read-only register access on a pin configured as input.
    (unsafe { gpio_get_level(pin) }) != 0
}

/// Host stub: lines read high, i.e. released for active-low wiring.
#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: the pin was configured as an output during bring-up.
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

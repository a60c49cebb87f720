//! GPIO pin assignments for the Sentinel annunciator board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Sensor inputs (level-triggered, debounced upstream by the line conditioner)
// ---------------------------------------------------------------------------

/// Alarm trigger line from the zone loop. Active LOW with external pull-up.
pub const ALARM_GPIO: i32 = 4;
/// Clear/reset line from the operator panel. Active LOW with external pull-up.
pub const CLEAR_GPIO: i32 = 5;

/// Both input lines are wired active-low (closed contact pulls to ground).
pub const LINES_ACTIVE_LOW: bool = true;

// ---------------------------------------------------------------------------
// Indicator outputs (discrete LEDs, driven HIGH through series resistors)
// ---------------------------------------------------------------------------

/// Green "cleared / armed-idle" indicator.
pub const LED_GREEN_GPIO: i32 = 11;
/// Yellow "alarm detected, grace period" indicator.
pub const LED_YELLOW_GPIO: i32 = 12;
/// Red "alarm confirmed / latched" indicator.
pub const LED_RED_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// UART debug
// ---------------------------------------------------------------------------

pub const UART_TX_GPIO: i32 = 17;
pub const UART_RX_GPIO: i32 = 18;

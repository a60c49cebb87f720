//! Port traits: the seam between the annunciator core and its peripherals.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! The [`AppService`](super::service::AppService) takes these traits as
//! generic parameters, so every test in the crate can stand in a mock
//! where production wires up GPIO, flash, and the serial log.

use crate::config::SystemConfig;
use crate::fsm::AlarmState;

// ───────────────────────────────────────────────────────────────
// Input port (sensor lines → domain)
// ───────────────────────────────────────────────────────────────

/// Level reads of the two binary sensor lines.
///
/// An adapter returns `true` for an asserted line regardless of the
/// electrical polarity, and the levels arrive already debounced — the
/// domain does no edge detection of its own.
pub trait InputPort {
    /// Current level of the alarm trigger line.
    fn read_alarm_line(&mut self) -> bool;

    /// Current level of the clear/reset line.
    fn read_clear_line(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Indicator port (domain → indicator LEDs)
// ───────────────────────────────────────────────────────────────

/// Drives the three mutually exclusive state indicators.
pub trait IndicatorPort {
    /// Assert the single indicator matching `state`, clearing the others.
    fn set_indicator(&mut self, state: AlarmState);

    /// All indicators off — shutdown paths only.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// Receives the structured [`AppEvent`](super::events::AppEvent)s the
/// domain emits.  Where they end up (serial log, panel bus) is the
/// adapter's business.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists the system configuration.
///
/// `save` implementations range-check every field first and refuse
/// out-of-range values with [`ConfigError::ValidationFailed`]; nothing
/// is clamped on the way to storage.
pub trait ConfigPort {
    fn load(&self) -> Result<SystemConfig, ConfigError>;

    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Failure modes of [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Nothing stored yet (first boot or erased partition).
    NotFound,
    /// The stored blob would not decode, or decoded to impossible values.
    Corrupted,
    /// A field was outside its permitted range; the message names it.
    ValidationFailed(&'static str),
    /// The storage partition has no room left.
    StorageFull,
    /// Any other failure from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "no stored config"),
            Self::Corrupted => write!(f, "stored config unreadable"),
            Self::ValidationFailed(which) => write!(f, "config rejected: {}", which),
            Self::StorageFull => write!(f, "config storage full"),
            Self::IoError => write!(f, "config storage I/O failure"),
        }
    }
}

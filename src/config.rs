//! Tunable system parameters.
//!
//! [`SystemConfig`] carries every knob an installer can turn.  Defaults
//! are the shipping values; NVS overrides them at boot and runtime
//! updates arrive through `AppCommand::UpdateConfig`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Alarm escalation ---
    /// Grace period in the yellow state before escalation to red
    /// (milliseconds). 0 disables the grace period entirely.
    pub yellow_dwell_ms: u32,

    // --- Timing ---
    /// Control loop polling interval (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Telemetry report interval (seconds)
    pub telemetry_interval_secs: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            yellow_dwell_ms: 5000,

            control_loop_interval_ms: 50, // 20 Hz
            telemetry_interval_secs: 60,  // 1/min
        }
    }
}

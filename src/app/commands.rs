//! Inbound commands.
//!
//! Requests from the outside world — a serial console or a remote panel —
//! that the [`AppService`](super::service::AppService) interprets.

use crate::config::SystemConfig;
use crate::fsm::AlarmState;

#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Software clear, equivalent to asserting the clear line for one
    /// tick (an acknowledge from a remote panel, say).
    ClearAlarm,

    /// Jump the FSM to a specific state (debug / commissioning only).
    ForceState(AlarmState),

    /// Hot-reload configuration (freshly written NVS values).
    UpdateConfig(SystemConfig),

    /// Persist the current config without waiting for the auto-save.
    SaveConfig,
}

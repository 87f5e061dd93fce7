//! Inbound commands to the application service.
//!
//! Manual overrides requested by the outside world (serial console,
//! button, tests) that the [`AppService`](super::service::AppService)
//! applies outside the regular control cycle.

use crate::config::SystemConfig;
use crate::drivers::gate::GateStatus;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Drive the gate to a specific status.
    SetGate(GateStatus),

    /// Flip the gate.
    ToggleGate,

    /// Hot-reload configuration.  Rejected unless it validates.
    UpdateConfig(SystemConfig),
}

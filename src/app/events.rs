//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log to serial, collect in a test.

use crate::drivers::gate::GateStatus;
use crate::error::SensorError;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started (carries the initial gate status).
    Started(GateStatus),

    /// A temperature conversion is about to be requested.
    Requesting,

    /// The gate moved between states.
    GateChanged { from: GateStatus, to: GateStatus },

    /// The reading was classified as a sensor fault.
    SensorFault { raw_c: f32, error: SensorError },

    /// End-of-cycle report: current gate status and the temperature read.
    Cycle(CycleReport),
}

/// What one control cycle saw and did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    /// Temperature as returned by the sensor (sentinel included).
    pub temperature_c: f32,
    /// Gate status after the cycle.
    pub status: GateStatus,
    /// Whether the gate was moved this cycle.
    pub action: crate::control::hysteresis::GateAction,
    /// Whether the reading was flagged as a sensor fault.
    pub sensor_fault: bool,
}

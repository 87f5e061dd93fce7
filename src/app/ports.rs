//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (temperature sensor, gate pins, event sinks) implement
//! these traits.  The [`AppService`](super::service::AppService) and the
//! [`GateManipulator`](crate::drivers::gate::GateManipulator) consume them
//! via generics, so the domain core never touches hardware directly.

use embedded_hal::digital::PinState;

use crate::error::ActuatorError;

// ───────────────────────────────────────────────────────────────
// Temperature port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per control cycle.
pub trait TemperaturePort {
    /// Blocking read of the configured device, in °C.
    ///
    /// A failed read yields the bus driver's sentinel value
    /// ([`DEVICE_DISCONNECTED_C`](crate::sensors::temperature::DEVICE_DISCONNECTED_C))
    /// rather than an error; classification happens in the domain.
    fn read_temperature(&mut self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Gate pin port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// The two output lines of the gate driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePin {
    /// Energised to drive the gate open.
    Open,
    /// Energised to drive the gate closed.
    Close,
}

/// Write-side port: drive one gate line to a level.
pub trait GatePins {
    fn set(&mut self, pin: GatePin, level: PinState) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log, tests).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

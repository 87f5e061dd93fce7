//! Application core: pure domain logic, zero I/O.
//!
//! Contains the control cycle for the Thermogate system: sensor fault
//! supervision, the hysteresis decision, and gate actuation.  All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;

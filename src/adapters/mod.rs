//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements | Connects to              |
//! |------------|------------|--------------------------|
//! | `hardware` | GatePins   | embedded-hal output pins |
//! | `log_sink` | EventSink  | Serial log output        |
//!
//! The temperature side (`TemperaturePort`) is implemented directly by
//! [`TemperatureSensor`](crate::sensors::temperature::TemperatureSensor).

pub mod hardware;
pub mod log_sink;

//! Actuator and bus drivers.

pub mod ds18b20;
pub mod gate;
pub mod onewire;

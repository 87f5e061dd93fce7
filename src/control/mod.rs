//! Control policies.

pub mod hysteresis;

//! Two-threshold (hysteresis) gate controller
//!
//! ```text
//!   Closed ──[t > high]──▶ Open
//!     ▲                     │
//!     └──────[t < low]──────┘
//! ```
//!
//! Inside the dead band `[low, high]` the gate holds whatever state it is
//! in, so a temperature hovering near one threshold cannot make it chatter.

use crate::config::SystemConfig;
use crate::drivers::gate::GateStatus;

/// What the controller wants done with the gate this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateAction {
    Open,
    Close,
    Hold,
}

/// Hysteresis controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HysteresisPolicy {
    low_c: f32,
    high_c: f32,
}

impl HysteresisPolicy {
    pub fn new(low_c: f32, high_c: f32) -> Self {
        debug_assert!(low_c < high_c, "dead band must not be empty");
        Self { low_c, high_c }
    }

    pub fn from_config(config: &SystemConfig) -> Self {
        Self::new(config.low_threshold_c, config.high_threshold_c)
    }

    /// Decide the action for temperature `t` given the current gate status
    pub fn decide(&self, t: f32, status: GateStatus) -> GateAction {
        match status {
            GateStatus::Open if t < self.low_c => GateAction::Close,
            GateStatus::Closed if t > self.high_c => GateAction::Open,
            _ => GateAction::Hold,
        }
    }

    pub fn low_c(&self) -> f32 {
        self.low_c
    }

    pub fn high_c(&self) -> f32 {
        self.high_c
    }
}

impl Default for HysteresisPolicy {
    fn default() -> Self {
        Self::from_config(&SystemConfig::default())
    }
}

//! Two-pin gate actuator driver.
//!
//! One output line energises the "open" side of the gate driver, the other
//! the "close" side.  Exactly one line is HIGH at any time.  On every
//! change the active line is de-energised **before** the other is
//! energised, so the driver never sees both sides on at once.
//!
//! ## Safety contract
//!
//! If the active line cannot be lowered the transition is abandoned: the
//! other line is never raised and the status does not change.  A failed
//! write to the newly energised line is only logged; both lines are low
//! and the status follows the command, since there is no position feedback.

use core::fmt;

use embedded_hal::digital::PinState;
use log::{info, warn};

use crate::app::ports::{GatePin, GatePins};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateStatus {
    Open,
    Closed,
}

impl GateStatus {
    /// Human-readable name used on the serial log.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    /// The status reached by toggling from `self`.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }
}

impl fmt::Display for GateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Owns both gate lines and the commanded status.
pub struct GateManipulator<P: GatePins> {
    pins: P,
    status: GateStatus,
}

impl<P: GatePins> GateManipulator<P> {
    /// Take ownership of the gate lines and drive the gate closed.
    pub fn new(pins: P) -> Self {
        let mut gate = Self {
            pins,
            status: GateStatus::Closed,
        };
        gate.close();
        gate
    }

    pub fn open(&mut self) {
        if self.transit_power(GatePin::Close, GatePin::Open) {
            self.status = GateStatus::Open;
        }
    }

    pub fn close(&mut self) {
        if self.transit_power(GatePin::Open, GatePin::Close) {
            self.status = GateStatus::Closed;
        }
    }

    /// Drive the gate to `status`.  Re-asserts the pattern if already there.
    pub fn set(&mut self, status: GateStatus) {
        match status {
            GateStatus::Open => self.open(),
            GateStatus::Closed => self.close(),
        }
    }

    pub fn toggle(&mut self) {
        match self.status {
            GateStatus::Open => self.close(),
            GateStatus::Closed => self.open(),
        }
    }

    pub fn status(&self) -> GateStatus {
        self.status
    }

    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }

    /// Borrow the pin adapter (used by tests to inspect line levels).
    pub fn pins(&self) -> &P {
        &self.pins
    }

    /// Lower `from`, then raise `to`.  Returns `false` without touching
    /// `to` when `from` could not be lowered.
    fn transit_power(&mut self, from: GatePin, to: GatePin) -> bool {
        if !self.write(from, PinState::Low) {
            warn!("gate: {:?} line still energised, {:?} line left off", from, to);
            return false;
        }
        if self.write(to, PinState::High) {
            info!("gate: {:?} line energised", to);
        }
        true
    }

    fn write(&mut self, pin: GatePin, level: PinState) -> bool {
        match self.pins.set(pin, level) {
            Ok(()) => true,
            Err(e) => {
                warn!("gate: {:?} line write {:?} failed: {}", pin, level, e);
                false
            }
        }
    }
}

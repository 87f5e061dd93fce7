//! Hardware adapter: bridges real output pins to the [`GatePins`] port.
//!
//! Generic over any embedded-hal [`OutputPin`], so the same adapter wraps
//! `esp-idf-hal` `PinDriver`s on the board and plain mocks on the host.

use embedded_hal::digital::{OutputPin, PinState};

use crate::app::ports::{GatePin, GatePins};
use crate::error::ActuatorError;

/// Concrete adapter owning the two gate lines.
pub struct GatePinPair<O, C> {
    open: O,
    close: C,
}

impl<O, C> GatePinPair<O, C>
where
    O: OutputPin,
    C: OutputPin,
{
    pub fn new(open: O, close: C) -> Self {
        Self { open, close }
    }

    /// Give the pins back (e.g. to inspect mock state in tests).
    pub fn release(self) -> (O, C) {
        (self.open, self.close)
    }
}

impl<O, C> GatePins for GatePinPair<O, C>
where
    O: OutputPin,
    C: OutputPin,
{
    fn set(&mut self, pin: GatePin, level: PinState) -> Result<(), ActuatorError> {
        let written = match pin {
            GatePin::Open => self.open.set_state(level).is_ok(),
            GatePin::Close => self.close.set_state(level).is_ok(),
        };
        if written {
            Ok(())
        } else {
            Err(ActuatorError::GpioWriteFailed)
        }
    }
}

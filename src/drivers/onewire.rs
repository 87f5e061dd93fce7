//! Bit-banged one-wire bus master.
//!
//! Drives a single open-drain GPIO with standard-speed timing:
//!
//! ```text
//!  reset    ▔▔▁▁▁▁▁▁▁▁(480µs)▁▁▁▔▔▔(70µs)┆presence┆▔▔▔(410µs)▔▔
//!  write 1  ▔▔▁(6µs)▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔(64µs)▔▔
//!  write 0  ▔▔▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁▁(60µs)▁▁▁▁▁▔▔(10µs)▔▔
//!  read     ▔▔▁(6µs)▔(9µs)┆sample┆▔▔▔▔▔▔▔▔▔▔(55µs)▔▔
//! ```
//!
//! The pin must be configured open-drain with a pull-up: `set_high`
//! releases the line, `set_low` pulls it down.  Bytes go LSB first.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: an `esp-idf-hal` `PinDriver` in input/output open-drain mode
//! with `Ets` busy-wait delays.  On host/test: any mock implementing the
//! embedded-hal traits.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use heapless::Vec;
use log::warn;

/// 64-bit device address: family code, 48-bit serial, CRC-8.
pub type RomCode = [u8; 8];

/// Maximum number of devices tracked on one bus.
pub const MAX_DEVICES: usize = 8;

pub const CMD_SEARCH_ROM: u8 = 0xF0;
pub const CMD_MATCH_ROM: u8 = 0x55;
pub const CMD_SKIP_ROM: u8 = 0xCC;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OneWireError {
    /// No device answered the reset pulse.
    NoPresence,
    /// A search slot read 1/1: nothing drove the line.
    NoResponse,
    /// ROM or scratchpad CRC-8 did not verify.
    CrcMismatch,
    /// No device is known at the requested index.
    NoDevice,
    /// The line did not release within the expected time.
    Timeout,
    /// The GPIO layer reported an error.
    Pin,
}

impl core::fmt::Display for OneWireError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoPresence => write!(f, "no presence pulse"),
            Self::NoResponse => write!(f, "no device responded during search"),
            Self::CrcMismatch => write!(f, "CRC mismatch"),
            Self::NoDevice => write!(f, "no device at index"),
            Self::Timeout => write!(f, "bus timeout"),
            Self::Pin => write!(f, "GPIO error"),
        }
    }
}

/// Dallas/Maxim CRC-8 (polynomial x^8 + x^5 + x^4 + 1, reflected 0x8C).
///
/// Running it over a full ROM code or scratchpad including the trailing
/// CRC byte yields 0 when the data is intact.
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &b in data {
        let mut byte = b;
        for _ in 0..8 {
            let mix = (crc ^ byte) & 0x01;
            crc >>= 1;
            if mix != 0 {
                crc ^= 0x8C;
            }
            byte >>= 1;
        }
    }
    crc
}

pub struct OneWire<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> OneWire<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// Take the pin and release the line.
    pub fn new(pin: P, delay: D) -> Result<Self, OneWireError> {
        let mut bus = Self { pin, delay };
        bus.release()?;
        Ok(bus)
    }

    /// Issue a reset pulse.  Returns `true` if at least one device
    /// answered with a presence pulse.
    pub fn reset(&mut self) -> Result<bool, OneWireError> {
        self.pull_low()?;
        self.delay.delay_us(480);
        self.release()?;
        self.delay.delay_us(70);
        let presence = self.pin.is_low().map_err(|_| OneWireError::Pin)?;
        self.delay.delay_us(410);
        Ok(presence)
    }

    /// Reset and require a presence pulse.
    pub fn reset_expect_presence(&mut self) -> Result<(), OneWireError> {
        if self.reset()? {
            Ok(())
        } else {
            Err(OneWireError::NoPresence)
        }
    }

    pub fn write_bit(&mut self, bit: bool) -> Result<(), OneWireError> {
        self.pull_low()?;
        if bit {
            self.delay.delay_us(6);
            self.release()?;
            self.delay.delay_us(64);
        } else {
            self.delay.delay_us(60);
            self.release()?;
            self.delay.delay_us(10);
        }
        Ok(())
    }

    pub fn read_bit(&mut self) -> Result<bool, OneWireError> {
        self.pull_low()?;
        self.delay.delay_us(6);
        self.release()?;
        self.delay.delay_us(9);
        let bit = self.pin.is_high().map_err(|_| OneWireError::Pin)?;
        self.delay.delay_us(55);
        Ok(bit)
    }

    pub fn write_byte(&mut self, byte: u8) -> Result<(), OneWireError> {
        for i in 0..8 {
            self.write_bit(byte & (1 << i) != 0)?;
        }
        Ok(())
    }

    pub fn read_byte(&mut self) -> Result<u8, OneWireError> {
        let mut byte = 0u8;
        for i in 0..8 {
            if self.read_bit()? {
                byte |= 1 << i;
            }
        }
        Ok(byte)
    }

    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), OneWireError> {
        for b in buf.iter_mut() {
            *b = self.read_byte()?;
        }
        Ok(())
    }

    /// Reset, then address every device at once.
    pub fn skip_rom(&mut self) -> Result<(), OneWireError> {
        self.reset_expect_presence()?;
        self.write_byte(CMD_SKIP_ROM)
    }

    /// Reset, then address the single device with `rom`.
    pub fn match_rom(&mut self, rom: &RomCode) -> Result<(), OneWireError> {
        self.reset_expect_presence()?;
        self.write_byte(CMD_MATCH_ROM)?;
        for &b in rom {
            self.write_byte(b)?;
        }
        Ok(())
    }

    /// Enumerate every device on the bus (Maxim binary-tree search).
    ///
    /// Returns an empty list when nobody answers the reset.  Stops early
    /// (keeping what it found) once [`MAX_DEVICES`] codes are collected.
    pub fn search(&mut self) -> Result<Vec<RomCode, MAX_DEVICES>, OneWireError> {
        let mut found = Vec::new();
        let mut rom: RomCode = [0; 8];
        let mut last_discrepancy = 0u8;

        loop {
            if !self.reset()? {
                return Ok(found);
            }
            self.write_byte(CMD_SEARCH_ROM)?;

            let mut last_zero = 0u8;
            for bit_number in 1..=64u8 {
                let id_bit = self.read_bit()?;
                let cmp_bit = self.read_bit()?;
                if id_bit && cmp_bit {
                    return Err(OneWireError::NoResponse);
                }

                let byte = usize::from((bit_number - 1) / 8);
                let mask = 1u8 << ((bit_number - 1) % 8);
                let direction = if id_bit == cmp_bit {
                    // Discrepancy: devices disagree on this bit.
                    let dir = if bit_number < last_discrepancy {
                        rom[byte] & mask != 0
                    } else {
                        bit_number == last_discrepancy
                    };
                    if !dir {
                        last_zero = bit_number;
                    }
                    dir
                } else {
                    id_bit
                };

                if direction {
                    rom[byte] |= mask;
                } else {
                    rom[byte] &= !mask;
                }
                self.write_bit(direction)?;
            }

            if crc8(&rom) != 0 {
                return Err(OneWireError::CrcMismatch);
            }
            if found.push(rom).is_err() {
                warn!("onewire: more than {} devices, ignoring the rest", MAX_DEVICES);
                return Ok(found);
            }

            last_discrepancy = last_zero;
            if last_discrepancy == 0 {
                return Ok(found);
            }
        }
    }

    /// Poll read slots until the line reads 1 or `timeout_ms` elapses.
    /// Devices hold the line low while busy (e.g. converting).
    pub fn wait_released(&mut self, timeout_ms: u32, poll_ms: u32) -> Result<(), OneWireError> {
        let poll_ms = poll_ms.max(1);
        let mut waited = 0;
        loop {
            if self.read_bit()? {
                return Ok(());
            }
            if waited >= timeout_ms {
                return Err(OneWireError::Timeout);
            }
            self.delay.delay_ms(poll_ms);
            waited += poll_ms;
        }
    }

    fn pull_low(&mut self) -> Result<(), OneWireError> {
        self.pin.set_low().map_err(|_| OneWireError::Pin)
    }

    fn release(&mut self) -> Result<(), OneWireError> {
        self.pin.set_high().map_err(|_| OneWireError::Pin)
    }
}

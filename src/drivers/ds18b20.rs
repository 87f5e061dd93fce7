//! DS18B20 digital thermometer driver on top of [`OneWire`].
//!
//! Discovery runs once at construction and again whenever the requested
//! index is not known (hot-plugged sensor).  Conversions are broadcast to
//! every device with Skip ROM; reads address one device with Match ROM.
//!
//! Every failure collapses to [`DEVICE_DISCONNECTED_C`], the same sentinel
//! the common one-wire temperature libraries report.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use heapless::Vec;
use log::{info, warn};

use super::onewire::{MAX_DEVICES, OneWire, OneWireError, RomCode, crc8};
use crate::sensors::temperature::{DEVICE_DISCONNECTED_C, TemperatureBus};

/// DS18B20 family code (first ROM byte).
pub const FAMILY_CODE: u8 = 0x28;

const CMD_CONVERT_T: u8 = 0x44;
const CMD_READ_SCRATCHPAD: u8 = 0xBE;

/// Worst-case conversion time at 12-bit resolution.
const CONVERSION_TIMEOUT_MS: u32 = 750;
const CONVERSION_POLL_MS: u32 = 10;

/// Convert the signed 1/16 °C scratchpad value to °C.
pub fn raw_to_celsius(raw: i16) -> f32 {
    f32::from(raw) / 16.0
}

pub struct Ds18b20Bus<P, D> {
    wire: OneWire<P, D>,
    devices: Vec<RomCode, MAX_DEVICES>,
}

impl<P, D> Ds18b20Bus<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// Take the bus and enumerate the thermometers on it.
    pub fn new(wire: OneWire<P, D>) -> Self {
        let mut bus = Self {
            wire,
            devices: Vec::new(),
        };
        if let Err(e) = bus.discover() {
            warn!("ds18b20: discovery failed: {}", e);
        }
        bus
    }

    /// Re-run the ROM search, keeping only DS18B20 devices.
    pub fn discover(&mut self) -> Result<usize, OneWireError> {
        let roms = self.wire.search()?;
        self.devices = roms.into_iter().filter(|rom| rom[0] == FAMILY_CODE).collect();
        info!("ds18b20: {} device(s) on bus", self.devices.len());
        Ok(self.devices.len())
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn devices(&self) -> &[RomCode] {
        &self.devices
    }

    /// Start a conversion on every device and block until it completes.
    pub fn convert_all(&mut self) -> Result<(), OneWireError> {
        self.wire.skip_rom()?;
        self.wire.write_byte(CMD_CONVERT_T)?;
        self.wire.wait_released(CONVERSION_TIMEOUT_MS, CONVERSION_POLL_MS)
    }

    /// Read the last conversion result of the device at `index`.
    pub fn read_celsius(&mut self, index: u8) -> Result<f32, OneWireError> {
        let index = usize::from(index);
        if index >= self.devices.len() {
            self.discover()?;
        }
        let rom = *self.devices.get(index).ok_or(OneWireError::NoDevice)?;

        self.wire.match_rom(&rom)?;
        self.wire.write_byte(CMD_READ_SCRATCHPAD)?;
        let mut scratchpad = [0u8; 9];
        self.wire.read_bytes(&mut scratchpad)?;

        // An absent device leaves the line high: all 0xFF.
        if scratchpad.iter().all(|&b| b == 0xFF) || crc8(&scratchpad) != 0 {
            return Err(OneWireError::CrcMismatch);
        }
        Ok(raw_to_celsius(i16::from_le_bytes([scratchpad[0], scratchpad[1]])))
    }
}

impl<P, D> TemperatureBus for Ds18b20Bus<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn request_temperatures(&mut self) {
        if let Err(e) = self.convert_all() {
            warn!("ds18b20: conversion request failed: {}", e);
        }
    }

    fn temperature_c_by_index(&mut self, index: u8) -> f32 {
        match self.read_celsius(index) {
            Ok(celsius) => celsius,
            Err(e) => {
                warn!("ds18b20: read of device {} failed: {}", index, e);
                DEVICE_DISCONNECTED_C
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::onewire::mock::{NoDelay, ScriptedPin};

    const ROM: RomCode = [0x28, 0xFF, 0x4C, 0x3A, 0x61, 0x16, 0x04, 0x00];

    fn valid_rom() -> RomCode {
        let mut rom = ROM;
        rom[7] = crc8(&rom[..7]);
        rom
    }

    fn scratchpad(raw: i16) -> [u8; 9] {
        let [lo, hi] = raw.to_le_bytes();
        let mut sp = [lo, hi, 0x4B, 0x46, 0x7F, 0xFF, 0x0C, 0x10, 0];
        sp[8] = crc8(&sp[..8]);
        sp
    }

    fn bus_with(pin: ScriptedPin) -> Ds18b20Bus<ScriptedPin, NoDelay> {
        Ds18b20Bus::new(OneWire::new(pin, NoDelay::default()).unwrap())
    }

    #[test]
    fn raw_conversion_handles_sign() {
        assert_eq!(raw_to_celsius(0x0191), 25.0625);
        assert_eq!(raw_to_celsius(0x0550), 85.0);
        assert_eq!(raw_to_celsius(-0x0190), -25.0);
        assert_eq!(raw_to_celsius(0), 0.0);
    }

    #[test]
    fn discovers_single_thermometer() {
        let mut pin = ScriptedPin::default();
        pin.push_search(&[valid_rom()]);
        let bus = bus_with(pin);
        assert_eq!(bus.device_count(), 1);
        assert_eq!(bus.devices()[0][0], FAMILY_CODE);
    }

    #[test]
    fn reads_temperature_of_first_device() {
        let mut pin = ScriptedPin::default();
        pin.push_search(&[valid_rom()]);
        // Convert T: presence, then the conversion-done read slot.
        pin.push_presence();
        pin.push_bits([false, true]);
        // Read scratchpad: presence, then 9 bytes.
        pin.push_presence();
        pin.push_bytes(&scratchpad(0x01F8)); // 31.5 °C

        let mut bus = bus_with(pin);
        bus.request_temperatures();
        assert_eq!(bus.temperature_c_by_index(0), 31.5);
    }

    #[test]
    fn bad_scratchpad_crc_yields_sentinel() {
        let mut pin = ScriptedPin::default();
        pin.push_search(&[valid_rom()]);
        pin.push_presence();
        let mut sp = scratchpad(0x01F8);
        sp[8] ^= 0x5A;
        pin.push_bytes(&sp);

        let mut bus = bus_with(pin);
        assert_eq!(bus.temperature_c_by_index(0), DEVICE_DISCONNECTED_C);
    }

    #[test]
    fn empty_bus_yields_sentinel() {
        let mut bus = bus_with(ScriptedPin::default());
        assert_eq!(bus.device_count(), 0);
        bus.request_temperatures();
        assert_eq!(bus.temperature_c_by_index(0), DEVICE_DISCONNECTED_C);
    }

    #[test]
    fn non_thermometer_devices_are_ignored() {
        let mut pin = ScriptedPin::default();
        let mut rom = [0x02, 0x1C, 0xB8, 0x01, 0x00, 0x00, 0x00, 0x00];
        rom[7] = crc8(&rom[..7]);
        pin.push_search(&[rom]);
        let bus = bus_with(pin);
        assert_eq!(bus.device_count(), 0);
    }

    #[test]
    fn unknown_index_triggers_rediscovery() {
        let mut pin = ScriptedPin::default();
        // Boot discovery: nothing on the bus yet.
        pin.push_no_presence();
        // Sensor plugged in: the read re-runs the search, then addresses it.
        pin.push_search(&[valid_rom()]);
        pin.push_presence();
        pin.push_bytes(&scratchpad(-0x0050)); // -5.0 °C

        let mut bus = bus_with(pin);
        assert_eq!(bus.device_count(), 0);
        assert_eq!(bus.temperature_c_by_index(0), -5.0);
        assert_eq!(bus.device_count(), 1);
        assert_eq!(bus.devices(), &[valid_rom()]);
    }

    #[test]
    fn reads_second_of_two_thermometers() {
        let first = valid_rom();
        let mut second = first;
        second[1] = 0x7E;
        second[7] = crc8(&second[..7]);

        let mut pin = ScriptedPin::default();
        pin.push_search(&[first, second]);
        pin.push_presence();
        pin.push_bytes(&scratchpad(0x0200)); // 32.0 °C

        let mut bus = bus_with(pin);
        assert_eq!(bus.device_count(), 2);
        let index = bus.devices().iter().position(|rom| *rom == second).unwrap();
        assert_eq!(bus.temperature_c_by_index(index as u8), 32.0);
    }
}

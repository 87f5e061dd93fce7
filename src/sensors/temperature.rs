//! One-wire temperature sensor.
//!
//! Wraps a [`TemperatureBus`] driver.  Each read is a fresh bus
//! transaction: a conversion request broadcast to every device, then a
//! read of the configured device (index 0 unless configured otherwise).
//! Nothing is cached between reads.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: the bus is a [`Ds18b20Bus`](crate::drivers::ds18b20::Ds18b20Bus)
//! on a real GPIO.  On host/test: any [`TemperatureBus`] stub.

use crate::app::ports::TemperaturePort;

/// Value reported by the bus driver when a device cannot be read.
pub const DEVICE_DISCONNECTED_C: f32 = -127.0;

/// What a one-wire temperature driver has to offer.
pub trait TemperatureBus {
    /// Ask every device on the bus to start a conversion; blocks until done.
    fn request_temperatures(&mut self);

    /// Last conversion result of the `index`-th device, in °C, or
    /// [`DEVICE_DISCONNECTED_C`] if it could not be read.
    fn temperature_c_by_index(&mut self, index: u8) -> f32;
}

pub struct TemperatureSensor<B: TemperatureBus> {
    bus: B,
    index: u8,
}

impl<B: TemperatureBus> TemperatureSensor<B> {
    pub fn new(bus: B, index: u8) -> Self {
        Self { bus, index }
    }

    pub fn read_temperature(&mut self) -> f32 {
        self.bus.request_temperatures();
        self.bus.temperature_c_by_index(self.index)
    }

    pub fn index(&self) -> u8 {
        self.index
    }
}

impl<B: TemperatureBus> TemperaturePort for TemperatureSensor<B> {
    fn read_temperature(&mut self) -> f32 {
        TemperatureSensor::read_temperature(self)
    }
}

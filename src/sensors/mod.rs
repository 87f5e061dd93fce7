//! Sensor subsystem: the one-wire temperature sensor and reading
//! classification.

pub mod temperature;

use crate::config::{SENSOR_MAX_C, SENSOR_MIN_C};
use crate::error::SensorError;
use temperature::DEVICE_DISCONNECTED_C;

/// Separate real readings from the driver's failure sentinel and from
/// values the DS18B20 cannot physically produce.
pub fn classify(celsius: f32) -> Result<f32, SensorError> {
    if celsius == DEVICE_DISCONNECTED_C {
        return Err(SensorError::Disconnected);
    }
    if !celsius.is_finite() || !(SENSOR_MIN_C..=SENSOR_MAX_C).contains(&celsius) {
        return Err(SensorError::OutOfRange);
    }
    Ok(celsius)
}

//! System configuration parameters
//!
//! All tunable parameters for the Thermogate controller.  Defaults are
//! compiled in; a JSON override may be baked in at build time through the
//! `THERMOGATE_CONFIG` environment variable (see `main`).

use core::fmt;

use serde::{Deserialize, Serialize};

/// Lowest temperature a DS18B20 can report (°C).
pub const SENSOR_MIN_C: f32 = -55.0;
/// Highest temperature a DS18B20 can report (°C).
pub const SENSOR_MAX_C: f32 = 125.0;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Hysteresis band ---
    /// Below this temperature (°C) an open gate is closed.
    pub low_threshold_c: f32,
    /// Above this temperature (°C) a closed gate is opened.
    pub high_threshold_c: f32,

    // --- Sensor ---
    /// Position of the sensor on the one-wire bus (0 = first found).
    pub sensor_index: u8,
    /// Skip the policy when the reading is the disconnect sentinel or
    /// physically implausible.  `false` feeds raw values straight through.
    pub hold_on_sensor_fault: bool,

    // --- Timing ---
    /// Control loop interval (milliseconds)
    pub control_loop_interval_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            low_threshold_c: 30.0,
            high_threshold_c: 32.0,

            sensor_index: 0,
            hold_on_sensor_fault: true,

            control_loop_interval_ms: 1000, // 1 Hz
        }
    }
}

impl SystemConfig {
    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.low_threshold_c.is_finite() || !self.high_threshold_c.is_finite() {
            return Err(ConfigError::ValidationFailed("thresholds must be finite"));
        }
        if self.low_threshold_c >= self.high_threshold_c {
            return Err(ConfigError::ValidationFailed(
                "low_threshold_c must be below high_threshold_c",
            ));
        }
        if self.low_threshold_c < SENSOR_MIN_C || self.high_threshold_c > SENSOR_MAX_C {
            return Err(ConfigError::ValidationFailed(
                "thresholds outside sensor range",
            ));
        }
        if self.control_loop_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "control_loop_interval_ms must be non-zero",
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.  Missing fields take defaults.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(bytes).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }
}

/// Errors from loading or validating a [`SystemConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The document could not be deserialised.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

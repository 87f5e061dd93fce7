//! Sensor fault supervisor.
//!
//! Runs **every tick before the hysteresis policy** and latches the last
//! sensor fault so that set and clear transitions are each logged once,
//! not every second while the sensor stays unplugged.
//!
//! ## Fault lifecycle
//!
//! 1. A reading classifies as a fault (sentinel or out of range).
//! 2. The supervisor latches it and logs `SENSOR FAULT SET`.
//! 3. While faulted, further faulty readings only bump the counter.
//! 4. The first valid reading clears the latch and logs `SENSOR FAULT CLEARED`.

use log::{error, info};

use crate::error::SensorError;
use crate::sensors::classify;

/// Outcome of feeding one reading to the supervisor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// Plausible reading; safe to feed to the policy.
    Valid(f32),
    /// Faulty reading.  `raw` is what the driver returned.
    Fault { raw: f32, error: SensorError },
}

/// Sensor fault supervisor.
#[derive(Debug, Default)]
pub struct SensorWatch {
    /// Latched fault, if any.
    fault: Option<SensorError>,
    /// Consecutive faulty readings.
    consecutive: u32,
}

impl SensorWatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `raw` and update the fault latch.
    pub fn evaluate(&mut self, raw: f32) -> Verdict {
        match classify(raw) {
            Ok(celsius) => {
                if let Some(prev) = self.fault.take() {
                    info!(
                        "SENSOR FAULT CLEARED: {} (after {} bad reading(s))",
                        prev, self.consecutive
                    );
                }
                self.consecutive = 0;
                Verdict::Valid(celsius)
            }
            Err(e) => {
                self.consecutive = self.consecutive.saturating_add(1);
                if self.fault != Some(e) {
                    error!("SENSOR FAULT SET: {} (raw={:.2})", e, raw);
                }
                self.fault = Some(e);
                Verdict::Fault { raw, error: e }
            }
        }
    }

    /// Latched fault, if any.
    pub fn fault(&self) -> Option<SensorError> {
        self.fault
    }

    /// True if the last reading was faulty.
    pub fn has_fault(&self) -> bool {
        self.fault.is_some()
    }

    /// Number of faulty readings in a row.
    pub fn consecutive_faults(&self) -> u32 {
        self.consecutive
    }
}

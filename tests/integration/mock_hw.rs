//! Mock hardware adapters for integration tests.
//!
//! Records every gate line write and replays a scripted temperature
//! sequence so tests can assert on the full command history without
//! touching real GPIO.

use embedded_hal::digital::PinState;
use thermogate::app::events::AppEvent;
use thermogate::app::ports::{EventSink, GatePin, GatePins, TemperaturePort};
use thermogate::error::ActuatorError;
use thermogate::sensors::temperature::DEVICE_DISCONNECTED_C;

// ── MockPins ──────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MockPins {
    pub writes: Vec<(GatePin, PinState)>,
    pub open: Option<PinState>,
    pub close: Option<PinState>,
}

#[allow(dead_code)]
impl MockPins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exactly one line high, the other low.
    pub fn pattern_is_exclusive(&self) -> bool {
        matches!(
            (self.open, self.close),
            (Some(PinState::High), Some(PinState::Low)) | (Some(PinState::Low), Some(PinState::High))
        )
    }

    pub fn open_line_high(&self) -> bool {
        self.open == Some(PinState::High)
    }
}

impl GatePins for MockPins {
    fn set(&mut self, pin: GatePin, level: PinState) -> Result<(), ActuatorError> {
        self.writes.push((pin, level));
        match pin {
            GatePin::Open => self.open = Some(level),
            GatePin::Close => self.close = Some(level),
        }
        Ok(())
    }
}

// ── ScriptedSensor ────────────────────────────────────────────

/// Returns the scripted readings in order, then the disconnect sentinel.
pub struct ScriptedSensor {
    readings: std::vec::IntoIter<f32>,
    pub reads: usize,
}

impl ScriptedSensor {
    pub fn new(readings: &[f32]) -> Self {
        Self {
            readings: readings.to_vec().into_iter(),
            reads: 0,
        }
    }
}

impl TemperaturePort for ScriptedSensor {
    fn read_temperature(&mut self) -> f32 {
        self.reads += 1;
        self.readings.next().unwrap_or(DEVICE_DISCONNECTED_C)
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gate_changes(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::GateChanged { .. }))
            .count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing the per-cycle status lines to the
//! logger (UART on the board).  The format is for humans; nothing parses it.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(status) => {
                info!("START | gate={}", status);
            }
            AppEvent::Requesting => {
                info!("Requesting temperatures...");
            }
            AppEvent::GateChanged { from, to } => {
                info!("GATE | {} -> {}", from, to);
            }
            AppEvent::SensorFault { raw_c, error } => {
                warn!("SENSOR | {} (raw={:.2})", error, raw_c);
            }
            AppEvent::Cycle(report) => {
                info!("Gate status: {}", report.status);
                info!("Temperature is: {:.2}", report.temperature_c);
                info!("");
            }
        }
    }
}

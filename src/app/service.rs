//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the gate, the hysteresis policy, and the sensor
//! fault supervisor.  It exposes a hardware-agnostic API; all I/O flows
//! through port traits, making the whole control loop testable with mock
//! adapters.
//!
//! ```text
//!  TemperaturePort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                      │        AppService         │
//!         GatePins  ◀──│ Watch · Hysteresis · Gate │
//!                      └──────────────────────────┘
//! ```

use log::{info, warn};

use crate::config::SystemConfig;
use crate::control::hysteresis::{GateAction, HysteresisPolicy};
use crate::drivers::gate::{GateManipulator, GateStatus};
use crate::error::Result;
use crate::safety::{SensorWatch, Verdict};

use super::commands::AppCommand;
use super::events::{AppEvent, CycleReport};
use super::ports::{EventSink, GatePins, TemperaturePort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService<P: GatePins> {
    gate: GateManipulator<P>,
    policy: HysteresisPolicy,
    watch: SensorWatch,
    config: SystemConfig,
    tick_count: u64,
}

impl<P: GatePins> AppService<P> {
    /// Construct the service around an already-initialised gate.
    pub fn new(config: SystemConfig, gate: GateManipulator<P>) -> Self {
        Self {
            gate,
            policy: HysteresisPolicy::from_config(&config),
            watch: SensorWatch::new(),
            config,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started(self.gate.status()));
        info!(
            "AppService started: gate {}, band [{:.1}, {:.1}] C",
            self.gate.status(),
            self.policy.low_c(),
            self.policy.high_c()
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle: read sensor → classify → policy → gate.
    pub fn tick(
        &mut self,
        sensor: &mut impl TemperaturePort,
        sink: &mut impl EventSink,
    ) -> CycleReport {
        self.tick_count += 1;

        // 1. Blocking sensor read
        sink.emit(&AppEvent::Requesting);
        let raw = sensor.read_temperature();

        // 2. Fault classification
        let (input, sensor_fault) = match self.watch.evaluate(raw) {
            Verdict::Valid(celsius) => (Some(celsius), false),
            Verdict::Fault { raw, error } => {
                sink.emit(&AppEvent::SensorFault { raw_c: raw, error });
                if self.config.hold_on_sensor_fault {
                    (None, true)
                } else {
                    (Some(raw), true)
                }
            }
        };

        // 3. Hysteresis decision
        let action = match input {
            Some(t) => self.policy.decide(t, self.gate.status()),
            None => GateAction::Hold,
        };

        // 4. Apply to the gate
        self.apply(action, sink);

        let report = CycleReport {
            temperature_c: raw,
            status: self.gate.status(),
            action,
            sensor_fault,
        };
        sink.emit(&AppEvent::Cycle(report));
        report
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command outside the regular cycle.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        match cmd {
            AppCommand::SetGate(target) => {
                let from = self.gate.status();
                self.gate.set(target);
                if from != target {
                    sink.emit(&AppEvent::GateChanged { from, to: target });
                }
            }
            AppCommand::ToggleGate => {
                let from = self.gate.status();
                self.gate.toggle();
                let to = self.gate.status();
                if from != to {
                    sink.emit(&AppEvent::GateChanged { from, to });
                }
            }
            AppCommand::UpdateConfig(new_config) => {
                if let Err(e) = new_config.validate() {
                    warn!("Rejected configuration update: {}", e);
                    return Err(e.into());
                }
                self.policy = HysteresisPolicy::from_config(&new_config);
                self.config = new_config;
                info!("Configuration updated at runtime");
            }
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn gate_status(&self) -> GateStatus {
        self.gate.status()
    }

    pub fn gate(&self) -> &GateManipulator<P> {
        &self.gate
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn sensor_watch(&self) -> &SensorWatch {
        &self.watch
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply(&mut self, action: GateAction, sink: &mut impl EventSink) {
        let from = self.gate.status();
        match action {
            GateAction::Open => self.gate.open(),
            GateAction::Close => self.gate.close(),
            GateAction::Hold => return,
        }
        let to = self.gate.status();
        if from == to {
            warn!("Gate stayed {}: {:?} not applied", from, action);
            return;
        }
        info!("Gate {} -> {}", from, to);
        sink.emit(&AppEvent::GateChanged { from, to });
    }
}

//! Thermogate Firmware: Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                     │
//! │                                                            │
//! │  TemperatureSensor   GatePinPair      LogEventSink         │
//! │  (DS18B20 bus)       (2x GPIO out)    (serial log)         │
//! │                                                            │
//! │  ────────────── Port Trait Boundary ──────────────────     │
//! │                                                            │
//! │  ┌──────────────────────────────────────────────────┐      │
//! │  │           AppService (pure logic)                │      │
//! │  │  SensorWatch · Hysteresis · GateManipulator      │      │
//! │  └──────────────────────────────────────────────────┘      │
//! └────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::{Ets, FreeRtos};
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, PinDriver, Pull};
use log::{info, warn};

use thermogate::adapters::hardware::GatePinPair;
use thermogate::adapters::log_sink::LogEventSink;
use thermogate::app::service::AppService;
use thermogate::config::SystemConfig;
use thermogate::drivers::ds18b20::Ds18b20Bus;
use thermogate::drivers::gate::GateManipulator;
use thermogate::drivers::onewire::OneWire;
use thermogate::error::Error;
use thermogate::pins;
use thermogate::sensors::temperature::TemperatureSensor;

/// Load the build-time JSON override, falling back to defaults.
fn load_config() -> SystemConfig {
    match option_env!("THERMOGATE_CONFIG") {
        Some(json) => match SystemConfig::from_json(json.as_bytes()) {
            Ok(cfg) => {
                info!("Config loaded from THERMOGATE_CONFIG");
                cfg
            }
            Err(e) => {
                warn!("THERMOGATE_CONFIG rejected ({}), using defaults", e);
                SystemConfig::default()
            }
        },
        None => SystemConfig::default(),
    }
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    info!("Thermogate v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config();

    // ── 2. Gate first, so the actuator is in a known state ────
    // SAFETY: each GPIO number in `pins` is claimed exactly once, here.
    let open_pin = PinDriver::output(unsafe { AnyOutputPin::new(pins::GATE_OPEN_GPIO) })?;
    let close_pin = PinDriver::output(unsafe { AnyOutputPin::new(pins::GATE_CLOSE_GPIO) })?;
    let gate = GateManipulator::new(GatePinPair::new(open_pin, close_pin));
    info!(
        "Gate on GPIO{}/GPIO{} initialised {}",
        pins::GATE_OPEN_GPIO,
        pins::GATE_CLOSE_GPIO,
        gate.status()
    );

    // ── 3. One-wire bus + temperature sensor ──────────────────
    let mut bus_pin = PinDriver::input_output_od(unsafe { AnyIOPin::new(pins::TEMP_BUS_GPIO) })?;
    bus_pin.set_pull(Pull::Up)?;
    let wire = OneWire::new(bus_pin, Ets).map_err(Error::from)?;
    let bus = Ds18b20Bus::new(wire);
    if bus.device_count() == 0 {
        warn!("No DS18B20 found on GPIO{}; readings will report a fault", pins::TEMP_BUS_GPIO);
    }
    let mut sensor = TemperatureSensor::new(bus, config.sensor_index);

    // ── 4. Control loop ───────────────────────────────────────
    let interval_ms = config.control_loop_interval_ms;
    let mut sink = LogEventSink::new();
    let mut app = AppService::new(config, gate);
    app.start(&mut sink);

    info!("System ready. Entering control loop.");

    loop {
        app.tick(&mut sensor, &mut sink);
        FreeRtos::delay_ms(interval_ms);
    }
}

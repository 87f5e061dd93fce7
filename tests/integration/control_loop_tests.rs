//! Control loop: AppService → hysteresis → gate, driven by scripted readings.

use thermogate::app::commands::AppCommand;
use thermogate::app::events::AppEvent;
use thermogate::app::service::AppService;
use thermogate::config::SystemConfig;
use thermogate::control::hysteresis::GateAction;
use thermogate::drivers::gate::{GateManipulator, GateStatus};
use thermogate::error::SensorError;

use crate::mock_hw::{MockPins, RecordingSink, ScriptedSensor};

fn make_app() -> AppService<MockPins> {
    AppService::new(SystemConfig::default(), GateManipulator::new(MockPins::new()))
}

fn run(app: &mut AppService<MockPins>, readings: &[f32]) -> Vec<GateStatus> {
    let mut sensor = ScriptedSensor::new(readings);
    let mut sink = RecordingSink::new();
    readings
        .iter()
        .map(|_| app.tick(&mut sensor, &mut sink).status)
        .collect()
}

#[test]
fn closed_gate_opens_only_above_high_threshold() {
    let mut app = make_app();
    let statuses = run(&mut app, &[31.0, 31.5, 32.1]);
    assert_eq!(
        statuses,
        vec![GateStatus::Closed, GateStatus::Closed, GateStatus::Open]
    );
}

#[test]
fn open_gate_closes_only_below_low_threshold() {
    let mut app = make_app();
    let mut sink = RecordingSink::new();
    app.handle_command(AppCommand::SetGate(GateStatus::Open), &mut sink)
        .unwrap();
    let statuses = run(&mut app, &[31.5, 29.9]);
    assert_eq!(statuses, vec![GateStatus::Open, GateStatus::Closed]);
}

#[test]
fn dead_band_never_moves_the_gate() {
    for start in [GateStatus::Open, GateStatus::Closed] {
        let mut app = make_app();
        let mut sink = RecordingSink::new();
        app.handle_command(AppCommand::SetGate(start), &mut sink)
            .unwrap();
        let statuses = run(&mut app, &[30.0, 30.5, 31.0, 31.99, 32.0]);
        assert!(statuses.iter().all(|s| *s == start), "moved from {:?}", start);
    }
}

#[test]
fn full_cycle_through_band() {
    let mut app = make_app();
    let statuses = run(&mut app, &[25.0, 33.0, 31.0, 30.5, 29.0, 31.0]);
    assert_eq!(
        statuses,
        vec![
            GateStatus::Closed,
            GateStatus::Open,
            GateStatus::Open,
            GateStatus::Open,
            GateStatus::Closed,
            GateStatus::Closed,
        ]
    );
    assert!(app.gate().pins().pattern_is_exclusive());
}

#[test]
fn cycle_events_follow_serial_log_order() {
    let mut app = make_app();
    let mut sink = RecordingSink::new();
    app.start(&mut sink);
    let mut sensor = ScriptedSensor::new(&[33.0]);
    let report = app.tick(&mut sensor, &mut sink);

    assert_eq!(report.action, GateAction::Open);
    assert_eq!(
        sink.events,
        vec![
            AppEvent::Started(GateStatus::Closed),
            AppEvent::Requesting,
            AppEvent::GateChanged {
                from: GateStatus::Closed,
                to: GateStatus::Open
            },
            AppEvent::Cycle(report),
        ]
    );
}

#[test]
fn unplugged_sensor_holds_gate_and_reports_fault() {
    let mut app = make_app();
    let mut sink = RecordingSink::new();
    let mut sensor = ScriptedSensor::new(&[33.0]);
    app.tick(&mut sensor, &mut sink);
    assert_eq!(app.gate_status(), GateStatus::Open);

    // Script exhausted: every further read is the disconnect sentinel.
    for _ in 0..3 {
        let report = app.tick(&mut sensor, &mut sink);
        assert!(report.sensor_fault);
        assert_eq!(report.status, GateStatus::Open);
    }
    assert_eq!(
        app.sensor_watch().fault(),
        Some(SensorError::Disconnected)
    );
    assert_eq!(app.sensor_watch().consecutive_faults(), 3);
    assert_eq!(sensor.reads, 4);
    assert_eq!(sink.gate_changes(), 1);
}

#[test]
fn toggle_command_emits_change() {
    let mut app = make_app();
    let mut sink = RecordingSink::new();
    app.handle_command(AppCommand::ToggleGate, &mut sink).unwrap();
    app.handle_command(AppCommand::ToggleGate, &mut sink).unwrap();
    assert_eq!(app.gate_status(), GateStatus::Closed);
    assert_eq!(sink.gate_changes(), 2);
}

//! Gate state machine against recorded pin writes.

use embedded_hal::digital::PinState;
use thermogate::app::ports::GatePin;
use thermogate::drivers::gate::{GateManipulator, GateStatus};

use crate::mock_hw::MockPins;

#[test]
fn boot_pattern_is_closed() {
    let gate = GateManipulator::new(MockPins::new());
    assert_eq!(gate.status(), GateStatus::Closed);
    assert_eq!(
        gate.pins().writes,
        vec![(GatePin::Open, PinState::Low), (GatePin::Close, PinState::High)]
    );
}

#[test]
fn open_and_close_leave_exactly_one_line_high() {
    let mut gate = GateManipulator::new(MockPins::new());
    for status in [GateStatus::Open, GateStatus::Closed, GateStatus::Open] {
        gate.set(status);
        assert_eq!(gate.status(), status);
        assert!(gate.pins().pattern_is_exclusive());
        assert_eq!(gate.pins().open_line_high(), status == GateStatus::Open);
    }
}

#[test]
fn every_transition_lowers_before_raising() {
    let mut gate = GateManipulator::new(MockPins::new());
    gate.open();
    gate.close();
    gate.toggle();
    for pair in gate.pins().writes.chunks(2) {
        assert_eq!(pair[0].1, PinState::Low);
        assert_eq!(pair[1].1, PinState::High);
        assert_ne!(pair[0].0, pair[1].0);
    }
}

#[test]
fn status_label_names_current_state() {
    let mut gate = GateManipulator::new(MockPins::new());
    assert_eq!(gate.status_label(), "closed");
    gate.open();
    assert_eq!(gate.status_label(), "open");
    assert!(!gate.status_label().is_empty());
}

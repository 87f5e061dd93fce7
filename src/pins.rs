//! GPIO pin assignments for the Thermogate board.
//!
//! Single source of truth: `main` references this module rather than
//! hard-coding pin numbers.  Pin numbering is configuration, not protocol.

// ---------------------------------------------------------------------------
// One-wire temperature bus (DS18B20)
// ---------------------------------------------------------------------------

/// Open-drain data line of the one-wire bus.  Needs a 4.7 kΩ pull-up.
pub const TEMP_BUS_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Gate actuator
// ---------------------------------------------------------------------------

/// Digital output: HIGH drives the gate towards open.
pub const GATE_OPEN_GPIO: i32 = 4;
/// Digital output: HIGH drives the gate towards closed.
pub const GATE_CLOSE_GPIO: i32 = 5;

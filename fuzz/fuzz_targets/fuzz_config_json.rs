//! Fuzz target: `SystemConfig::from_json`
//!
//! Arbitrary bytes must never panic the config loader, and anything it
//! accepts must describe a usable hysteresis band.
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use libfuzzer_sys::fuzz_target;
use thermogate::config::SystemConfig;
use thermogate::control::hysteresis::HysteresisPolicy;

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = SystemConfig::from_json(data) {
        assert!(config.validate().is_ok(), "accepted config must validate");
        assert!(config.low_threshold_c < config.high_threshold_c);
        assert!(config.control_loop_interval_ms > 0);
        let _ = HysteresisPolicy::from_config(&config);
    }
});

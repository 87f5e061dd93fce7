//! Thermogate firmware library.
//!
//! Exposes the pure-logic modules for integration testing and for the
//! firmware binary.  Nothing here depends on ESP-IDF: hardware enters only
//! through embedded-hal traits and the port traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod pins;
pub mod safety;
pub mod sensors;

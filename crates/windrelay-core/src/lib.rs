//! # windrelay-core
//!
//! Core data model for the wind speed relay.
//!
//! This crate provides:
//! - The `Reading` type and its serial wire format
//! - Coercion of HTTP payloads into readings
//! - Relay configuration loaded from the environment
//!
//! This crate is intentionally runtime-agnostic and contains no async code
//! or device I/O.

pub mod config;
pub mod reading;

pub use config::{ConfigError, RelayConfig};
pub use reading::{InvalidReading, Reading, WIND_SPEED_FIELD};

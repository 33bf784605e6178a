//! # groundctl Telemetry
//!
//! Crate for logging and audit events.

pub mod logging;

pub use logging::EventLogger;

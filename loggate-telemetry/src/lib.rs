//! # loggate telemetry
//!
//! Crate for the output side of the gate: a `tracing`-backed sink and the
//! subscriber that renders it.

pub mod logging;

pub use logging::{try_init_subscriber, TelemetryError, TracingSink};

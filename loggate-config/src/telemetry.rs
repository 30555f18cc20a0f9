//! Output settings for the `tracing` subscriber that backs the sink.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation;

/// Telemetry configuration.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset. Defaults to
    /// `trace` so the gate alone decides what reaches the output.
    #[validate(custom(function = validation::validate_filter))]
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Include thread names in each line.
    #[serde(default)]
    pub thread_names: bool,

    /// Colourise output.
    #[serde(default = "default_true")]
    pub ansi: bool,

    /// Print the `tracing` target next to each event.
    #[serde(default)]
    pub target: bool,
}

fn default_filter() -> String {
    "trace".into()
}

fn default_true() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            thread_names: false,
            ansi: default_true(),
            target: false,
        }
    }
}

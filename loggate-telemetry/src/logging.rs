//! ## loggate-telemetry::logging
//! **`tracing` as the platform sink**
//!
//! Records that pass the gate become `tracing` events at the matching level,
//! carrying the tag (and the rendered failure, if any) as fields. Output is
//! whatever subscriber the process installs; [`try_init_subscriber`] sets up
//! the plain `fmt` subscriber from [`TelemetryConfig`].

use loggate_config::TelemetryConfig;
use loggate_core::{render_failure, Failure, LogSink, Severity};
use thiserror::Error;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid filter directive: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("global subscriber already installed: {0}")]
    AlreadyInitialized(String),
}

/// Installs the global `fmt` subscriber. `RUST_LOG` takes precedence over
/// the configured filter.
pub fn try_init_subscriber(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)?,
    };

    fmt()
        .with_env_filter(filter)
        .with_thread_names(config.thread_names)
        .with_ansi(config.ansi)
        .with_target(config.target)
        .try_init()
        .map_err(|err| TelemetryError::AlreadyInitialized(err.to_string()))
}

macro_rules! forward {
    ($level:ident, $tag:expr, $message:expr, $failure:expr) => {
        match $failure {
            Some(failure) => tracing::$level!(
                tag = %$tag,
                failure = %render_failure(failure),
                "{}",
                $message
            ),
            None => tracing::$level!(tag = %$tag, "{}", $message),
        }
    };
}

/// Forwards each record to the `tracing` macro of the same level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingSink {
    fn write(&self, severity: Severity, tag: &str, message: &str, failure: Option<Failure<'_>>) {
        match severity {
            Severity::Trace => forward!(trace, tag, message, failure),
            Severity::Debug => forward!(debug, tag, message, failure),
            Severity::Info => forward!(info, tag, message, failure),
            Severity::Warn => forward!(warn, tag, message, failure),
            Severity::Error => forward!(error, tag, message, failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loggate_config::{StaticProvider, MAX_LOG_LEVEL_KEY};
    use loggate_core::{LevelGatedLogger, DIAGNOSTIC_TAG};
    use tracing_test::traced_test;

    struct Downloader;

    #[traced_test]
    #[test]
    fn sink_writes_tag_and_message() {
        TracingSink.write(Severity::Warn, "Downloader", "retrying", None);
        assert!(logs_contain("WARN"));
        assert!(logs_contain("tag=Downloader"));
        assert!(logs_contain("retrying"));
    }

    #[traced_test]
    #[test]
    fn sink_renders_failure_field() {
        let err = std::io::Error::other("socket closed");
        TracingSink.write(Severity::Error, "Downloader", "aborted", Some(&err));
        assert!(logs_contain("aborted"));
        assert!(logs_contain("failure=socket closed"));
    }

    #[traced_test]
    #[test]
    fn gate_over_tracing() {
        let logger = LevelGatedLogger::new(
            StaticProvider::new().with(MAX_LOG_LEVEL_KEY, "I"),
            TracingSink,
        );
        logger.info(&Downloader, "fetched manifest");
        logger.trace(&Downloader, "byte-level chatter");

        assert!(logs_contain("tag=Downloader"));
        assert!(logs_contain("fetched manifest"));
        assert!(!logs_contain("byte-level chatter"));
    }

    #[traced_test]
    #[test]
    fn unresolved_ceiling_goes_to_diagnostic_tag() {
        let logger = LevelGatedLogger::new(StaticProvider::new(), TracingSink);
        logger.error(&Downloader, "payload that must not appear");

        assert!(logs_contain(&format!("tag={DIAGNOSTIC_TAG}")));
        assert!(!logs_contain("payload that must not appear"));
    }

    #[test]
    fn bad_filter_is_rejected() {
        let config = TelemetryConfig {
            filter: "loggate=loudest".into(),
            ..Default::default()
        };
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(matches!(
                try_init_subscriber(&config),
                Err(TelemetryError::Filter(_))
            ));
        }
    }
}

//! The level gate.
//!
//! Every call reads the ceiling from the injected [`ConfigProvider`], compares
//! ranks and either forwards the record to the [`LogSink`] or drops it. When
//! the ceiling cannot be resolved the gate fails closed: the record is dropped
//! and a single diagnostic tagged [`DIAGNOSTIC_TAG`] is written instead.
//! Nothing is ever returned to, or raised in, the caller.

use loggate_config::{ConfigError, ConfigProvider, MAX_LOG_LEVEL_KEY};

use crate::error::LogError;
use crate::severity::{MaxLevel, Severity};
use crate::sink::{Failure, LogSink};
use crate::tag::Tag;

/// Tag of the diagnostic written when the ceiling cannot be resolved.
pub const DIAGNOSTIC_TAG: &str = "Log";

/// Forwards records to a sink when the configured ceiling permits them.
#[derive(Debug, Clone)]
pub struct LevelGatedLogger<P, S> {
    provider: P,
    sink: S,
}

impl<P: ConfigProvider, S: LogSink> LevelGatedLogger<P, S> {
    pub fn new(provider: P, sink: S) -> Self {
        Self { provider, sink }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_parts(self) -> (P, S) {
        (self.provider, self.sink)
    }

    /// Reads and parses the ceiling. An unrecognized configured value is
    /// reported as [`LogError::ConfigurationUnavailable`].
    pub fn max_level(&self) -> Result<MaxLevel, LogError> {
        let raw = self
            .provider
            .lookup(MAX_LOG_LEVEL_KEY)
            .map_err(|err| LogError::unavailable(MAX_LOG_LEVEL_KEY, err))?;

        raw.parse::<MaxLevel>().map_err(|_| {
            LogError::unavailable(
                MAX_LOG_LEVEL_KEY,
                ConfigError::InvalidValue {
                    key: MAX_LOG_LEVEL_KEY.to_string(),
                    value: raw,
                },
            )
        })
    }

    /// Whether a record of `severity` would currently pass. False when the
    /// ceiling cannot be resolved; writes no diagnostic.
    pub fn enabled(&self, severity: Severity) -> bool {
        self.max_level()
            .map(|max| max.permits(severity))
            .unwrap_or(false)
    }

    /// Writes `message` under `tag` if `severity` is within the ceiling.
    pub fn emit(&self, severity: Severity, tag: &Tag, message: &str, failure: Option<Failure<'_>>) {
        self.emit_lazy(severity, tag, failure, || message)
    }

    /// Like [`emit`](Self::emit), but the message is only built when the
    /// record passes.
    pub fn emit_lazy<M, F>(
        &self,
        severity: Severity,
        tag: &Tag,
        failure: Option<Failure<'_>>,
        message: F,
    ) where
        M: AsRef<str>,
        F: FnOnce() -> M,
    {
        match self.max_level() {
            Ok(max) if max.permits(severity) => {
                let message = message();
                self.sink
                    .write(severity, tag.as_str(), message.as_ref(), failure);
            }
            Ok(_) => {}
            Err(err) => self.sink.write(
                Severity::Error,
                DIAGNOSTIC_TAG,
                "Could not determine the maximum log level; record suppressed.",
                Some(&err),
            ),
        }
    }
}

macro_rules! tier_methods {
    ($($severity:ident => $plain:ident, $with_err:ident, $for_src:ident, $for_src_err:ident;)*) => {
        impl<P: ConfigProvider, S: LogSink> LevelGatedLogger<P, S> {
            $(
                #[doc = concat!("Writes a `", stringify!($plain), "` record tagged with the type name of `context`.")]
                pub fn $plain<C: ?Sized>(&self, context: &C, message: &str) {
                    self.emit(Severity::$severity, &Tag::of(context), message, None)
                }

                #[doc = concat!("Writes a `", stringify!($plain), "` record with an attached failure, tagged with the type name of `context`.")]
                pub fn $with_err<C: ?Sized>(&self, context: &C, message: &str, failure: Failure<'_>) {
                    self.emit(Severity::$severity, &Tag::of(context), message, Some(failure))
                }

                #[doc = concat!("Writes a `", stringify!($plain), "` record tagged with the type name of `source`, or the fallback tag for `None`.")]
                pub fn $for_src<O: ?Sized>(&self, source: Option<&O>, message: &str) {
                    self.emit(Severity::$severity, &Tag::of_opt(source), message, None)
                }

                #[doc = concat!("Writes a `", stringify!($plain), "` record with an attached failure, tagged with the type name of `source`.")]
                pub fn $for_src_err<O: ?Sized>(&self, source: Option<&O>, message: &str, failure: Failure<'_>) {
                    self.emit(Severity::$severity, &Tag::of_opt(source), message, Some(failure))
                }
            )*
        }
    };
}

tier_methods! {
    Trace => trace, trace_err, trace_for, trace_for_err;
    Debug => debug, debug_err, debug_for, debug_for_err;
    Info => info, info_err, info_for, info_for_err;
    Warn => warn, warn_err, warn_for, warn_for_err;
    Error => error, error_err, error_for, error_for_err;
}

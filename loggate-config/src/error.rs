//! Errors raised by configuration stores and loaders.

use std::path::PathBuf;
use thiserror::Error;
use validator::ValidationErrors;

/// Failure to produce a configuration value.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// The store holds no value under the requested key.
    #[error("configuration key `{0}` not found")]
    MissingKey(String),

    /// A value was found but is not one the reader understands.
    #[error("configuration key `{key}` has unrecognized value `{value}`")]
    InvalidValue { key: String, value: String },

    /// Loaded values failed validation.
    #[error("invalid configuration: {}", summarize(.0))]
    Validation(#[source] ValidationErrors),

    /// Figment could not read or extract a source.
    #[error("configuration parsing error: {0}")]
    Parsing(#[from] figment::Error),
}

impl ConfigError {
    /// True when the store was reachable but simply lacked the value.
    pub fn is_missing(&self) -> bool {
        match self {
            ConfigError::MissingKey(_) => true,
            ConfigError::Parsing(err) => matches!(err.kind, figment::error::Kind::MissingField(_)),
            _ => false,
        }
    }
}

/// Flattens validator output to `field: code` pairs on one line, since the
/// message usually ends up inside a single log record.
fn summarize(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(msg) => format!("{field}: {msg}"),
                None => format!("{field}: {}", error.code),
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

impl From<ValidationErrors> for ConfigError {
    fn from(errors: ValidationErrors) -> Self {
        ConfigError::Validation(errors)
    }
}

use loggate_config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    /// The ceiling could not be read, or what was read is not a level code.
    #[error("log level `{key}` unavailable")]
    ConfigurationUnavailable {
        key: String,
        #[source]
        source: ConfigError,
    },

    /// A tier name that matches none of `V`, `D`, `I`, `W`, `E`.
    #[error("invalid log level name `{0}`")]
    InvalidSeverityName(String),
}

impl LogError {
    pub(crate) fn unavailable(key: &str, source: ConfigError) -> Self {
        LogError::ConfigurationUnavailable {
            key: key.to_string(),
            source,
        }
    }
}

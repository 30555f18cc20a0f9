//! # loggate configuration
//!
//! Where the gate's ceiling comes from. The gate itself only needs a
//! [`ConfigProvider`], a store that answers "what string is configured under
//! this key". This crate supplies the stores and the typed, validated loader
//! used at process start-up.
//!
//! ## Sources
//! - **In memory**: [`StaticProvider`], application metadata fixed at build or start time
//! - **Files and environment**: [`FigmentProvider`], YAML overlaid with `LOGGATE_*` variables
//! - **Memoised**: [`CachedProvider`], for stores known to be static for the process lifetime

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod error;
mod provider;
mod telemetry;
mod validation;

pub use error::ConfigError;
pub use provider::{CachedProvider, ConfigProvider, FigmentProvider, StaticProvider};
pub use telemetry::TelemetryConfig;
pub use validation::LEVEL_CODES;

/// Name of the setting holding the maximum permitted severity.
pub const MAX_LOG_LEVEL_KEY: &str = "max_log_level";

pub(crate) const CONFIG_DIR: &str = "config";
pub(crate) const ENV_PREFIX: &str = "LOGGATE_";
pub(crate) const ENV_SELECTOR: &str = "LOGGATE_ENV";

/// Top-level configuration for a process using the gate.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct LoggateConfig {
    /// Ceiling code: `V`, `D`, `I`, `W`, `E` or `NONE`.
    #[validate(custom(function = validation::validate_max_log_level))]
    #[serde(default = "default_max_log_level")]
    pub max_log_level: String,

    /// Subscriber output settings.
    #[validate(nested)]
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

fn default_max_log_level() -> String {
    "I".into()
}

impl Default for LoggateConfig {
    fn default() -> Self {
        Self {
            max_log_level: default_max_log_level(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl LoggateConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/loggate.yaml`, if present
    /// 3. `config/<LOGGATE_ENV>.yaml`, if `LOGGATE_ENV` is set and the file exists
    /// 4. `LOGGATE_*` environment variables (`__` separates nested keys)
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(LoggateConfig::default()));

        let base = format!("{CONFIG_DIR}/loggate.yaml");
        if Path::new(&base).exists() {
            figment = figment.merge(Yaml::file(base));
        } else {
            tracing::debug!(path = %base, "base configuration file not found, using defaults");
        }

        if let Ok(env) = std::env::var(ENV_SELECTOR) {
            let env_file = format!("{CONFIG_DIR}/{env}.yaml");
            if Path::new(&env_file).exists() {
                figment = figment.merge(Yaml::file(env_file));
            }
        }

        Self::extract_validated(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Load configuration from a specific file, with defaults underneath and
    /// `LOGGATE_*` variables on top.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        Self::extract_validated(
            Figment::from(Serialized::defaults(LoggateConfig::default()))
                .merge(Yaml::file(path))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    fn extract_validated(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }
}

/// A loaded configuration is itself a static store.
impl ConfigProvider for LoggateConfig {
    fn lookup(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            MAX_LOG_LEVEL_KEY => Ok(self.max_log_level.clone()),
            _ => Err(ConfigError::MissingKey(key.to_string())),
        }
    }
}

//! Configuration stores the gate reads its ceiling from.
//!
//! A store answers one question: what string is configured under a key. The
//! gate calls [`ConfigProvider::lookup`] on every emit, so implementations
//! that are expensive to query can be wrapped in a [`CachedProvider`].

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use figment::{
    error::Kind,
    providers::{Env, Format, Yaml},
    Figment,
};
use parking_lot::RwLock;
use validator::Validate;

use crate::{ConfigError, TelemetryConfig, CONFIG_DIR, ENV_PREFIX, ENV_SELECTOR};

/// A per-process configuration store that yields string settings by name.
pub trait ConfigProvider: Send + Sync {
    /// Returns the value stored under `key`.
    fn lookup(&self, key: &str) -> Result<String, ConfigError>;
}

impl<P: ConfigProvider + ?Sized> ConfigProvider for &P {
    fn lookup(&self, key: &str) -> Result<String, ConfigError> {
        (**self).lookup(key)
    }
}

impl<P: ConfigProvider + ?Sized> ConfigProvider for Arc<P> {
    fn lookup(&self, key: &str) -> Result<String, ConfigError> {
        (**self).lookup(key)
    }
}

impl<P: ConfigProvider + ?Sized> ConfigProvider for Box<P> {
    fn lookup(&self, key: &str) -> Result<String, ConfigError> {
        (**self).lookup(key)
    }
}

/// Fixed key/value metadata held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    values: HashMap<String, String>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a value, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl ConfigProvider for StaticProvider {
    fn lookup(&self, key: &str) -> Result<String, ConfigError> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))
    }
}

impl<K, V> FromIterator<(K, V)> for StaticProvider
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A store backed by a [`Figment`]. Each lookup extracts from the figment
/// again, so it reflects the sources as they are at call time.
#[derive(Debug, Clone)]
pub struct FigmentProvider {
    figment: Figment,
}

impl FigmentProvider {
    pub fn new(figment: Figment) -> Self {
        Self { figment }
    }

    /// Layers the same sources as [`crate::LoggateConfig::load`], minus the
    /// built-in defaults, so that an unset ceiling stays unset:
    ///
    /// 1. `config/loggate.yaml`
    /// 2. `config/<LOGGATE_ENV>.yaml`
    /// 3. `LOGGATE_*` environment variables.
    pub fn from_default_sources() -> Self {
        let mut figment = Figment::new();

        let base = format!("{CONFIG_DIR}/loggate.yaml");
        if Path::new(&base).exists() {
            figment = figment.merge(Yaml::file(base));
        } else {
            tracing::debug!(path = %base, "base configuration file not found");
        }

        if let Ok(env) = std::env::var(ENV_SELECTOR) {
            let env_file = format!("{CONFIG_DIR}/{env}.yaml");
            if Path::new(&env_file).exists() {
                figment = figment.merge(Yaml::file(env_file));
            }
        }

        Self::new(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// A YAML file overlaid with `LOGGATE_*` environment variables.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        Ok(Self::new(
            Figment::new()
                .merge(Yaml::file(path))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        ))
    }

    pub fn figment(&self) -> &Figment {
        &self.figment
    }

    /// The `telemetry` section, or its defaults when the section is absent.
    /// Read independently of `max_log_level`, so a bad ceiling does not stop
    /// the subscriber from being configured.
    pub fn telemetry(&self) -> Result<TelemetryConfig, ConfigError> {
        if !self.figment.contains("telemetry") {
            return Ok(TelemetryConfig::default());
        }
        let config: TelemetryConfig = self.figment.extract_inner("telemetry")?;
        config.validate()?;
        Ok(config)
    }
}

impl ConfigProvider for FigmentProvider {
    fn lookup(&self, key: &str) -> Result<String, ConfigError> {
        self.figment
            .extract_inner::<String>(key)
            .map_err(|err| match err.kind {
                Kind::MissingField(_) => ConfigError::MissingKey(key.to_string()),
                _ => ConfigError::Parsing(err),
            })
    }
}

/// Remembers the first successful answer for each key.
///
/// Failed lookups are not remembered; the next call asks the inner store again.
#[derive(Debug)]
pub struct CachedProvider<P> {
    inner: P,
    cache: RwLock<HashMap<String, String>>,
}

impl<P: ConfigProvider> CachedProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: ConfigProvider> ConfigProvider for CachedProvider<P> {
    fn lookup(&self, key: &str) -> Result<String, ConfigError> {
        if let Some(value) = self.cache.read().get(key) {
            return Ok(value.clone());
        }

        let value = self.inner.lookup(key)?;
        // Another thread may have raced us here; the first writer wins so all
        // callers observe one value for the life of the process.
        Ok(self
            .cache
            .write()
            .entry(key.to_string())
            .or_insert(value)
            .clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        calls: AtomicUsize,
        fail_first: bool,
    }

    impl ConfigProvider for CountingProvider {
        fn lookup(&self, key: &str) -> Result<String, ConfigError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_first && n == 0 {
                return Err(ConfigError::MissingKey(key.to_string()));
            }
            Ok("W".into())
        }
    }

    #[test]
    fn static_provider_reports_missing_key() {
        let provider = StaticProvider::new().with("max_log_level", "D");
        assert_eq!(provider.lookup("max_log_level").unwrap(), "D");
        let err = provider.lookup("other").unwrap_err();
        assert!(err.is_missing());
    }

    #[test]
    fn static_provider_collects_from_pairs() {
        let provider: StaticProvider = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(provider.lookup("b").unwrap(), "2");
    }

    #[test]
    fn figment_provider_reads_yaml_and_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("gate.yaml", "max_log_level: D\n")?;
            let provider = FigmentProvider::from_path("gate.yaml").unwrap();
            assert_eq!(provider.lookup("max_log_level").unwrap(), "D");

            jail.set_env("LOGGATE_MAX_LOG_LEVEL", "NONE");
            let provider = FigmentProvider::from_path("gate.yaml").unwrap();
            assert_eq!(provider.lookup("max_log_level").unwrap(), "NONE");
            Ok(())
        });
    }

    #[test]
    fn figment_provider_missing_key() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("gate.yaml", "unrelated: 1\n")?;
            let provider = FigmentProvider::from_path("gate.yaml").unwrap();
            let err = provider.lookup("max_log_level").unwrap_err();
            assert!(matches!(err, ConfigError::MissingKey(ref k) if k == "max_log_level"));
            Ok(())
        });
    }

    #[test]
    fn telemetry_section_survives_bad_ceiling() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "gate.yaml",
                "max_log_level: loud\ntelemetry:\n  filter: warn\n  ansi: false\n",
            )?;
            let provider = FigmentProvider::from_path("gate.yaml").unwrap();
            let telemetry = provider.telemetry().unwrap();
            assert_eq!(telemetry.filter, "warn");
            assert!(!telemetry.ansi);

            jail.create_file("bare.yaml", "max_log_level: I\n")?;
            let provider = FigmentProvider::from_path("bare.yaml").unwrap();
            assert_eq!(provider.telemetry().unwrap(), TelemetryConfig::default());
            Ok(())
        });
    }

    #[test]
    fn figment_provider_missing_file() {
        let err = FigmentProvider::from_path("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn figment_provider_sees_default_sources() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file("config/loggate.yaml", "max_log_level: I\n")?;
            jail.create_file("config/staging.yaml", "max_log_level: E\n")?;

            let provider = FigmentProvider::from_default_sources();
            assert_eq!(provider.lookup("max_log_level").unwrap(), "I");

            jail.set_env("LOGGATE_ENV", "staging");
            let provider = FigmentProvider::from_default_sources();
            assert_eq!(provider.lookup("max_log_level").unwrap(), "E");
            Ok(())
        });
    }

    #[test]
    fn cached_provider_reads_inner_once() {
        let cached = CachedProvider::new(CountingProvider {
            calls: AtomicUsize::new(0),
            fail_first: false,
        });
        for _ in 0..5 {
            assert_eq!(cached.lookup("max_log_level").unwrap(), "W");
        }
        assert_eq!(cached.into_inner().calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cached_provider_retries_after_failure() {
        let cached = CachedProvider::new(CountingProvider {
            calls: AtomicUsize::new(0),
            fail_first: true,
        });
        assert!(cached.lookup("max_log_level").is_err());
        assert_eq!(cached.lookup("max_log_level").unwrap(), "W");
        assert_eq!(cached.lookup("max_log_level").unwrap(), "W");
        assert_eq!(cached.into_inner().calls.load(Ordering::SeqCst), 2);
    }
}

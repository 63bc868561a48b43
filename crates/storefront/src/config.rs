//! # Configuration
//!
//! Layered in increasing precedence: built-in defaults, an optional TOML file,
//! `STOREFRONT_*` environment variables, then explicit overrides (CLI flags). The
//! result is validated before use.
//!
//! ```toml
//! [catalog]
//! base_url = "https://fakestoreapi.com"
//! timeout_secs = 100
//!
//! [cache]
//! ttl_secs = 300
//! max_entries = 64
//!
//! [history]
//! dir = "/var/lib/storefront"
//! capacity = 10
//!
//! [logging]
//! level = "info"
//! format = "compact"
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "storefront.toml";
pub const DEFAULT_HISTORY_KEY: &str = "@search_history";

#[derive(Clone, Debug, PartialEq)]
pub struct StorefrontConfig {
    pub catalog: CatalogConfig,
    pub cache: CacheConfig,
    pub history: HistoryConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatalogConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CacheConfig {
    pub ttl_secs: u64,
    pub max_entries: usize,
    pub buffer_size: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HistoryConfig {
    pub dir: PathBuf,
    pub key: String,
    pub capacity: usize,
    pub buffer_size: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub catalog_base_url: Option<String>,
    pub history_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig {
                base_url: "https://fakestoreapi.com".to_string(),
                timeout_secs: 100,
            },
            cache: CacheConfig {
                ttl_secs: 300,
                max_entries: 64,
                buffer_size: 32,
            },
            history: HistoryConfig {
                dir: default_history_dir(),
                key: DEFAULT_HISTORY_KEY.to_string(),
                capacity: 10,
                buffer_size: 16,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Compact,
            },
        }
    }
}

/// `<platform data dir>/storefront`, or `./storefront` where there is no data dir.
pub fn default_history_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("storefront")
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl StorefrontConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = resolve_config_path(options.config_path.as_deref()) {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options
                .config_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(catalog) = patch.catalog {
            if let Some(base_url) = catalog.base_url {
                self.catalog.base_url = base_url;
            }
            if let Some(timeout_secs) = catalog.timeout_secs {
                self.catalog.timeout_secs = timeout_secs;
            }
        }

        if let Some(cache) = patch.cache {
            if let Some(ttl_secs) = cache.ttl_secs {
                self.cache.ttl_secs = ttl_secs;
            }
            if let Some(max_entries) = cache.max_entries {
                self.cache.max_entries = max_entries;
            }
        }

        if let Some(history) = patch.history {
            if let Some(dir) = history.dir {
                self.history.dir = dir;
            }
            if let Some(key) = history.key {
                self.history.key = key;
            }
            if let Some(capacity) = history.capacity {
                self.history.capacity = capacity;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("STOREFRONT_CATALOG_BASE_URL") {
            self.catalog.base_url = value;
        }
        if let Some(value) = read_env("STOREFRONT_CATALOG_TIMEOUT_SECS") {
            self.catalog.timeout_secs = parse_env("STOREFRONT_CATALOG_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("STOREFRONT_CACHE_TTL_SECS") {
            self.cache.ttl_secs = parse_env("STOREFRONT_CACHE_TTL_SECS", &value)?;
        }
        if let Some(value) = read_env("STOREFRONT_CACHE_MAX_ENTRIES") {
            self.cache.max_entries = parse_env("STOREFRONT_CACHE_MAX_ENTRIES", &value)?;
        }

        if let Some(value) = read_env("STOREFRONT_HISTORY_DIR") {
            self.history.dir = PathBuf::from(value);
        }
        if let Some(value) = read_env("STOREFRONT_HISTORY_CAPACITY") {
            self.history.capacity = parse_env("STOREFRONT_HISTORY_CAPACITY", &value)?;
        }

        if let Some(value) = read_env("STOREFRONT_LOG_LEVEL") {
            self.logging.level = value;
        }
        if let Some(value) = read_env("STOREFRONT_LOG_FORMAT") {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(base_url) = overrides.catalog_base_url {
            self.catalog.base_url = base_url;
        }
        if let Some(dir) = overrides.history_dir {
            self.history.dir = dir;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(format) = overrides.log_format {
            self.logging.format = format;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_catalog(&self.catalog)?;
        validate_cache(&self.cache)?;
        validate_history(&self.history)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from("config/storefront.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str::<ConfigPatch>(&raw).map_err(|source| ConfigError::ParseFile {
        path: path.to_path_buf(),
        source,
    })
}

fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigError> {
    if !catalog.base_url.starts_with("http://") && !catalog.base_url.starts_with("https://") {
        return Err(ConfigError::Validation(
            "catalog.base_url must start with http:// or https://".to_string(),
        ));
    }
    if catalog.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "catalog.timeout_secs must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

fn validate_cache(cache: &CacheConfig) -> Result<(), ConfigError> {
    if cache.buffer_size == 0 {
        return Err(ConfigError::Validation(
            "cache.buffer_size must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

fn validate_history(history: &HistoryConfig) -> Result<(), ConfigError> {
    if history.capacity == 0 {
        return Err(ConfigError::Validation(
            "history.capacity must be greater than zero".to_string(),
        ));
    }
    if history.key.trim().is_empty() {
        return Err(ConfigError::Validation("history.key must not be empty".to_string()));
    }
    if history.buffer_size == 0 {
        return Err(ConfigError::Validation(
            "history.buffer_size must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidEnvOverride {
            key: key.to_string(),
            value: value.to_string(),
        })
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigPatch {
    catalog: Option<CatalogPatch>,
    cache: Option<CachePatch>,
    history: Option<HistoryPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct CachePatch {
    ttl_secs: Option<u64>,
    max_entries: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct HistoryPatch {
    dir: Option<PathBuf>,
    key: Option<String>,
    capacity: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::{Mutex, MutexGuard, OnceLock};

    use tempfile::TempDir;

    use super::*;

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    const VARS: &[&str] = &[
        "STOREFRONT_CATALOG_BASE_URL",
        "STOREFRONT_CATALOG_TIMEOUT_SECS",
        "STOREFRONT_CACHE_TTL_SECS",
        "STOREFRONT_CACHE_MAX_ENTRIES",
        "STOREFRONT_HISTORY_DIR",
        "STOREFRONT_HISTORY_CAPACITY",
        "STOREFRONT_LOG_LEVEL",
        "STOREFRONT_LOG_FORMAT",
    ];

    fn env_lock() -> MutexGuard<'static, ()> {
        let guard = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        clear_vars();
        guard
    }

    fn clear_vars() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn missing_file(dir: &TempDir) -> LoadOptions {
        LoadOptions {
            config_path: Some(dir.path().join("absent.toml")),
            ..LoadOptions::default()
        }
    }

    #[test]
    fn test_defaults_when_nothing_is_configured() {
        let _guard = env_lock();
        let dir = TempDir::new().unwrap();

        let config = StorefrontConfig::load(missing_file(&dir)).unwrap();
        assert_eq!(config.catalog.base_url, "https://fakestoreapi.com");
        assert_eq!(config.catalog.timeout_secs, 100);
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.history.key, "@search_history");
        assert_eq!(config.history.capacity, 10);
        assert!(config.history.dir.ends_with("storefront"));
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn test_precedence_defaults_file_env_overrides() {
        let _guard = env_lock();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storefront.toml");
        fs::write(
            &path,
            r#"
[catalog]
base_url = "http://from-file.test"
timeout_secs = 7

[history]
capacity = 3

[logging]
level = "warn"
format = "json"
"#,
        )
        .unwrap();

        env::set_var("STOREFRONT_CATALOG_BASE_URL", "http://from-env.test");
        env::set_var("STOREFRONT_HISTORY_CAPACITY", "5");

        let result = StorefrontConfig::load(LoadOptions {
            config_path: Some(path),
            overrides: ConfigOverrides {
                catalog_base_url: Some("http://from-override.test".to_string()),
                log_level: Some("debug".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        });
        clear_vars();

        let config = result.unwrap();
        assert_eq!(config.catalog.base_url, "http://from-override.test");
        assert_eq!(config.catalog.timeout_secs, 7);
        assert_eq!(config.history.capacity, 5);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_env_value_is_reported() {
        let _guard = env_lock();
        let dir = TempDir::new().unwrap();
        env::set_var("STOREFRONT_CACHE_TTL_SECS", "soon");

        let result = StorefrontConfig::load(missing_file(&dir));
        clear_vars();

        match result {
            Err(ConfigError::InvalidEnvOverride { key, value }) => {
                assert_eq!(key, "STOREFRONT_CACHE_TTL_SECS");
                assert_eq!(value, "soon");
            }
            other => panic!("expected InvalidEnvOverride, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_rejects_zero_capacity_and_bad_url() {
        let _guard = env_lock();
        let dir = TempDir::new().unwrap();

        env::set_var("STOREFRONT_HISTORY_CAPACITY", "0");
        let result = StorefrontConfig::load(missing_file(&dir));
        clear_vars();
        assert!(matches!(
            result,
            Err(ConfigError::Validation(msg)) if msg.contains("history.capacity")
        ));

        let result = StorefrontConfig::load(LoadOptions {
            overrides: ConfigOverrides {
                catalog_base_url: Some("ftp://catalog".to_string()),
                ..ConfigOverrides::default()
            },
            ..missing_file(&dir)
        });
        assert!(matches!(
            result,
            Err(ConfigError::Validation(msg)) if msg.contains("catalog.base_url")
        ));
    }

    #[test]
    fn test_required_file_must_exist() {
        let _guard = env_lock();
        let result = StorefrontConfig::load(LoadOptions {
            config_path: Some(PathBuf::from("/nonexistent/storefront.toml")),
            require_file: true,
            ..LoadOptions::default()
        });
        assert!(matches!(result, Err(ConfigError::MissingConfigFile(_))));
    }

    #[test]
    fn test_unknown_section_fails_to_parse() {
        let _guard = env_lock();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storefront.toml");
        fs::write(&path, "[checkout]\nenabled = true\n").unwrap();

        let result = StorefrontConfig::load(LoadOptions {
            config_path: Some(path),
            ..LoadOptions::default()
        });
        assert!(matches!(result, Err(ConfigError::ParseFile { .. })));
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(" JSON ".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}

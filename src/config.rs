//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_API_URL;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// File this config was read from, if any
    #[serde(skip)]
    source: Option<PathBuf>,

    /// Problems skipped over while loading
    #[serde(skip)]
    warnings: Vec<ConfigWarning>,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Analytics backend location
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
        }
    }
}

/// Dashboard refresh configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    #[serde(default = "default_user_limit")]
    pub user_limit: u32,

    #[serde(default = "default_timeline_days")]
    pub timeline_days: u32,
}

fn default_refresh_interval() -> u64 {
    30
}

fn default_user_limit() -> u32 {
    50
}

fn default_timeline_days() -> u32 {
    30
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
            user_limit: default_user_limit(),
            timeline_days: default_timeline_days(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.source = Some(path.to_path_buf());
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// Runs before logging is set up, so anything skipped is recorded in
    /// [`Config::warnings`] for the caller to report.
    pub fn load_default() -> Self {
        Self::load_first(default_config_paths(), |key| std::env::var(key).ok())
    }

    /// First readable file among `paths`, else defaults; then env overrides
    fn load_first<F>(paths: Vec<PathBuf>, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut skipped = Vec::new();
        let mut config = None;

        for path in paths.into_iter().filter(|path| path.exists()) {
            match Self::load(&path) {
                Ok(mut loaded) => {
                    loaded.source = Some(path);
                    config = Some(loaded);
                    break;
                }
                Err(e) => skipped.push(ConfigWarning::SkippedFile(e.to_string())),
            }
        }

        let mut config = config.unwrap_or_default();
        config.warnings = skipped;
        config.apply_overrides(var);
        config
    }

    /// File the config came from; `None` means defaults plus environment
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var("CHURNWATCH_API_URL") {
            self.api.url = url;
        }

        if let Some(secs) = var("CHURNWATCH_REFRESH_SECS") {
            match secs.parse() {
                Ok(secs) => self.dashboard.refresh_interval_secs = secs,
                Err(_) => self.warnings.push(ConfigWarning::InvalidEnv {
                    key: "CHURNWATCH_REFRESH_SECS",
                    value: secs,
                }),
            }
        }

        if let Some(level) = var("CHURNWATCH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("CHURNWATCH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

fn default_config_paths() -> Vec<PathBuf> {
    [
        dirs::config_dir().map(|p| p.join("churnwatch").join("config.toml")),
        Some(PathBuf::from("./churnwatch.toml")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// A config source that was ignored in favour of defaults
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigWarning {
    #[error("Ignoring config file: {0}")]
    SkippedFile(String),

    #[error("Ignoring invalid {key}={value}")]
    InvalidEnv { key: &'static str, value: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Churnwatch Configuration
#
# Environment variables override these settings:
# - CHURNWATCH_API_URL
# - CHURNWATCH_REFRESH_SECS
# - CHURNWATCH_LOG_LEVEL
# - CHURNWATCH_LOG_FORMAT

[api]
# Analytics backend base URL
url = "http://localhost:8000"

[dashboard]
# Seconds between automatic refreshes
refresh_interval_secs = 30

# Users shown in the risk table
user_limit = 50

# Days of prediction history in the chart
timeline_days = 30

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `vibrae.toml` in the working directory unless `--config` names
//! another file. Every field has a default so the file is optional.
//! Environment variables take precedence over file values.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;
use vibrae_adapter_http_reqwest::HttpConfig;
use vibrae_adapter_token_store_fs::default_token_path;
use vibrae_adapter_ws_tungstenite::WsConfig;
use vibrae_domain::logs::DEFAULT_TAIL;
use vibrae_domain::recurrence::Locale;

const DEFAULT_FILE: &str = "vibrae.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend location.
    pub api: HttpConfig,
    /// Where the bearer token is kept.
    pub session: SessionConfig,
    /// Push socket settings.
    pub live: WsConfig,
    /// Log viewer settings.
    pub logs: LogsConfig,
    /// Output language.
    pub display: DisplayConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Token file; defaults to `<config dir>/vibrae/token`.
    pub token_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogsConfig {
    /// Lines fetched by `logs show` when `--tail` is not given.
    pub default_tail: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Language of recurrence summaries.
    pub locale: Locale,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `path` (or `vibrae.toml` if present) then
    /// apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed, if an explicitly named
    /// file cannot be read, or if a value fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::from_optional_file(Path::new(DEFAULT_FILE))?,
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    fn from_optional_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(val) = env("VIBRAE_API_URL") {
            self.api.base_url = val;
        }
        if let Some(val) = env("VIBRAE_TOKEN_PATH") {
            self.session.token_path = Some(PathBuf::from(val));
        }
        if let Some(delay) = env("VIBRAE_RECONNECT_DELAY").and_then(|val| val.parse().ok()) {
            self.live.reconnect_delay_secs = delay;
        }
        if let Some(val) = env("VIBRAE_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = env("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let base = Url::parse(self.api.base_url.trim()).map_err(|err| {
            ConfigError::Validation(format!("api.base_url `{}`: {err}", self.api.base_url))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "api.base_url must use http or https, got `{}`",
                base.scheme()
            )));
        }
        if self.live.reconnect_delay_secs == 0 {
            return Err(ConfigError::Validation(
                "live.reconnect_delay_secs must be non-zero".to_string(),
            ));
        }
        if self.logs.default_tail == 0 {
            return Err(ConfigError::Validation(
                "logs.default_tail must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// The token file, falling back to the per-user config directory.
    #[must_use]
    pub fn token_path(&self) -> PathBuf {
        self.session
            .token_path
            .clone()
            .unwrap_or_else(default_token_path)
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            default_tail: DEFAULT_TAIL,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "vibrae=info,vibrae_app=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

//! Configuration management for the WBB content client.
//!
//! Parses `wbb.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! Settings are layered, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. `wbb.toml` (explicit path or discovered)
//! 3. The `WBB_API_URL` environment variable (base URL only)
//! 4. [`CliSettings`]
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `api.base_url`
//! - `session.dir`

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Environment variable carrying the content API base URL.
pub const API_URL_ENV: &str = "WBB_API_URL";

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "wbb.toml";

/// Default content cache window (5 minutes).
const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override API base URL.
    pub api_url: Option<String>,
    /// Override content cache window in seconds.
    pub cache_ttl_secs: Option<u64>,
    /// Override session directory.
    pub session_dir: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content API configuration.
    pub api: ApiConfig,
    /// Content loader configuration.
    pub content: ContentConfig,
    /// Session configuration (paths are relative strings from TOML).
    session: SessionConfigRaw,

    /// Resolved session configuration (set after loading).
    #[serde(skip)]
    pub session_resolved: SessionConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Content API configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API base URL, e.g. `https://cms.example.org/api`.
    pub base_url: String,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum accepted size of a downloaded PDF, in megabytes.
    pub max_download_mb: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: 30,
            max_download_mb: 50,
        }
    }
}

impl ApiConfig {
    /// HTTP timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Maximum download size in bytes.
    #[must_use]
    pub fn max_download_bytes(&self) -> u64 {
        self.max_download_mb.saturating_mul(1024 * 1024)
    }
}

/// Content loader configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// How long a loaded snapshot is served without re-fetching.
    pub cache_ttl_secs: u64,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl ContentConfig {
    /// Cache window as a [`Duration`].
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

/// Raw session configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SessionConfigRaw {
    dir: Option<String>,
}

/// Resolved session configuration with absolute paths.
#[derive(Debug, Default)]
pub struct SessionConfig {
    /// Directory holding persisted session keys. `None` keeps the session
    /// in memory for the current run.
    pub dir: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`api.base_url`").
        field: String,
        /// Error message (e.g., "${`WBB_API_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `wbb.toml` in current directory and parents.
    ///
    /// The `WBB_API_URL` environment variable is applied after the file, and
    /// CLI settings after that.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        config.apply_env_overrides(|name| std::env::var(name).ok());

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply environment overrides using the given variable lookup.
    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(API_URL_ENV).filter(|url| !url.trim().is_empty()) {
            self.api.base_url = url.trim().to_owned();
        }
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(api_url) = &settings.api_url {
            self.api.base_url.clone_from(api_url);
        }
        if let Some(ttl) = settings.cache_ttl_secs {
            self.content.cache_ttl_secs = ttl;
        }
        if let Some(dir) = &settings.session_dir {
            self.session_resolved.dir = Some(dir.clone());
        }
    }

    /// Get the validated API base URL without a trailing slash.
    ///
    /// Use this instead of reading `api.base_url` directly when a command
    /// needs to talk to the content API.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the URL is unset or not http(s).
    pub fn require_api_url(&self) -> Result<&str, ConfigError> {
        let url = self.api.base_url.trim_end_matches('/');
        require_non_empty(url, "api.base_url").map_err(|_| {
            ConfigError::Validation(format!(
                "api.base_url cannot be empty (set it in {CONFIG_FILENAME} or via {API_URL_ENV})"
            ))
        })?;
        require_http_url(url, "api.base_url")?;
        Ok(url)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }


    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// The base URL is not checked here because it may still be supplied by
    /// the environment or CLI; see [`Config::require_api_url`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        if self.api.max_download_mb == 0 {
            return Err(ConfigError::Validation(
                "api.max_download_mb must be greater than 0".to_owned(),
            ));
        }
        if !self.api.base_url.is_empty() {
            require_http_url(&self.api.base_url, "api.base_url")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.api.base_url = expand::expand_env(&self.api.base_url, "api.base_url")?;

        if let Some(ref dir) = self.session.dir {
            self.session.dir = Some(expand::expand_env(dir, "session.dir")?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.session_resolved = SessionConfig {
            dir: self.session.dir.as_deref().map(|d| config_dir.join(d)),
        };
    }
}

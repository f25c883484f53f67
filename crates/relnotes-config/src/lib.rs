//! Configuration management for relnotes.
//!
//! Parses `relnotes.toml` with serde and provides auto-discovery of the file
//! in parent directories.
//!
//! ```toml
//! [repository]
//! url = "https://github.com/owner/repo"
//!
//! [[autolinks]]
//! prefix = "JIRA-"
//! url = "https://jira.example.com/browse/JIRA-<num>"
//! alphanumeric = true
//! ```
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `repository.url` and every `autolinks[].url` support `${VAR}` and
//! `${VAR:-default}`.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Placeholder that every autolink URL must contain.
pub const AUTOLINK_PLACEHOLDER: &str = "<num>";

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "relnotes.toml";

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override repository URL.
    pub repository_url: Option<String>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target repository.
    pub repository: RepositoryConfig,
    /// External references in priority order.
    pub autolinks: Vec<AutolinkConfig>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Target repository configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Repository URL, e.g. `https://github.com/owner/repo`.
    pub url: Option<String>,
}

/// External reference definition, shaped like the forge's autolink settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AutolinkConfig {
    /// Reference prefix, e.g. `JIRA-`.
    pub prefix: String,
    /// Target URL containing `<num>`.
    pub url: String,
    /// Whether the suffix may contain letters and `_` (default: digits only).
    #[serde(default)]
    pub alphanumeric: bool,
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
        /// Config field path (e.g., "`repository.url`").
        field: String,
        /// Error message (e.g., "${`GITHUB_REPO`} not set").
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
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `relnotes.toml` in the current directory and its parents, falling
    /// back to an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
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

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(url) = &settings.repository_url {
            self.repository.url = Some(url.clone());
        }
    }

    /// Get the validated repository URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if no repository URL is configured.
    pub fn require_repository_url(&self) -> Result<&str, ConfigError> {
        let url = self.repository.url.as_deref().ok_or_else(|| {
            ConfigError::Validation(
                "repository.url is required (set it in relnotes.toml or pass --repo)".to_owned(),
            )
        })?;
        require_non_empty(url, "repository.url")?;
        require_http_url(url, "repository.url")?;
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
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// A missing repository URL is not an error here; commands that need one
    /// call [`require_repository_url`](Self::require_repository_url).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.repository.url {
            require_non_empty(url, "repository.url")?;
            require_http_url(url, "repository.url")?;
        }
        self.validate_autolinks()
    }

    /// Validate autolink definitions.
    fn validate_autolinks(&self) -> Result<(), ConfigError> {
        for (i, autolink) in self.autolinks.iter().enumerate() {
            require_non_empty(&autolink.prefix, &format!("autolinks[{i}].prefix"))?;
            require_non_empty(&autolink.url, &format!("autolinks[{i}].url"))?;
            if !autolink.url.contains(AUTOLINK_PLACEHOLDER) {
                return Err(ConfigError::Validation(format!(
                    "autolinks[{i}].url must contain {AUTOLINK_PLACEHOLDER}"
                )));
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref url) = self.repository.url {
            self.repository.url = Some(expand::expand_env(url, "repository.url")?);
        }
        for (i, autolink) in self.autolinks.iter_mut().enumerate() {
            autolink.url = expand::expand_env(&autolink.url, &format!("autolinks[{i}].url"))?;
        }
        Ok(())
    }
}

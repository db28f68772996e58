//! Configuration loading and persistence.

use super::Config;
use crate::env::{self, vars};
use crate::error::ConfigError;
use crate::paths;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Platform opener used when no browser is configured.
#[cfg(target_os = "macos")]
pub const PLATFORM_OPENER: &str = "open";

/// Platform opener used when no browser is configured.
#[cfg(not(target_os = "macos"))]
pub const PLATFORM_OPENER: &str = "xdg-open";

impl Config {
    /// Load configuration from the default path.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = paths::config_file()?;
        Self::load(&path)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        debug!(path = %path.display(), "loading config");
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load configuration from the default path, falling back to defaults if no file exists.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match Self::load_default() {
            Ok(config) => Ok(config),
            Err(ConfigError::NotFound(path)) => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Parse configuration from a string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self =
            json5::from_str(content).map_err(|e| ConfigError::Json5(e.to_string()))?;
        config.password_store = paths::expand_tilde(&config.password_store.to_string_lossy());
        Ok(config)
    }

    /// Save configuration to a file path.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_json5()?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Serialize to JSON5 string.
    pub fn to_json5(&self) -> Result<String, ConfigError> {
        // json5 has no serializer; plain JSON is valid JSON5
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate the configuration, collecting all errors before returning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.password_key.trim().is_empty() {
            errors.push("password_key must not be empty".to_string());
        }

        if self.pass_command.trim().is_empty() {
            errors.push("pass_command must not be empty".to_string());
        }

        if !self.password_store.is_absolute() {
            errors.push(format!(
                "password_store must be an absolute path, got '{}'",
                self.password_store.display()
            ));
        }

        if let Some(browser) = &self.browser {
            if browser.trim().is_empty() {
                errors.push("browser must not be empty when set".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }

    /// Resolve the browser command: `$BROWSER`, then `browser`, then the platform opener.
    pub fn browser_command(&self) -> String {
        env::get_var(vars::BROWSER)
            .or_else(|| self.browser.clone())
            .unwrap_or_else(|| PLATFORM_OPENER.to_string())
    }
}

/// Configuration builder for creating configs programmatically.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new config builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the password store root.
    pub fn password_store(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.password_store = dir.into();
        self
    }

    /// Set the attribute key for the secret line.
    pub fn password_key(mut self, key: impl Into<String>) -> Self {
        self.config.password_key = key.into();
        self
    }

    /// Set the browser used by `open_url`.
    pub fn browser(mut self, browser: impl Into<String>) -> Self {
        self.config.browser = Some(browser.into());
        self
    }

    /// Set the decryption command.
    pub fn pass_command(mut self, command: impl Into<String>) -> Self {
        self.config.pass_command = command.into();
        self
    }

    /// Build the config.
    pub fn build(self) -> Config {
        self.config
    }

    /// Validate and build the config, returning an error if validation fails.
    pub fn build_validated(self) -> Result<Config, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

//! Configuration schema definitions.

use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default mapping key under which an entry's secret line is stored.
pub const DEFAULT_PASSWORD_KEY: &str = "pass";

/// Default executable used to decrypt entries.
pub const DEFAULT_PASS_COMMAND: &str = "pass";

/// Main autopass configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root directory of the password store. Entry names are relative to it.
    #[serde(default = "paths::default_password_store")]
    pub password_store: PathBuf,

    /// Attribute key that receives the first (secret) line of an entry.
    #[serde(default = "default_password_key")]
    pub password_key: String,

    /// Browser used to open entry URLs. `$BROWSER` takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,

    /// Executable invoked as `<pass_command> show <name>`.
    #[serde(default = "default_pass_command")]
    pub pass_command: String,
}

fn default_password_key() -> String {
    DEFAULT_PASSWORD_KEY.to_string()
}

fn default_pass_command() -> String {
    DEFAULT_PASS_COMMAND.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            password_store: paths::default_password_store(),
            password_key: default_password_key(),
            browser: None,
            pass_command: default_pass_command(),
        }
    }
}

impl Config {
    /// Create a configuration rooted at `password_store` with default settings.
    pub fn with_store(password_store: impl Into<PathBuf>) -> Self {
        Self {
            password_store: password_store.into(),
            ..Self::default()
        }
    }
}

//! Path resolution utilities.

use crate::env::{self, vars};
use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// Suffix `pass` gives every encrypted entry file.
pub const ENTRY_SUFFIX: &str = ".gpg";

fn home_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or_else(|| {
        ConfigError::Validation("Could not determine home directory".to_string())
    })
}

/// Get the autopass config directory (~/.config/autopass).
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let base = match dirs::config_dir() {
        Some(dir) => dir,
        None => home_dir()?.join(".config"),
    };
    Ok(base.join("autopass"))
}

/// Get the main config file path (~/.config/autopass/config.json5).
///
/// `AUTOPASS_CONFIG` overrides the location.
pub fn config_file() -> Result<PathBuf, ConfigError> {
    if let Some(path) = env::get_var(vars::AUTOPASS_CONFIG) {
        return Ok(expand_tilde(&path));
    }
    Ok(config_dir()?.join("config.json5"))
}

/// Get the autopass cache directory (~/.cache/autopass).
pub fn cache_dir() -> Result<PathBuf, ConfigError> {
    let base = match dirs::cache_dir() {
        Some(dir) => dir,
        None => home_dir()?.join(".cache"),
    };
    Ok(base.join("autopass"))
}

/// Get the entry cache file path (~/.cache/autopass/entries.json).
pub fn entry_cache_file() -> Result<PathBuf, ConfigError> {
    Ok(cache_dir()?.join("entries.json"))
}

/// Default password store root: `$PASSWORD_STORE_DIR` or `~/.password-store`.
pub fn default_password_store() -> PathBuf {
    match env::get_var(vars::PASSWORD_STORE_DIR) {
        Some(dir) => expand_tilde(&dir),
        None => expand_tilde("~/.password-store"),
    }
}

/// Expand tilde (~) in a path.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Derive an entry's logical name from its file path relative to the store root.
///
/// Returns `None` when `file` does not live under `store`.
pub fn entry_name(file: &Path, store: &Path) -> Option<String> {
    let relative = file.strip_prefix(store).ok()?;
    let relative = relative.to_string_lossy();
    let name = relative.strip_suffix(ENTRY_SUFFIX).unwrap_or(&*relative);
    if name.is_empty() {
        return None;
    }
    Some(name.to_string())
}

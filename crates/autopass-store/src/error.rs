//! Error types for password-store entries.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while working with store entries.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No URL found for this entry")]
    UrlNotFound,

    #[error("Entry not found: {0}")]
    NotFound(String),

    #[error("`{command} show {name}` failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        name: String,
        status: String,
        stderr: String,
    },

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Invalid entry name: {0}")]
    InvalidName(String),

    #[error("Entry path {path} is not inside the password store {store}")]
    InvalidEntryPath { path: PathBuf, store: PathBuf },

    #[error("Invalid window pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] autopass_core::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

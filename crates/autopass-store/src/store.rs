//! Secret store backends.
//!
//! Defines the [`SecretStore`] trait and provides [`PassStore`], which shells
//! out to `pass show <name>` and returns the decrypted entry.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use autopass_core::Config;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::types::DecryptedSecret;

/// Maximum allowed length for an entry name.
const MAX_NAME_LEN: usize = 4096;

/// Marker `pass` prints when asked for an entry it does not have.
const NOT_IN_STORE: &str = "is not in the password store";

/// Trait for services that decrypt entries by logical name.
///
/// Calls block until the plaintext is available. Failures here are access
/// failures and are propagated to the caller unchanged.
pub trait SecretStore {
    /// Decrypt the entry called `name`.
    fn show(&self, name: &str) -> Result<DecryptedSecret>;
}

/// A [`SecretStore`] backed by the `pass` command-line tool.
#[derive(Debug, Clone)]
pub struct PassStore {
    command: String,
    store_dir: PathBuf,
}

impl PassStore {
    /// Create a store that runs `command` against `store_dir`.
    pub fn new(command: impl Into<String>, store_dir: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            store_dir: store_dir.into(),
        }
    }

    /// Create a store from the configured command and store root.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.pass_command.clone(), config.password_store.clone())
    }

    /// The executable invoked for decryption.
    pub fn command(&self) -> &str {
        &self.command
    }
}

/// Validate that an entry name cannot escape the store or confuse `pass`.
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(StoreError::InvalidName(
            "name must not be empty".to_string(),
        ));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(StoreError::InvalidName(format!(
            "name exceeds maximum length of {MAX_NAME_LEN} characters"
        )));
    }
    if name.starts_with('/') {
        return Err(StoreError::InvalidName(format!(
            "name must be relative to the store: {name}"
        )));
    }
    if name.split('/').any(|segment| segment == "..") {
        return Err(StoreError::InvalidName(format!(
            "name must not contain '..' segments: {name}"
        )));
    }
    if name.chars().any(|c| c == '\0' || c == '\n') {
        return Err(StoreError::InvalidName(format!(
            "name contains control characters: {name:?}"
        )));
    }
    Ok(())
}

impl SecretStore for PassStore {
    fn show(&self, name: &str) -> Result<DecryptedSecret> {
        validate_name(name)?;

        let mut cmd = Command::new(&self.command);
        cmd.arg("show")
            .arg("--")
            .arg(name)
            .env("PASSWORD_STORE_DIR", &self.store_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = cmd.output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            debug!(name, status = %output.status, "pass show failed");
            if stderr.contains(NOT_IN_STORE) {
                return Err(StoreError::NotFound(name.to_string()));
            }
            return Err(StoreError::CommandFailed {
                command: self.command.clone(),
                name: name.to_string(),
                status: output.status.to_string(),
                stderr,
            });
        }

        let plaintext = String::from_utf8(output.stdout)
            .map_err(|e| StoreError::DecryptionFailed(format!("invalid UTF-8: {e}")))?;
        Ok(DecryptedSecret::new(plaintext))
    }
}

//! Core types for store entries.
//!
//! Provides the decrypted plaintext wrapper, the typed attribute mapping, and
//! the serializable snapshot used to cache entries between runs.

use autopass_core::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::checksum::Checksum;

/// Attribute key that always mirrors the entry's backing file path.
pub const PATH_KEY: &str = "path";

/// Attribute key that may rename an entry after decryption.
pub const NAME_KEY: &str = "name";

/// Attribute key holding the entry's URL.
pub const URL_KEY: &str = "url";

/// Attribute key holding an explicit window-title pattern.
pub const WINDOW_KEY: &str = "window";

/// Attribute key set to `true` when the decrypted content could not be parsed.
pub const ERROR_KEY: &str = "error";

/// Plaintext returned by a [`crate::SecretStore`].
///
/// Wraps `SecretString` so the plaintext is zeroed on drop. Debug and Display
/// both emit `[REDACTED]` to prevent accidental logging.
pub struct DecryptedSecret {
    inner: SecretString,
}

impl DecryptedSecret {
    /// Create a new decrypted secret from raw plaintext.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: SecretString::new(value),
        }
    }

    /// Expose the plaintext value. Use sparingly.
    pub fn expose(&self) -> &str {
        self.inner.expose_secret()
    }
}

impl fmt::Debug for DecryptedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for DecryptedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for DecryptedSecret {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// String-keyed entry metadata.
///
/// Values are whatever the entry's attribute block contained (strings,
/// numbers, lists, nested mappings). Lookups go through typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, Value>);

impl Attributes {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a raw value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a string value. Non-string values yield `None`.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// A scalar value as text. Numbers and booleans are rendered; empty
    /// strings and non-scalars yield `None`.
    pub fn scalar(&self, key: &str) -> Option<Cow<'_, str>> {
        match self.0.get(key)? {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(Cow::Borrowed(s)),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            _ => None,
        }
    }

    /// The entry URL, if present and non-empty.
    pub fn url(&self) -> Option<&str> {
        self.get_str(URL_KEY).filter(|s| !s.is_empty())
    }

    /// The explicit window-title pattern, if present and non-empty.
    pub fn window(&self) -> Option<&str> {
        self.get_str(WINDOW_KEY).filter(|s| !s.is_empty())
    }

    /// The secret stored under `password_key`.
    pub fn password(&self, password_key: &str) -> Option<&str> {
        self.get_str(password_key)
    }

    /// The backing file path.
    pub fn path(&self) -> Option<&str> {
        self.get_str(PATH_KEY)
    }

    /// Whether the content failed to parse.
    pub fn is_error(&self) -> bool {
        matches!(self.0.get(ERROR_KEY), Some(Value::Bool(true)))
    }

    /// Insert a value, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Force the `path` attribute to `path`.
    pub fn set_path(&mut self, path: &Path) {
        self.insert(PATH_KEY, path.to_string_lossy().into_owned());
    }

    /// Iterate over all attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The sentinel mapping used when content cannot be parsed.
    pub fn parse_error() -> Self {
        let mut attributes = Self::new();
        attributes.insert(ERROR_KEY, true);
        attributes
    }
}

impl FromIterator<(String, Value)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Serializable form of an [`crate::Entry`].
///
/// Produced by `Entry::snapshot` for caching and accepted by `Entry::new`.
/// A missing `checksum` is recomputed from the file on construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntrySnapshot {
    /// Logical entry name, relative to the store root without the `.gpg` suffix.
    pub name: String,

    /// Absolute path of the encrypted file.
    pub path: PathBuf,

    /// MD5 digest of the file at snapshot time.
    #[serde(default)]
    pub checksum: Option<Checksum>,

    /// Entry attributes, including `path`.
    #[serde(default)]
    pub user_attributes: Attributes,
}

impl EntrySnapshot {
    /// A snapshot with only a name and a path.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            checksum: None,
            user_attributes: Attributes::new(),
        }
    }
}

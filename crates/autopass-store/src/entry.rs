//! A single password-store entry.
//!
//! An [`Entry`] is cheap to create: only the file checksum is computed. The
//! encrypted payload is decrypted on demand by [`Entry::decrypt`], and
//! [`Entry::reload`] uses the checksum to skip decryption when the file has
//! not changed.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use autopass_core::{paths, Config, SecretString};
use regex::{Match, Regex, RegexBuilder};
use tracing::{debug, warn};

use crate::checksum::Checksum;
use crate::content::Content;
use crate::error::{Result, StoreError};
use crate::launcher::Launcher;
use crate::notify::{Notifier, ParseDiagnostic};
use crate::store::SecretStore;
use crate::types::{Attributes, EntrySnapshot, NAME_KEY, URL_KEY, WINDOW_KEY};

/// Collaborators an entry needs for decryption and URL launching.
#[derive(Clone, Copy)]
pub struct EntryContext<'a> {
    pub config: &'a Config,
    pub store: &'a dyn SecretStore,
    pub notifier: &'a dyn Notifier,
    pub launcher: &'a dyn Launcher,
}

impl<'a> EntryContext<'a> {
    pub fn new(
        config: &'a Config,
        store: &'a dyn SecretStore,
        notifier: &'a dyn Notifier,
        launcher: &'a dyn Launcher,
    ) -> Self {
        Self {
            config,
            store,
            notifier,
            launcher,
        }
    }
}

/// A credential backed by an encrypted file in the password store.
///
/// Identity is `(checksum, path)`: two entries for the same unchanged file are
/// equal whether or not either has been decrypted.
#[derive(Clone)]
pub struct Entry {
    name: String,
    path: PathBuf,
    checksum: Option<Checksum>,
    attributes: Attributes,
    decrypted: bool,
}

impl Entry {
    /// Build an entry from a snapshot.
    ///
    /// Without a checksum in the snapshot, one is computed from the file now;
    /// a missing file simply leaves it unset.
    pub fn new(snapshot: EntrySnapshot, decrypted: bool) -> Self {
        let EntrySnapshot {
            name,
            path,
            checksum,
            user_attributes: mut attributes,
        } = snapshot;

        let checksum = checksum.or_else(|| Checksum::of_file(&path));
        attributes.set_path(&path);

        Self {
            name,
            path,
            checksum,
            attributes,
            decrypted,
        }
    }

    /// Load the entry stored at `file` inside `config.password_store`.
    pub fn load(file: impl Into<PathBuf>, config: &Config) -> Result<Self> {
        let path = file.into();
        let name = paths::entry_name(&path, &config.password_store).ok_or_else(|| {
            StoreError::InvalidEntryPath {
                path: path.clone(),
                store: config.password_store.clone(),
            }
        })?;
        Ok(Self::new(EntrySnapshot::new(name, path), false))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn checksum(&self) -> Option<&Checksum> {
        self.checksum.as_ref()
    }

    /// Attributes as of the last decryption. Only `path` is meaningful before that.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn is_decrypted(&self) -> bool {
        self.decrypted
    }

    /// The entry URL, if decrypted content provided one.
    pub fn url(&self) -> Option<&str> {
        self.attributes.url()
    }

    /// Last path segment of the name.
    pub fn basename(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Whether the backing file currently exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Serializable form for caching.
    pub fn snapshot(&self) -> EntrySnapshot {
        EntrySnapshot {
            name: self.name.clone(),
            path: self.path.clone(),
            checksum: self.checksum.clone(),
            user_attributes: self.attributes.clone(),
        }
    }

    /// Decrypt the entry and replace its attributes. No-op once decrypted.
    ///
    /// Store failures propagate. Malformed content does not: it is reported
    /// through the notifier and the attributes become `{"error": true}`.
    pub fn decrypt(&mut self, ctx: &EntryContext<'_>) -> Result<()> {
        if self.decrypted {
            return Ok(());
        }

        debug!(name = %self.name, "decrypting entry");
        let plaintext = ctx.store.show(&self.name)?;

        let mut attributes = self.parse_content(plaintext.expose(), ctx);
        attributes.set_path(&self.path);
        if let Some(name) = attributes.get_str(NAME_KEY) {
            self.name = name.to_string();
        }

        self.attributes = attributes;
        self.decrypted = true;
        Ok(())
    }

    /// Re-check the file and decrypt again if it changed.
    pub fn reload(&mut self, ctx: &EntryContext<'_>) -> Result<()> {
        let checksum = Checksum::of_file(&self.path);
        if checksum == self.checksum && self.decrypted {
            return Ok(());
        }

        debug!(name = %self.name, checksum = ?checksum, "entry changed, reloading");
        self.checksum = checksum;
        self.decrypted = false;
        self.decrypt(ctx)
    }

    /// Find this entry's pattern in a window title.
    ///
    /// The pattern is the `window` attribute as a regex, else the escaped
    /// `url`, else the escaped basename. Matching is case-insensitive.
    ///
    /// Empty `window` and `url` values count as absent, so an entry with
    /// `url: ""` falls back to its basename. Numeric values are used as text.
    pub fn match_window<'t>(&self, window_title: &'t str) -> Result<Option<Match<'t>>> {
        Ok(self.window_pattern()?.find(window_title))
    }

    /// Like [`Entry::match_window`], treating an invalid `window` pattern as no match.
    pub fn matches_window(&self, window_title: &str) -> bool {
        match self.match_window(window_title) {
            Ok(found) => found.is_some(),
            Err(e) => {
                warn!(name = %self.name, "ignoring window pattern: {e}");
                false
            }
        }
    }

    fn window_pattern(&self) -> Result<Regex> {
        let pattern = if let Some(window) = self.attributes.scalar(WINDOW_KEY) {
            window.into_owned()
        } else if let Some(url) = self.attributes.scalar(URL_KEY) {
            regex::escape(&url)
        } else {
            regex::escape(self.basename())
        };
        Ok(RegexBuilder::new(&pattern).case_insensitive(true).build()?)
    }

    /// Open the entry URL in a browser without waiting for it.
    pub fn open_url(&self, ctx: &EntryContext<'_>) -> Result<()> {
        let url = self
            .attributes
            .scalar(URL_KEY)
            .ok_or(StoreError::UrlNotFound)?;
        let browser = ctx.config.browser_command();
        debug!(name = %self.name, %browser, %url, "opening entry url");
        ctx.launcher.launch(&browser, &[url.as_ref()])
    }

    fn parse_content(&self, plaintext: &str, ctx: &EntryContext<'_>) -> Attributes {
        let content = Content::split(plaintext);
        match content.parse(&ctx.config.password_key) {
            Ok(attributes) => attributes,
            Err(e) => {
                let message = format!("Failed parsing entry '{}': {e}", self.name);
                let diagnostic = ParseDiagnostic {
                    secret_line: SecretString::new(content.secret_line),
                    attributes_block: content.attributes_block.to_string(),
                    error: e.to_string(),
                };
                ctx.notifier.notify(&message, &diagnostic);
                Attributes::parse_error()
            }
        }
    }
}

// Attributes hold the decrypted secret, so only their keys are shown.
impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("checksum", &self.checksum)
            .field("attributes", &self.attributes.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .field("decrypted", &self.decrypted)
            .finish()
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.checksum == other.checksum && self.path == other.path
    }
}

impl Eq for Entry {}

impl Hash for Entry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.checksum.hash(state);
        self.path.hash(state);
    }
}

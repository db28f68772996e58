//! On-disk cache of entry snapshots.
//!
//! Lets a later run reuse decrypted attributes without calling `pass` again.
//! Entries restored from the cache are still validated by `Entry::reload`,
//! which re-decrypts anything whose file changed.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::entry::Entry;
use crate::error::Result;
use crate::types::{EntrySnapshot, PATH_KEY};

/// Current cache file format.
const CACHE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    version: u32,
    entries: Vec<EntrySnapshot>,
}

/// A JSON file holding [`EntrySnapshot`]s.
#[derive(Debug, Clone)]
pub struct EntryCache {
    path: PathBuf,
}

impl EntryCache {
    /// Create a cache stored at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a cache at the default location (`~/.cache/autopass/entries.json`).
    pub fn from_default_path() -> Result<Self> {
        Ok(Self::new(autopass_core::paths::entry_cache_file()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all snapshots. A missing file is an empty cache.
    ///
    /// A cache written by a different format version is ignored.
    pub fn load(&self) -> Result<Vec<EntrySnapshot>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let data = fs::read_to_string(&self.path)?;
        let cache: CacheFile = serde_json::from_str(&data)?;
        if cache.version != CACHE_VERSION {
            warn!(
                path = %self.path.display(),
                version = cache.version,
                "ignoring entry cache with unsupported version"
            );
            return Ok(Vec::new());
        }

        debug!(path = %self.path.display(), count = cache.entries.len(), "loaded entry cache");
        Ok(cache.entries)
    }

    /// Restore cached entries.
    ///
    /// Snapshots with attributes beyond `path` are restored as decrypted.
    pub fn load_entries(&self) -> Result<Vec<Entry>> {
        Ok(self
            .load()?
            .into_iter()
            .map(|snapshot| {
                let decrypted = snapshot.user_attributes.iter().any(|(key, _)| key != PATH_KEY);
                Entry::new(snapshot, decrypted)
            })
            .collect())
    }

    /// Write snapshots of `entries`, replacing the previous cache.
    pub fn save<'a>(&self, entries: impl IntoIterator<Item = &'a Entry>) -> Result<()> {
        let cache = CacheFile {
            version: CACHE_VERSION,
            entries: entries.into_iter().map(Entry::snapshot).collect(),
        };
        let json = serde_json::to_string_pretty(&cache)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically
        let temp_path = self.path.with_extension("tmp");
        write_private(&temp_path, json.as_bytes())?;
        fs::rename(&temp_path, &self.path)?;

        debug!(path = %self.path.display(), count = cache.entries.len(), "saved entry cache");
        Ok(())
    }

    /// Delete the cache file if it exists.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Write `data` to `path` with mode 0600 on Unix; cached attributes include secrets.
fn write_private(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}

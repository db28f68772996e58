//! Shared fixtures for the integration tests.
//!
//! [`StoreFixture`] lays out a throwaway password store on disk, while
//! [`MapStore`], [`RecordingNotifier`] and [`RecordingLauncher`] stand in for
//! `pass`, the desktop notifier and the browser.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use autopass_core::Config;
use autopass_store::{
    DecryptedSecret, EntryContext, Launcher, Notifier, ParseDiagnostic, SecretStore, StoreError,
};
use tempfile::TempDir;

/// A temporary password store directory and the config pointing at it.
pub struct StoreFixture {
    pub dir: TempDir,
    pub config: Config,
}

impl StoreFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = Config::with_store(dir.path());
        Self { dir, config }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write the encrypted file for `name` and return its path.
    pub fn write_entry(&self, name: &str, ciphertext: &[u8]) -> PathBuf {
        let path = self.root().join(format!("{name}.gpg"));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, ciphertext).unwrap();
        path
    }
}

impl Default for StoreFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// An in-memory [`SecretStore`] keyed by entry name.
#[derive(Default)]
pub struct MapStore {
    contents: RefCell<HashMap<String, String>>,
    calls: Cell<usize>,
}

impl MapStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, name: &str, plaintext: &str) {
        self.contents
            .borrow_mut()
            .insert(name.to_string(), plaintext.to_string());
    }

    /// Number of `show` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl SecretStore for MapStore {
    fn show(&self, name: &str) -> autopass_store::Result<DecryptedSecret> {
        self.calls.set(self.calls.get() + 1);
        self.contents
            .borrow()
            .get(name)
            .map(DecryptedSecret::new)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }
}

/// A [`Notifier`] that keeps every message it receives.
#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: RefCell<Vec<(String, ParseDiagnostic)>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, diagnostic: &ParseDiagnostic) {
        self.messages
            .borrow_mut()
            .push((message.to_string(), diagnostic.clone()));
    }
}

/// A [`Launcher`] that records launches instead of spawning processes.
#[derive(Default)]
pub struct RecordingLauncher {
    pub launches: RefCell<Vec<(String, Vec<String>)>>,
}

impl Launcher for RecordingLauncher {
    fn launch(&self, program: &str, args: &[&str]) -> autopass_store::Result<()> {
        self.launches.borrow_mut().push((
            program.to_string(),
            args.iter().map(|arg| arg.to_string()).collect(),
        ));
        Ok(())
    }
}

/// Collaborators bundled for building an [`EntryContext`].
#[derive(Default)]
pub struct Doubles {
    pub store: MapStore,
    pub notifier: RecordingNotifier,
    pub launcher: RecordingLauncher,
}

impl Doubles {
    pub fn context<'a>(&'a self, config: &'a Config) -> EntryContext<'a> {
        EntryContext::new(config, &self.store, &self.notifier, &self.launcher)
    }
}

//! Password-store entries for autopass.
//!
//! An [`Entry`] wraps one encrypted file managed by `pass`. It is identified
//! by its path and content checksum, decrypts lazily through a
//! [`SecretStore`], and can be matched against window titles or open its URL
//! through a [`Launcher`].

pub mod cache;
pub mod checksum;
pub mod content;
pub mod entry;
pub mod error;
pub mod launcher;
pub mod notify;
pub mod store;
pub mod types;

pub use cache::EntryCache;
pub use checksum::Checksum;
pub use content::ContentParseError;
pub use entry::{Entry, EntryContext};
pub use error::{Result, StoreError};
pub use launcher::{Launcher, ProcessLauncher};
pub use notify::{Notifier, ParseDiagnostic, TracingNotifier};
pub use store::{PassStore, SecretStore};
pub use types::{Attributes, DecryptedSecret, EntrySnapshot};

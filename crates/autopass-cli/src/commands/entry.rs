//! Entry commands.
//!
//! Provides `autopass show|match|open`, built on `autopass_store::Entry`.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use autopass_core::Config;
use autopass_store::{
    Entry, EntryCache, EntryContext, PassStore, ProcessLauncher, StoreError, TracingNotifier,
};
use clap::Args;
use serde_json::Value;
use tracing::debug;

use crate::resolve_entry_path;

/// Arguments for `autopass show`.
#[derive(Args)]
pub struct ShowArgs {
    /// Entry name or path to its `.gpg` file
    pub entry: String,

    /// Print the secret instead of masking it
    #[arg(long)]
    pub reveal: bool,
}

/// Arguments for `autopass match`.
#[derive(Args)]
pub struct MatchArgs {
    /// Window title to match against
    pub window_title: String,

    /// Entry names or paths to check
    #[arg(required = true)]
    pub entries: Vec<String>,

    /// Do not read or update the entry cache
    #[arg(long)]
    pub no_cache: bool,
}

/// Arguments for `autopass open`.
#[derive(Args)]
pub struct OpenArgs {
    /// Entry name or path to its `.gpg` file
    pub entry: String,
}

/// Run `f` with an [`EntryContext`] wired to the real collaborators.
fn with_context<T>(config: &Config, f: impl FnOnce(&EntryContext<'_>) -> T) -> T {
    let store = PassStore::from_config(config);
    let ctx = EntryContext::new(config, &store, &TracingNotifier, &ProcessLauncher);
    f(&ctx)
}

fn load_decrypted(arg: &str, ctx: &EntryContext<'_>) -> anyhow::Result<Entry> {
    let path = resolve_entry_path(arg, ctx.config)?;
    let mut entry = Entry::load(&path, ctx.config)?;
    entry
        .decrypt(ctx)
        .with_context(|| format!("failed to decrypt '{}'", entry.name()))?;
    Ok(entry)
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Decrypt one entry and print its attributes.
pub fn show(args: ShowArgs, config: &Config) -> anyhow::Result<()> {
    with_context(config, |ctx| -> anyhow::Result<()> {
        let entry = load_decrypted(&args.entry, ctx)?;

        println!("{}", entry.name());
        for (key, value) in entry.attributes().iter() {
            let rendered = if key == &config.password_key && !args.reveal {
                "********".to_string()
            } else {
                render_value(value)
            };
            println!("  {key}: {rendered}");
        }
        Ok(())
    })
}

/// Print the names of the entries whose pattern matches the window title.
pub fn match_window(args: MatchArgs, config: &Config) -> anyhow::Result<()> {
    let cache = if args.no_cache {
        None
    } else {
        Some(EntryCache::from_default_path()?)
    };

    let mut cached: HashMap<PathBuf, Entry> = match &cache {
        Some(cache) => cache
            .load_entries()?
            .into_iter()
            .map(|entry| (entry.path().to_path_buf(), entry))
            .collect(),
        None => HashMap::new(),
    };

    let entries = with_context(config, |ctx| -> anyhow::Result<Vec<Entry>> {
        let mut entries = Vec::with_capacity(args.entries.len());
        for arg in &args.entries {
            let path = resolve_entry_path(arg, config)?;
            let mut entry = match cached.remove(&path) {
                Some(entry) => entry,
                None => Entry::load(&path, config)?,
            };
            entry
                .reload(ctx)
                .with_context(|| format!("failed to decrypt '{}'", entry.name()))?;

            if entry.matches_window(&args.window_title) {
                println!("{}", entry.name());
            } else {
                debug!(name = entry.name(), "no match");
            }
            entries.push(entry);
        }
        Ok(entries)
    })?;

    if let Some(cache) = cache {
        cache.save(entries.iter().chain(cached.values()))?;
    }
    Ok(())
}

/// Decrypt one entry and open its URL.
pub fn open(args: OpenArgs, config: &Config) -> anyhow::Result<()> {
    with_context(config, |ctx| -> anyhow::Result<()> {
        let entry = load_decrypted(&args.entry, ctx)?;
        match entry.open_url(ctx) {
            Err(StoreError::UrlNotFound) => {
                anyhow::bail!("entry '{}' has no url attribute", entry.name())
            }
            other => Ok(other?),
        }
    })
}

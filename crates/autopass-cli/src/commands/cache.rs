//! Entry cache commands.

use autopass_store::EntryCache;
use clap::Args;

/// Cache command arguments.
#[derive(Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommand,
}

#[derive(clap::Subcommand)]
pub enum CacheCommand {
    /// List cached entries
    List,

    /// Show the cache file path
    Path,

    /// Delete the cache file
    Clear,
}

/// Run the cache command.
pub fn run(args: CacheArgs) -> anyhow::Result<()> {
    let cache = EntryCache::from_default_path()?;

    match args.command {
        CacheCommand::List => {
            for snapshot in cache.load()? {
                let checksum = snapshot
                    .checksum
                    .as_ref()
                    .map(|c| c.as_str())
                    .unwrap_or("-");
                println!("{checksum}  {}", snapshot.name);
            }
        }

        CacheCommand::Path => {
            println!("{}", cache.path().display());
        }

        CacheCommand::Clear => {
            cache.clear()?;
            println!("Cleared {}", cache.path().display());
        }
    }

    Ok(())
}

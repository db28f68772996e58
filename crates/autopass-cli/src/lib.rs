//! autopass command-line interface.

pub mod commands;

use std::path::{Path, PathBuf};

use anyhow::Context;
use autopass_core::env::vars;
use autopass_core::paths::ENTRY_SUFFIX;
use autopass_core::Config;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// autopass - password-store entries for the focused window
#[derive(Parser)]
#[command(name = "autopass")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to config file
    #[arg(short, long, env = "AUTOPASS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Decrypt an entry and print its attributes
    Show(commands::entry::ShowArgs),

    /// Print the entries that match a window title
    Match(commands::entry::MatchArgs),

    /// Open an entry's URL in the browser
    Open(commands::entry::OpenArgs),

    /// Configuration management
    Config(commands::config::ConfigArgs),

    /// Entry cache management
    Cache(commands::cache::CacheArgs),

    /// Show version information
    Version,
}

/// Install the tracing subscriber. `AUTOPASS_LOG` overrides `verbose`.
pub fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "autopass=info",
        1 => "autopass=debug",
        _ => "autopass=trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(vars::AUTOPASS_LOG).unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config;
    match cli.command {
        Commands::Show(args) => commands::entry::show(args, &load_config(config_path.as_deref())?),
        Commands::Match(args) => {
            commands::entry::match_window(args, &load_config(config_path.as_deref())?)
        }
        Commands::Open(args) => commands::entry::open(args, &load_config(config_path.as_deref())?),
        Commands::Config(args) => commands::config::run(args, config_path.as_deref()),
        Commands::Cache(args) => commands::cache::run(args),
        Commands::Version => {
            println!("autopass {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Load the explicit config file, or the default one when present.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load_or_default().context("failed to load config")?,
    };
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Resolve a command-line entry argument to its encrypted file.
///
/// Existing paths are used as given (made absolute); anything else is treated
/// as an entry name inside the password store.
pub fn resolve_entry_path(arg: &str, config: &Config) -> anyhow::Result<PathBuf> {
    let path = Path::new(arg);
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    let candidate = std::env::current_dir()?.join(path);
    if candidate.is_file() {
        return Ok(candidate);
    }

    let name = arg.strip_suffix(ENTRY_SUFFIX).unwrap_or(arg);
    Ok(config.password_store.join(format!("{name}{ENTRY_SUFFIX}")))
}

//! autopass CLI entry point.

use autopass_cli::{init_logging, run, Cli};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Run the command
    run(cli)
}

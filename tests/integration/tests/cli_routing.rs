//! CLI routing integration tests.
//!
//! These drive `autopass_cli::run` directly with parsed arguments, using an
//! explicit `--config` path so the user's own configuration is never touched.

use autopass_cli::{run, Cli, Commands};
use clap::Parser;
use tempfile::TempDir;

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("autopass").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_cli_version() {
    run(cli(&["version"])).unwrap();
}

#[test]
fn test_cli_unknown_command() {
    assert!(Cli::try_parse_from(["autopass", "frobnicate"]).is_err());
}

#[test]
fn test_cli_config_init_and_validate() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json5");
    let path = path.to_str().unwrap();

    run(cli(&["--config", path, "config", "init"])).unwrap();
    run(cli(&["--config", path, "config", "validate"])).unwrap();
    run(cli(&["--config", path, "config", "show"])).unwrap();

    assert!(run(cli(&["--config", path, "config", "init"])).is_err());
    run(cli(&["--config", path, "config", "init", "--force"])).unwrap();
}

#[test]
fn test_cli_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json5");
    std::fs::write(&path, "{ password_key: '' }").unwrap();

    let result = run(cli(&["--config", path.to_str().unwrap(), "config", "validate"]));
    assert!(result.is_err());
}

#[test]
fn test_cli_open_entry_outside_store() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("store");
    std::fs::create_dir_all(&store).unwrap();
    let config = dir.path().join("config.json5");
    std::fs::write(
        &config,
        format!("{{ password_store: {:?} }}", store.to_str().unwrap()),
    )
    .unwrap();

    let stray = dir.path().join("stray.gpg");
    std::fs::write(&stray, b"x").unwrap();

    let parsed = cli(&[
        "--config",
        config.to_str().unwrap(),
        "open",
        stray.to_str().unwrap(),
    ]);
    assert!(matches!(parsed.command, Commands::Open(_)));
    assert!(run(parsed).is_err());
}

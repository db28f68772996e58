//! Config save/load roundtrip integration tests.

use std::path::{Path, PathBuf};

use autopass_core::config::{Config, ConfigBuilder};
use tempfile::TempDir;

#[test]
fn test_config_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json5");

    let config = Config::default();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.password_store, config.password_store);
    assert_eq!(loaded.password_key, config.password_key);
    assert_eq!(loaded.pass_command, config.pass_command);
    assert_eq!(loaded.browser, None);
}

#[test]
fn test_config_modify_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json5");

    let config = ConfigBuilder::new()
        .password_store("/srv/pass")
        .password_key("password")
        .browser("firefox")
        .build_validated()
        .unwrap();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.password_store, PathBuf::from("/srv/pass"));
    assert_eq!(loaded.password_key, "password");
    assert_eq!(loaded.browser.as_deref(), Some("firefox"));
}

#[test]
fn test_config_load_nonexistent() {
    let result = Config::load(Path::new("/nonexistent/config.json5"));
    assert!(result.is_err());
}

#[test]
fn test_config_parse_invalid() {
    assert!(Config::parse("not valid json").is_err());
}

#[test]
fn test_config_partial_file_uses_defaults() {
    let config = Config::parse("{ browser: 'chromium' }").unwrap();
    assert_eq!(config.browser.as_deref(), Some("chromium"));
    assert_eq!(config.password_key, "pass");
    assert_eq!(config.pass_command, "pass");
}

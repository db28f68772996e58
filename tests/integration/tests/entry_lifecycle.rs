//! End-to-end entry lifecycle: load, decrypt, reload, match and open.

use std::fs;

use autopass_integration_tests::{Doubles, StoreFixture};
use autopass_store::{Checksum, Entry, StoreError};

#[test]
fn test_load_decrypt_and_match() {
    let fixture = StoreFixture::new();
    let path = fixture.write_entry("web/github", b"ciphertext-1");

    let doubles = Doubles::default();
    doubles
        .store
        .set("web/github", "hunter2\nuser: alice\nurl: github.com\n");
    let ctx = doubles.context(&fixture.config);

    let mut entry = Entry::load(&path, &fixture.config).unwrap();
    assert_eq!(entry.name(), "web/github");
    assert_eq!(entry.checksum(), Some(&Checksum::of_bytes(b"ciphertext-1")));
    assert!(!entry.is_decrypted());

    entry.decrypt(&ctx).unwrap();
    assert_eq!(entry.attributes().get_str("user"), Some("alice"));
    assert_eq!(entry.attributes().password("pass"), Some("hunter2"));
    assert_eq!(entry.attributes().path(), Some(path.to_string_lossy().as_ref()));

    assert!(entry.matches_window("Sign in to GitHub.com - Mozilla Firefox"));
    assert!(!entry.matches_window("GitLab - Mozilla Firefox"));
}

#[test]
fn test_reload_tracks_file_changes() {
    let fixture = StoreFixture::new();
    let path = fixture.write_entry("mail", b"v1");

    let doubles = Doubles::default();
    doubles.store.set("mail", "old\nurl: mail.example\n");
    let ctx = doubles.context(&fixture.config);

    let mut entry = Entry::load(&path, &fixture.config).unwrap();
    entry.reload(&ctx).unwrap();
    entry.reload(&ctx).unwrap();
    assert_eq!(doubles.store.calls(), 1);

    fs::write(&path, b"v2").unwrap();
    doubles.store.set("mail", "new\nurl: webmail.example\n");
    entry.reload(&ctx).unwrap();

    assert_eq!(doubles.store.calls(), 2);
    assert_eq!(entry.checksum(), Some(&Checksum::of_bytes(b"v2")));
    assert_eq!(entry.url(), Some("webmail.example"));
    assert_eq!(entry.attributes().password("pass"), Some("new"));
}

#[test]
fn test_malformed_content_is_reported_not_raised() {
    let fixture = StoreFixture::new();
    let path = fixture.write_entry("broken", b"x");

    let doubles = Doubles::default();
    doubles.store.set("broken", "s3cret\nurl: [unclosed\n");
    let ctx = doubles.context(&fixture.config);

    let mut entry = Entry::load(&path, &fixture.config).unwrap();
    entry.decrypt(&ctx).unwrap();

    assert!(entry.is_decrypted());
    assert!(entry.attributes().is_error());
    assert_eq!(entry.url(), None);

    let messages = doubles.notifier.messages.borrow();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].0.contains("broken"));
    assert_eq!(messages[0].1.secret_line.expose_secret(), "s3cret");
    assert!(matches!(entry.open_url(&ctx), Err(StoreError::UrlNotFound)));
}

#[test]
fn test_store_failure_leaves_entry_undecrypted() {
    let fixture = StoreFixture::new();
    let path = fixture.write_entry("unknown", b"x");

    let doubles = Doubles::default();
    let ctx = doubles.context(&fixture.config);

    let mut entry = Entry::load(&path, &fixture.config).unwrap();
    let err = entry.decrypt(&ctx).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
    assert!(!entry.is_decrypted());
    assert!(doubles.notifier.messages.borrow().is_empty());
}

#[test]
fn test_open_url_hands_url_to_browser() {
    let mut fixture = StoreFixture::new();
    fixture.config.browser = Some("test-browser".to_string());
    let path = fixture.write_entry("shop", b"x");

    let doubles = Doubles::default();
    doubles.store.set("shop", "pw\nurl: https://shop.example/login\n");
    let ctx = doubles.context(&fixture.config);

    let mut entry = Entry::load(&path, &fixture.config).unwrap();
    entry.decrypt(&ctx).unwrap();
    entry.open_url(&ctx).unwrap();

    let launches = doubles.launcher.launches.borrow();
    assert_eq!(launches.len(), 1);
    assert_eq!(launches[0].0, fixture.config.browser_command());
    assert_eq!(launches[0].1, vec!["https://shop.example/login".to_string()]);
}

#[test]
fn test_entries_in_a_set_deduplicate_by_identity() {
    use std::collections::HashSet;

    let fixture = StoreFixture::new();
    let path = fixture.write_entry("dup", b"same");

    let doubles = Doubles::default();
    doubles.store.set("dup", "pw\n");
    let ctx = doubles.context(&fixture.config);

    let plain = Entry::load(&path, &fixture.config).unwrap();
    let mut decrypted = Entry::load(&path, &fixture.config).unwrap();
    decrypted.decrypt(&ctx).unwrap();

    let set: HashSet<Entry> = [plain, decrypted].into_iter().collect();
    assert_eq!(set.len(), 1);
}

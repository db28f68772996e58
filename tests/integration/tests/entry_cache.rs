//! Entry cache round trips through the filesystem.

use std::fs;

use autopass_integration_tests::{Doubles, StoreFixture};
use autopass_store::{Entry, EntryCache};

#[test]
fn test_cached_entries_skip_decryption_until_changed() {
    let fixture = StoreFixture::new();
    let path = fixture.write_entry("web/example", b"v1");
    let cache = EntryCache::new(fixture.root().join("cache").join("entries.json"));

    let doubles = Doubles::default();
    doubles.store.set("web/example", "pw\nurl: example.com\n");
    let ctx = doubles.context(&fixture.config);

    let mut entry = Entry::load(&path, &fixture.config).unwrap();
    entry.decrypt(&ctx).unwrap();
    cache.save([&entry]).unwrap();
    assert_eq!(doubles.store.calls(), 1);

    // A later run restores the entry and reloads it without calling the store.
    let mut restored = cache.load_entries().unwrap();
    assert_eq!(restored.len(), 1);
    let cached = &mut restored[0];
    cached.reload(&ctx).unwrap();
    assert_eq!(doubles.store.calls(), 1);
    assert_eq!(cached.url(), Some("example.com"));
    assert!(cached.matches_window("Example Domain"));

    fs::write(&path, b"v2").unwrap();
    doubles.store.set("web/example", "pw\nurl: example.org\n");
    cached.reload(&ctx).unwrap();
    assert_eq!(doubles.store.calls(), 2);
    assert_eq!(cached.url(), Some("example.org"));
}

#[test]
fn test_undecrypted_entries_stay_undecrypted() {
    let fixture = StoreFixture::new();
    let path = fixture.write_entry("pending", b"x");
    let cache = EntryCache::new(fixture.root().join("entries.json"));

    let entry = Entry::load(&path, &fixture.config).unwrap();
    cache.save([&entry]).unwrap();

    let restored = cache.load_entries().unwrap();
    assert_eq!(restored, vec![entry]);
    assert!(!restored[0].is_decrypted());
}

#[test]
fn test_corrupt_cache_is_an_error() {
    let fixture = StoreFixture::new();
    let path = fixture.root().join("entries.json");
    fs::write(&path, "not json").unwrap();

    assert!(EntryCache::new(path).load().is_err());
}

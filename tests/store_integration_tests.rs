//! Integration Tests for the Cache Store
//!
//! Drives the public API against real files.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use flatcache::cache::{codec, ENTRY_SIZE, KEY_SIZE, RECORD_HEADER_SIZE};
use flatcache::{CacheEntry, CacheError, CacheSlot, CacheStore};
use tempfile::TempDir;

// == Helper Functions ==

fn cache_path() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.bin");
    (dir, path)
}

fn store_with(capacity: usize, pairs: &[(&str, &str)]) -> CacheStore {
    let mut store = CacheStore::new(capacity).unwrap();
    for (key, value) in pairs {
        store.set(key, value).unwrap();
    }
    store
}

fn contents(store: &CacheStore) -> Vec<(String, String)> {
    store
        .iter()
        .map(|e| (e.key().to_owned(), e.value().to_owned()))
        .collect()
}

fn owned(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// == Save/Load ==

#[test]
fn test_roundtrip_into_fresh_store() {
    let (_dir, path) = cache_path();
    let pairs = [("alpha", "1"), ("beta", "two"), ("gamma", "")];

    let mut store = store_with(8, &pairs);
    store.save(&path).unwrap();
    store.release();

    let mut fresh = CacheStore::new(8).unwrap();
    fresh.load(&path).unwrap();

    for (key, value) in pairs {
        assert_eq!(fresh.get(key).as_deref(), Some(value));
    }
    assert_eq!(fresh.get("delta"), None);
}

#[test]
fn test_multiple_saves_accumulate() {
    let (_dir, path) = cache_path();

    let mut store = store_with(8, &[("a", "1"), ("b", "2")]);
    store.save(&path).unwrap();
    store.set("a", "3").unwrap();
    store.save(&path).unwrap();
    assert_eq!(store.stats().records_saved, 2);

    let size = fs::metadata(&path).unwrap().len() as usize;
    assert_eq!(size, 2 * RECORD_HEADER_SIZE + 5 * ENTRY_SIZE);

    let mut fresh = CacheStore::new(2).unwrap();
    fresh.load(&path).unwrap();

    assert_eq!(
        contents(&fresh),
        owned(&[("a", "1"), ("b", "2"), ("a", "1"), ("b", "2"), ("a", "3")])
    );
    assert_eq!(fresh.get("a").as_deref(), Some("1"));
    assert_eq!(fresh.capacity(), 5);
    assert_eq!(fresh.stats().records_loaded, 2);
}

#[test]
fn test_load_appends_after_existing_entries() {
    let (_dir, path) = cache_path();
    store_with(2, &[("k", "from-file")]).save(&path).unwrap();

    let mut store = store_with(4, &[("k", "live")]);
    store.load(&path).unwrap();

    assert_eq!(contents(&store), owned(&[("k", "live"), ("k", "from-file")]));
    assert_eq!(store.get("k").as_deref(), Some("live"));
}

#[test]
fn test_save_empty_store() {
    let (_dir, path) = cache_path();

    let mut empty = CacheStore::new(1).unwrap();
    empty.save(&path).unwrap();
    assert_eq!(fs::read(&path).unwrap(), vec![0, 0, 0, 0]);

    let mut fresh = CacheStore::new(1).unwrap();
    fresh.load(&path).unwrap();
    assert!(fresh.is_empty());
    assert_eq!(fresh.stats().records_loaded, 1);
}

#[test]
fn test_load_empty_file() {
    let (_dir, path) = cache_path();
    fs::write(&path, b"").unwrap();

    let mut store = CacheStore::new(1).unwrap();
    store.load(&path).unwrap();
    assert!(store.is_empty());
}

#[test]
fn test_file_layout_is_fixed_width_little_endian() {
    let (_dir, path) = cache_path();
    store_with(2, &[("key", "value")]).save(&path).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes.len(), RECORD_HEADER_SIZE + ENTRY_SIZE);
    assert_eq!(&bytes[..4], &[1, 0, 0, 0]);
    assert_eq!(&bytes[4..7], b"key");
    assert_eq!(bytes[7], 0);
    assert_eq!(&bytes[4 + KEY_SIZE..4 + KEY_SIZE + 5], b"value");
    assert_eq!(bytes[4 + KEY_SIZE + 5], 0);
}

#[test]
fn test_load_hand_built_file() {
    let (_dir, path) = cache_path();
    let mut bytes = 2i32.to_le_bytes().to_vec();
    for (key, value) in [("x", "10"), ("y", "20")] {
        let mut entry = vec![0u8; ENTRY_SIZE];
        entry[..key.len()].copy_from_slice(key.as_bytes());
        entry[KEY_SIZE..KEY_SIZE + value.len()].copy_from_slice(value.as_bytes());
        bytes.extend(entry);
    }
    fs::write(&path, bytes).unwrap();

    let mut store = CacheStore::new(1).unwrap();
    store.load(&path).unwrap();
    assert_eq!(contents(&store), owned(&[("x", "10"), ("y", "20")]));
}

// == Damaged Files ==

#[test]
fn test_truncated_trailing_record_keeps_complete_records() {
    let (_dir, path) = cache_path();
    store_with(4, &[("a", "1")]).save(&path).unwrap();
    store_with(4, &[("b", "2"), ("c", "3")]).save(&path).unwrap();

    let full = fs::metadata(&path).unwrap().len();
    let file = OpenOptions::new().write(true).open(&path).unwrap();
    file.set_len(full - 10).unwrap();

    let mut store = CacheStore::new(4).unwrap();
    let result = store.load(&path);

    match result {
        Err(CacheError::TruncatedRecord {
            offset,
            expected,
            found,
        }) => {
            assert_eq!(offset, (RECORD_HEADER_SIZE + ENTRY_SIZE) as u64);
            assert_eq!(expected, RECORD_HEADER_SIZE + 2 * ENTRY_SIZE);
            assert_eq!(found, expected - 10);
        }
        other => panic!("expected TruncatedRecord, got {:?}", other),
    }
    assert_eq!(contents(&store), owned(&[("a", "1")]));
    assert_eq!(store.stats().records_loaded, 1);
}

#[test]
fn test_trailing_partial_header() {
    let (_dir, path) = cache_path();
    store_with(2, &[("a", "1")]).save(&path).unwrap();
    OpenOptions::new()
        .append(true)
        .open(&path)
        .unwrap()
        .write_all(&[3, 0])
        .unwrap();

    let mut store = CacheStore::new(2).unwrap();
    let err = store.load(&path).unwrap_err();
    assert!(err.is_io());
    assert!(matches!(
        err,
        CacheError::TruncatedRecord {
            expected: 4,
            found: 2,
            ..
        }
    ));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_corrupt_record_is_not_applied() {
    let (_dir, path) = cache_path();
    store_with(2, &[("a", "1")]).save(&path).unwrap();

    // Second record whose key has no terminator.
    let mut bytes = 1i32.to_le_bytes().to_vec();
    bytes.extend(vec![b'k'; ENTRY_SIZE]);
    OpenOptions::new()
        .append(true)
        .open(&path)
        .unwrap()
        .write_all(&bytes)
        .unwrap();

    let mut store = CacheStore::new(2).unwrap();
    let err = store.load(&path).unwrap_err();
    assert!(matches!(err, CacheError::Corrupt { offset, .. } if offset == (2 * RECORD_HEADER_SIZE + ENTRY_SIZE) as u64));
    assert_eq!(contents(&store), owned(&[("a", "1")]));
}

// == Capacity ==

#[test]
fn test_capacity_scenario() {
    let mut store = CacheStore::new(2).unwrap();

    store.set("a", "1").unwrap();
    store.set("b", "2").unwrap();
    let err = store.set("c", "3").unwrap_err();
    assert!(matches!(err, CacheError::CacheFull(2)));
    assert!(!err.is_io());

    assert_eq!(store.get("a").as_deref(), Some("1"));
    assert_eq!(store.get("c"), None);
    assert_eq!(store.get("z"), None);
}

#[test]
fn test_grown_store_refuses_further_sets() {
    let (_dir, path) = cache_path();
    store_with(3, &[("a", "1"), ("b", "2"), ("c", "3")])
        .save(&path)
        .unwrap();

    let mut store = CacheStore::new(2).unwrap();
    store.load(&path).unwrap();
    assert_eq!(store.capacity(), 3);
    assert!(matches!(store.set("d", "4"), Err(CacheError::CacheFull(3))));
}

// == Lifecycle ==

#[test]
fn test_slot_save_release_reload() {
    let (_dir, path) = cache_path();
    let mut slot = CacheSlot::new();

    let store = slot.initialize(4).unwrap();
    store.set("session", "abc").unwrap();
    store.save(&path).unwrap();

    assert!(matches!(
        slot.initialize(4),
        Err(CacheError::AlreadyInitialized)
    ));
    slot.release().unwrap();

    let store = slot.initialize(1).unwrap();
    store.load(&path).unwrap();
    assert_eq!(store.get("session").as_deref(), Some("abc"));
}

// == Codec ==

#[test]
fn test_codec_matches_store_output() {
    let (_dir, path) = cache_path();
    let pairs = [("a", "1"), ("b", "2")];
    store_with(2, &pairs).save(&path).unwrap();

    let entries: Vec<CacheEntry> = pairs
        .iter()
        .map(|(k, v)| CacheEntry::new(k, v).unwrap())
        .collect();
    let mut encoded = Vec::new();
    codec::write_record(&mut encoded, &entries).unwrap();

    assert_eq!(fs::read(&path).unwrap(), encoded);
}

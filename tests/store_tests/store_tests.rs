//! Tests for SnapshotStore
//!
//! These tests verify:
//! - Open/close lifecycle and directory creation
//! - Round trip through the snapshot file
//! - Load failures abort open
//! - Config validation
//! - The KvStore contract (prefix scans, generic use)
//! - Concurrent access through an Arc

use std::fs;
use std::sync::Arc;

use bytes::Bytes;
use snapkv::store::prefix_successor;
use snapkv::{Config, KvStore, Record, SnapError, SnapshotStore};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_store() -> (TempDir, SnapshotStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = SnapshotStore::open_path(temp_dir.path()).unwrap();
    (temp_dir, store)
}

fn reopen(temp: &TempDir) -> SnapshotStore {
    SnapshotStore::open_path(temp.path()).unwrap()
}

fn dump(store: &SnapshotStore) -> Vec<(Vec<u8>, Vec<u8>)> {
    store
        .range(None, None)
        .map(|r| {
            let (k, v) = r.into_parts();
            (k.to_vec(), v.unwrap().to_vec())
        })
        .collect()
}

fn pairs(items: &[(&str, &str)]) -> Vec<(Vec<u8>, Vec<u8>)> {
    items
        .iter()
        .map(|(k, v)| (k.as_bytes().to_vec(), v.as_bytes().to_vec()))
        .collect()
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_open_creates_data_dir() {
    let temp = TempDir::new().unwrap();
    let data_dir = temp.path().join("nested").join("db");

    let store = snapkv::open(Config::with_dir(&data_dir)).unwrap();

    assert!(data_dir.is_dir());
    assert!(store.is_empty());
    // Nothing is written until close
    assert!(!data_dir.join("save.dat").exists());
}

#[test]
fn test_close_writes_snapshot_file() {
    let (temp, store) = setup_temp_store();
    store.upsert(Record::of("k", "v"));

    let stats = store.close().unwrap();

    assert_eq!(stats.records, 1);
    assert!(temp.path().join("save.dat").is_file());
}

#[test]
fn test_close_empty_store_writes_empty_file() {
    let (temp, store) = setup_temp_store();

    store.close().unwrap();

    assert_eq!(fs::metadata(temp.path().join("save.dat")).unwrap().len(), 0);
    assert!(reopen(&temp).is_empty());
}

#[test]
fn test_accessors() {
    let (temp, store) = setup_temp_store();

    assert_eq!(store.data_dir(), temp.path());
    assert_eq!(store.snapshot_path(), temp.path().join("save.dat").as_path());
    assert_eq!(store.config().snapshot_file, "save.dat");
}

// =============================================================================
// Round Trip Tests
// =============================================================================

#[test]
fn test_scenario_put_close_reopen() {
    let (temp, store) = setup_temp_store();
    store.upsert(Record::of("1", "a"));
    store.upsert(Record::of("2", "b"));
    store.close().unwrap();

    let store = reopen(&temp);
    assert_eq!(dump(&store), pairs(&[("1", "a"), ("2", "b")]));
}

#[test]
fn test_scenario_delete_close_reopen() {
    let (temp, store) = setup_temp_store();
    store.upsert(Record::of("1", "a"));
    store.upsert(Record::tombstone("1"));
    store.close().unwrap();

    let store = reopen(&temp);
    assert_eq!(store.range(None, None).count(), 0);
}

#[test]
fn test_scenario_upper_bound_exclusive() {
    let (_temp, store) = setup_temp_store();
    store.upsert(Record::of("5", "x"));

    assert_eq!(store.range(Some(&b"1"[..]), Some(&b"5"[..])).count(), 0);
    assert_eq!(
        store.range(Some(&b"1"[..]), Some(&b"6"[..])).collect::<Vec<_>>(),
        vec![Record::of("5", "x")]
    );
}

#[test]
fn test_round_trip_preserves_everything() {
    let (temp, store) = setup_temp_store();
    for i in 0..500u32 {
        store.upsert(Record::of(i.to_be_bytes().to_vec(), format!("value-{}", i)));
    }
    for i in (0..500u32).step_by(3) {
        store.upsert(Record::tombstone(i.to_be_bytes().to_vec()));
    }
    store.upsert(Record::of("", "empty key"));
    store.upsert(Record::of("empty value", ""));

    let before = dump(&store);
    store.close().unwrap();

    let store = reopen(&temp);
    assert_eq!(dump(&store), before);
    assert_eq!(store.len(), before.len());
}

#[test]
fn test_multiple_sessions_accumulate() {
    let temp = TempDir::new().unwrap();

    let store = reopen(&temp);
    store.upsert(Record::of("a", "1"));
    store.close().unwrap();

    let store = reopen(&temp);
    store.upsert(Record::of("b", "2"));
    store.upsert(Record::of("a", "updated"));
    store.close().unwrap();

    let store = reopen(&temp);
    assert_eq!(dump(&store), pairs(&[("a", "updated"), ("b", "2")]));
}

#[test]
fn test_dropping_without_close_does_not_persist() {
    let (temp, store) = setup_temp_store();
    store.upsert(Record::of("a", "1"));
    store.close().unwrap();

    let store = reopen(&temp);
    store.upsert(Record::of("b", "2"));
    drop(store);

    let store = reopen(&temp);
    assert_eq!(dump(&store), pairs(&[("a", "1")]));
}

#[test]
fn test_custom_snapshot_file_name() {
    let temp = TempDir::new().unwrap();
    let config = Config::builder()
        .data_dir(temp.path())
        .snapshot_file("custom.snap")
        .build();

    let store = SnapshotStore::open(config.clone()).unwrap();
    store.upsert(Record::of("k", "v"));
    store.close().unwrap();

    assert!(temp.path().join("custom.snap").is_file());
    assert!(!temp.path().join("save.dat").exists());

    let store = SnapshotStore::open(config).unwrap();
    assert_eq!(store.get(b"k"), Some(Bytes::from_static(b"v")));
}

// =============================================================================
// Failure Tests
// =============================================================================

#[test]
fn test_corrupted_snapshot_fails_open() {
    let temp = TempDir::new().unwrap();
    let mut bytes = 1i32.to_be_bytes().to_vec();
    bytes.push(b'k');
    bytes.extend_from_slice(&5i32.to_be_bytes());
    bytes.extend_from_slice(b"ab"); // value cut short
    fs::write(temp.path().join("save.dat"), bytes).unwrap();

    let result = SnapshotStore::open_path(temp.path());

    assert!(matches!(result, Err(SnapError::SnapshotCorrupted(_))));
}

#[test]
fn test_close_fails_when_snapshot_path_is_directory() {
    let (temp, store) = setup_temp_store();
    store.upsert(Record::of("k", "v"));
    fs::create_dir(temp.path().join("save.dat")).unwrap();

    let result = store.close();

    assert!(matches!(result, Err(SnapError::Io(_))));
}

// =============================================================================
// Config Tests
// =============================================================================

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.snapshot_file, "save.dat");
    assert_eq!(config.snapshot_path(), config.data_dir.join("save.dat"));
}

#[test]
fn test_empty_snapshot_name_rejected() {
    let temp = TempDir::new().unwrap();
    let config = Config::builder()
        .data_dir(temp.path())
        .snapshot_file("")
        .build();

    assert!(matches!(SnapshotStore::open(config), Err(SnapError::Config(_))));
}

#[test]
fn test_snapshot_name_with_separator_rejected() {
    let temp = TempDir::new().unwrap();
    let config = Config::builder()
        .data_dir(temp.path())
        .snapshot_file("../escape.dat")
        .build();

    assert!(matches!(SnapshotStore::open(config), Err(SnapError::Config(_))));
}

#[test]
fn test_data_dir_that_is_a_file_rejected() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("not-a-dir");
    fs::write(&file, b"x").unwrap();

    assert!(matches!(
        SnapshotStore::open(Config::with_dir(&file)),
        Err(SnapError::Config(_))
    ));
}

// =============================================================================
// KvStore Contract Tests
// =============================================================================

fn fill<S: KvStore>(store: &S) {
    for key in ["app", "apple", "apply", "apt", "b", "ap"] {
        store.upsert(Record::of(key, key.to_uppercase()));
    }
}

fn prefix_keys<S: KvStore>(store: &S, prefix: &[u8]) -> Vec<Vec<u8>> {
    store.scan_prefix(prefix).map(|r| r.key().to_vec()).collect()
}

#[test]
fn test_scan_prefix() {
    let (_temp, store) = setup_temp_store();
    fill(&store);

    assert_eq!(
        prefix_keys(&store, b"app"),
        vec![b"app".to_vec(), b"apple".to_vec(), b"apply".to_vec()]
    );
    assert_eq!(prefix_keys(&store, b"z"), Vec::<Vec<u8>>::new());
    assert_eq!(prefix_keys(&store, b"").len(), 6);
}

#[test]
fn test_scan_prefix_with_high_bytes() {
    let (_temp, store) = setup_temp_store();
    store.upsert(Record::of(vec![0x01, 0xff], "a"));
    store.upsert(Record::of(vec![0x01, 0xff, 0x00], "b"));
    store.upsert(Record::of(vec![0x02], "c"));
    store.upsert(Record::of(vec![0xff, 0xff, 0x01], "d"));

    assert_eq!(prefix_keys(&store, &[0x01, 0xff]).len(), 2);
    assert_eq!(prefix_keys(&store, &[0xff, 0xff]).len(), 1);
}

#[test]
fn test_prefix_successor() {
    assert_eq!(prefix_successor(b"abc"), Some(b"abd".to_vec()));
    assert_eq!(prefix_successor(&[0x01, 0xff]), Some(vec![0x02]));
    assert_eq!(prefix_successor(&[0xff, 0xff]), None);
    assert_eq!(prefix_successor(b""), None);
}

#[test]
fn test_generic_close_through_trait() {
    fn close_generic<S: KvStore>(store: S) -> snapkv::Result<()> {
        store.close()
    }

    let (temp, store) = setup_temp_store();
    fill(&store);
    close_generic(store).unwrap();

    assert_eq!(reopen(&temp).len(), 6);
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_upserts_then_close() {
    let (temp, store) = setup_temp_store();
    let store = Arc::new(store);

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for i in 0..100 {
                    store.upsert(Record::of(format!("{}-{:03}", t, i), format!("{}", i)));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let store = Arc::try_unwrap(store).ok().unwrap();
    assert_eq!(store.len(), 400);
    store.close().unwrap();

    let store = reopen(&temp);
    assert_eq!(store.len(), 400);
    assert_eq!(store.get(b"3-099"), Some(Bytes::from_static(b"99")));
}

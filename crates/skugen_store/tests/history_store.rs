use std::fs;

use pretty_assertions::assert_eq;
use skugen_core::{derive_sku, HistoryEntry};
use skugen_store::{utc_now_rfc3339, HistoryStore, StoreError};
use tempfile::TempDir;

fn init_logging() {
    skugen_logging::initialize_for_tests();
}

fn entry_for(title: &str) -> HistoryEntry {
    HistoryEntry {
        title: title.to_string(),
        sku: derive_sku(title).unwrap().into_string(),
        recorded_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

#[test]
fn missing_file_loads_empty() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let store = HistoryStore::new(temp.path().join("history.ron"), 100);

    let history = store.load().unwrap();
    assert!(history.is_empty());
    assert_eq!(history.capacity(), 100);
}

#[test]
fn appended_entries_survive_reload() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("history.ron");
    let store = HistoryStore::new(&path, 100);

    store.append(entry_for("Blenko Vase 123")).unwrap();
    store.append(entry_for("Widget")).unwrap();

    let reopened = HistoryStore::new(&path, 100).load().unwrap();
    let skus: Vec<&str> = reopened.entries().map(|e| e.sku.as_str()).collect();
    assert_eq!(skus, vec!["GRFG-AGAV-FQD1", "DRF9-ESD6-BLG7"]);
    assert!(fs::read_to_string(&path).unwrap().contains("Blenko Vase 123"));
}

#[test]
fn capacity_is_enforced_on_disk() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let store = HistoryStore::new(temp.path().join("history.ron"), 3);

    for n in 0..5 {
        store.append(entry_for(&format!("Lamp {n}"))).unwrap();
    }

    let history = store.load().unwrap();
    let titles: Vec<&str> = history.entries().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Lamp 2", "Lamp 3", "Lamp 4"]);
}

#[test]
fn corrupt_file_is_a_parse_error_and_append_recovers() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("history.ron");
    fs::write(&path, "this is not ron (").unwrap();
    let store = HistoryStore::new(&path, 100);

    assert!(matches!(store.load(), Err(StoreError::Parse { .. })));

    // Appending over a corrupt log starts a fresh one.
    let history = store.append(entry_for("Widget")).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(store.load().unwrap().len(), 1);
}

#[test]
fn clear_leaves_an_empty_log() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let store = HistoryStore::new(temp.path().join("history.ron"), 100);
    store.append(entry_for("Widget")).unwrap();

    store.clear().unwrap();
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn clock_is_rfc3339_utc() {
    let now = utc_now_rfc3339();
    assert!(now.ends_with('Z'), "{now}");
    assert_eq!(now.len(), "2024-01-01T00:00:00Z".len());
}

#[test]
fn unreadable_log_is_not_overwritten_on_append() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("history.ron");
    let garbage = [0xff, 0xfe, 0x00, 0x41];
    fs::write(&path, garbage).unwrap();
    let store = HistoryStore::new(&path, 100);

    let result = store.append(entry_for("Widget"));

    assert!(matches!(result, Err(StoreError::Read { .. })));
    assert_eq!(fs::read(&path).unwrap(), garbage);
}

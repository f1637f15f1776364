// SPDX-License-Identifier: MPL-2.0
//! Query history persisted through the CBOR file backend.

use mathlens::application::history::{HistoryStore, HISTORY_LIMIT};
use mathlens::infrastructure::persistence::history_file::HISTORY_FILE;
use mathlens::infrastructure::FileHistoryStorage;
use std::fs;
use tempfile::tempdir;

fn open(dir: &std::path::Path) -> (HistoryStore, Option<String>) {
    HistoryStore::load(Box::new(FileHistoryStorage::in_dir(Some(
        dir.to_path_buf(),
    ))))
}

#[test]
fn history_survives_a_restart() {
    let dir = tempdir().expect("temp dir");

    let (mut store, warning) = open(dir.path());
    assert!(warning.is_none());
    assert!(store.is_empty());
    for query in ["limits", "derivatives", "limits"] {
        assert!(store.append(query).is_none());
    }

    let (reloaded, warning) = open(dir.path());
    assert!(warning.is_none());
    assert_eq!(reloaded.entries(), ["limits", "derivatives"]);
}

#[test]
fn persisted_history_is_capped() {
    let dir = tempdir().expect("temp dir");
    let (mut store, _) = open(dir.path());
    for i in 0..(HISTORY_LIMIT + 3) {
        store.append(&format!("question {i}"));
    }

    let (reloaded, _) = open(dir.path());
    assert_eq!(reloaded.entries().len(), HISTORY_LIMIT);
    assert_eq!(reloaded.entries()[0], format!("question {}", HISTORY_LIMIT + 2));
}

#[test]
fn clearing_removes_the_file() {
    let dir = tempdir().expect("temp dir");
    let (mut store, _) = open(dir.path());
    store.append("matrix multiplication");
    assert!(dir.path().join(HISTORY_FILE).exists());

    assert!(store.clear().is_none());
    assert!(store.is_empty());
    assert!(!dir.path().join(HISTORY_FILE).exists());

    let (reloaded, warning) = open(dir.path());
    assert!(warning.is_none());
    assert!(reloaded.is_empty());
}

#[test]
fn corrupted_file_starts_empty_with_a_warning() {
    let dir = tempdir().expect("temp dir");
    fs::write(dir.path().join(HISTORY_FILE), b"definitely not cbor").expect("write");

    let (mut store, warning) = open(dir.path());
    assert!(store.is_empty());
    assert_eq!(warning.as_deref(), Some("notification-history-parse-error"));

    // The next append replaces the damaged file.
    assert!(store.append("limits").is_none());
    let (reloaded, warning) = open(dir.path());
    assert!(warning.is_none());
    assert_eq!(reloaded.entries(), ["limits"]);
}

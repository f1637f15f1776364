// SPDX-License-Identifier: MPL-2.0
//! Recent query history.
//!
//! The store keeps the list in memory, most recent first, and writes it
//! through an injected [`HistoryStorage`] after every change. Two rules hold
//! at all times: at most [`HISTORY_LIMIT`] entries, and no duplicates (exact
//! string equality).
//!
//! Storage failures never abort an operation. The in-memory list is updated
//! anyway and the caller gets a notification key to surface.

use super::port::{HistoryStorage, StorageError};
use std::sync::{Arc, Mutex};

/// Maximum number of entries kept.
pub const HISTORY_LIMIT: usize = 5;

/// Bounded, deduplicated, most-recent-first list of past queries.
pub struct HistoryStore {
    entries: Vec<String>,
    storage: Box<dyn HistoryStorage>,
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl HistoryStore {
    /// Reads the persisted list once.
    ///
    /// Returns the store and an optional warning key. Unreadable or invalid
    /// data yields an empty history rather than an error. A persisted list
    /// that breaks the size or uniqueness rule is normalized.
    pub fn load(storage: Box<dyn HistoryStorage>) -> (Self, Option<String>) {
        let (entries, warning) = match storage.load() {
            Ok(Some(entries)) => (normalize(entries), None),
            Ok(None) => (Vec::new(), None),
            Err(err) => {
                tracing::warn!(error = %err, "discarding unreadable query history");
                (Vec::new(), Some(err.i18n_key().to_string()))
            }
        };

        (Self { entries, storage }, warning)
    }

    /// Current entries, most recent first.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Moves `entry` to the front, inserting it if absent, then persists.
    ///
    /// Returns a warning key if persisting failed.
    pub fn append(&mut self, entry: &str) -> Option<String> {
        self.entries.retain(|existing| existing != entry);
        self.entries.insert(0, entry.to_string());
        self.entries.truncate(HISTORY_LIMIT);

        self.persist(|storage, entries| storage.save(entries))
    }

    /// Empties the list and removes the persisted slot.
    pub fn clear(&mut self) -> Option<String> {
        self.entries.clear();
        self.persist(|storage, _| storage.remove())
    }

    fn persist(
        &self,
        op: impl FnOnce(&dyn HistoryStorage, &[String]) -> Result<(), StorageError>,
    ) -> Option<String> {
        match op(self.storage.as_ref(), &self.entries) {
            Ok(()) => None,
            Err(err) => {
                tracing::warn!(error = %err, "query history not persisted");
                Some(err.i18n_key().to_string())
            }
        }
    }
}

/// Drops later duplicates and caps the length, keeping order.
fn normalize(entries: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(HISTORY_LIMIT);
    for entry in entries {
        if normalized.len() == HISTORY_LIMIT {
            break;
        }
        if !normalized.contains(&entry) {
            normalized.push(entry);
        }
    }
    normalized
}

/// In-memory backend.
///
/// Clones share the same slot, so a test can keep one handle and inspect
/// what the store persisted through the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistoryStorage {
    slot: Arc<Mutex<Option<Vec<String>>>>,
}

impl MemoryHistoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that already holds `entries`.
    #[must_use]
    pub fn with_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let storage = Self::default();
        if let Ok(mut slot) = storage.slot.lock() {
            *slot = Some(entries.into_iter().map(Into::into).collect());
        }
        storage
    }

    /// What is currently persisted, `None` when the slot is empty.
    #[must_use]
    pub fn snapshot(&self) -> Option<Vec<String>> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl HistoryStorage for MemoryHistoryStorage {
    fn load(&self) -> Result<Option<Vec<String>>, StorageError> {
        self.slot
            .lock()
            .map(|slot| slot.clone())
            .map_err(|e| StorageError::Read(e.to_string()))
    }

    fn save(&self, entries: &[String]) -> Result<(), StorageError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| StorageError::Write(e.to_string()))?;
        *slot = Some(entries.to_vec());
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| StorageError::Write(e.to_string()))?;
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingStorage;

    impl HistoryStorage for FailingStorage {
        fn load(&self) -> Result<Option<Vec<String>>, StorageError> {
            Err(StorageError::Parse("garbage".into()))
        }

        fn save(&self, _entries: &[String]) -> Result<(), StorageError> {
            Err(StorageError::Write("read-only".into()))
        }

        fn remove(&self) -> Result<(), StorageError> {
            Err(StorageError::Write("read-only".into()))
        }
    }

    fn store_with(storage: &MemoryHistoryStorage) -> HistoryStore {
        let (store, warning) = HistoryStore::load(Box::new(storage.clone()));
        assert!(warning.is_none());
        store
    }

    #[test]
    fn load_from_empty_storage_is_empty() {
        let storage = MemoryHistoryStorage::new();
        let store = store_with(&storage);
        assert!(store.is_empty());
    }

    #[test]
    fn append_puts_newest_first_and_persists() {
        let storage = MemoryHistoryStorage::new();
        let mut store = store_with(&storage);

        assert!(store.append("limits").is_none());
        assert!(store.append("derivatives").is_none());

        assert_eq!(store.entries(), ["derivatives", "limits"]);
        assert_eq!(
            storage.snapshot(),
            Some(vec!["derivatives".to_string(), "limits".to_string()])
        );
    }

    #[test]
    fn duplicate_moves_to_front_without_second_entry() {
        let storage = MemoryHistoryStorage::new();
        let mut store = store_with(&storage);

        store.append("a");
        store.append("b");
        store.append("c");
        store.append("a");

        assert_eq!(store.entries(), ["a", "c", "b"]);
    }

    #[test]
    fn history_never_exceeds_limit() {
        let storage = MemoryHistoryStorage::new();
        let mut store = store_with(&storage);

        for i in 0..12 {
            store.append(&format!("query {i}"));
            assert!(store.entries().len() <= HISTORY_LIMIT);
        }

        assert_eq!(store.entries().len(), HISTORY_LIMIT);
        assert_eq!(store.entries()[0], "query 11");
        assert_eq!(store.entries()[HISTORY_LIMIT - 1], "query 7");
    }

    #[test]
    fn dedup_is_exact_string_equality() {
        let storage = MemoryHistoryStorage::new();
        let mut store = store_with(&storage);

        store.append("Limits");
        store.append("limits");

        assert_eq!(store.entries(), ["limits", "Limits"]);
    }

    #[test]
    fn clear_empties_memory_and_storage() {
        let storage = MemoryHistoryStorage::with_entries(["x", "y"]);
        let mut store = store_with(&storage);
        assert_eq!(store.entries().len(), 2);

        assert!(store.clear().is_none());

        assert!(store.is_empty());
        assert_eq!(storage.snapshot(), None);
    }

    #[test]
    fn load_normalizes_oversized_or_duplicated_data() {
        let storage = MemoryHistoryStorage::with_entries(["a", "b", "a", "c", "d", "e", "f", "g"]);
        let store = store_with(&storage);
        assert_eq!(store.entries(), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn unreadable_storage_yields_empty_history_and_warning() {
        let (store, warning) = HistoryStore::load(Box::new(FailingStorage));
        assert!(store.is_empty());
        assert_eq!(warning.as_deref(), Some("notification-history-parse-error"));
    }

    #[test]
    fn write_failure_keeps_in_memory_update() {
        let (mut store, _) = HistoryStore::load(Box::new(FailingStorage));

        let warning = store.append("integrals");

        assert_eq!(warning.as_deref(), Some("notification-history-write-error"));
        assert_eq!(store.entries(), ["integrals"]);
    }
}

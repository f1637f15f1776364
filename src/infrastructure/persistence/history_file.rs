// SPDX-License-Identifier: MPL-2.0
//! Query history stored as CBOR in the application data directory.
//!
//! The history is application state rather than a preference, so it lives
//! next to other state files instead of in `settings.toml`.
//!
//! # Path Resolution
//!
//! 1. Explicit directory passed to [`FileHistoryStorage::in_dir`]
//! 2. `--data-dir` or the `MATHLENS_DATA_DIR` environment variable
//! 3. Platform-specific data directory

use crate::app::paths;
use crate::application::port::{HistoryStorage, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

/// History file name within the app data directory.
pub const HISTORY_FILE: &str = "history.cbor";

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct HistoryFile {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    entries: Vec<String>,
}

/// File-backed [`HistoryStorage`].
#[derive(Debug, Clone)]
pub struct FileHistoryStorage {
    path: Option<PathBuf>,
}

impl FileHistoryStorage {
    /// Storage at the default location.
    #[must_use]
    pub fn new() -> Self {
        Self::in_dir(None)
    }

    /// Storage inside `base_dir`, falling back to the default resolution.
    #[must_use]
    pub fn in_dir(base_dir: Option<PathBuf>) -> Self {
        let path = paths::get_app_data_dir_with_override(base_dir).map(|mut path| {
            path.push(HISTORY_FILE);
            path
        });
        Self { path }
    }

    /// Resolved file path, `None` when no data directory exists.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl Default for FileHistoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStorage for FileHistoryStorage {
    fn load(&self) -> Result<Option<Vec<String>>, StorageError> {
        let Some(path) = &self.path else {
            return Ok(None);
        };

        let file = match fs::File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StorageError::Read(err.to_string())),
        };

        let parsed: HistoryFile = ciborium::from_reader(BufReader::new(file))
            .map_err(|e| StorageError::Parse(e.to_string()))?;
        if parsed.version > FORMAT_VERSION {
            tracing::warn!(
                version = parsed.version,
                "history written by a newer version, reading entries anyway"
            );
        }
        Ok(Some(parsed.entries))
    }

    fn save(&self, entries: &[String]) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            return Err(StorageError::Write("no data directory".to_string()));
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::Write(e.to_string()))?;
        }

        let file = fs::File::create(path).map_err(|e| StorageError::Write(e.to_string()))?;
        let document = HistoryFile {
            version: FORMAT_VERSION,
            entries: entries.to_vec(),
        };
        ciborium::into_writer(&document, BufWriter::new(file))
            .map_err(|e| StorageError::Write(e.to_string()))
    }

    fn remove(&self) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Write(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn entries(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn missing_file_loads_as_none() {
        let temp_dir = tempdir().expect("temp dir");
        let storage = FileHistoryStorage::in_dir(Some(temp_dir.path().to_path_buf()));
        assert_eq!(storage.load().expect("load"), None);
    }

    #[test]
    fn save_then_load_returns_entries() {
        let temp_dir = tempdir().expect("temp dir");
        let storage = FileHistoryStorage::in_dir(Some(temp_dir.path().join("nested")));

        storage.save(&entries(&["b", "a"])).expect("save");

        assert_eq!(storage.load().expect("load"), Some(entries(&["b", "a"])));
    }

    #[test]
    fn garbage_file_is_parse_error() {
        let temp_dir = tempdir().expect("temp dir");
        fs::write(temp_dir.path().join(HISTORY_FILE), b"\xff\xff not cbor").expect("write");
        let storage = FileHistoryStorage::in_dir(Some(temp_dir.path().to_path_buf()));

        assert!(matches!(storage.load(), Err(StorageError::Parse(_))));
    }

    #[test]
    fn remove_deletes_file_and_tolerates_absence() {
        let temp_dir = tempdir().expect("temp dir");
        let storage = FileHistoryStorage::in_dir(Some(temp_dir.path().to_path_buf()));
        storage.save(&entries(&["x"])).expect("save");

        storage.remove().expect("remove");
        assert!(!temp_dir.path().join(HISTORY_FILE).exists());
        storage.remove().expect("second remove");
    }
}

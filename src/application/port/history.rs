// SPDX-License-Identifier: MPL-2.0
//! Storage port for the recent query list.

use std::fmt;

/// Errors raised by a history backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The persisted entry exists but could not be read.
    Read(String),

    /// The persisted entry was read but is not a valid history list.
    Parse(String),

    /// Writing or removing the persisted entry failed.
    Write(String),
}

impl StorageError {
    /// Notification key shown to the user.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            StorageError::Read(_) => "notification-history-read-error",
            StorageError::Parse(_) => "notification-history-parse-error",
            StorageError::Write(_) => "notification-history-write-error",
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Read(msg) => write!(f, "failed to read history: {msg}"),
            StorageError::Parse(msg) => write!(f, "history data is invalid: {msg}"),
            StorageError::Write(msg) => write!(f, "failed to persist history: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// A single named slot holding the serialized history list.
pub trait HistoryStorage: Send {
    /// Returns `Ok(None)` when nothing has been persisted yet.
    fn load(&self) -> Result<Option<Vec<String>>, StorageError>;

    fn save(&self, entries: &[String]) -> Result<(), StorageError>;

    /// Removes the persisted slot. Removing a missing slot is not an error.
    fn remove(&self) -> Result<(), StorageError>;
}

// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! # Available Ports
//!
//! - [`explanation`]: language-model explanation of a query
//! - [`video`]: animated video generation for a query
//! - [`history`]: persistence of the recent query list
//!
//! # Design Notes
//!
//! - Service traits return `BoxFuture<'static, _>` so callers can hand the
//!   future straight to `iced::Task::perform` or join them headlessly
//! - Traits are object safe and `Send + Sync`; callers hold `Arc<dyn _>`
//! - No `async fn` in traits

pub mod explanation;
pub mod history;
pub mod video;

pub use explanation::ExplanationService;
pub use history::{HistoryStorage, StorageError};
pub use video::VideoService;

use std::fmt;

/// Failure reported by a remote collaborator.
///
/// The variants follow the four failure kinds a fetch can hit, plus a
/// local configuration problem that prevents the request from being sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Connection, DNS or body transfer failure.
    Transport(String),

    /// Non-success HTTP status, with whatever diagnostic the body carried.
    Status { status: u16, message: String },

    /// Body was not the expected JSON shape.
    Protocol(String),

    /// The collaborator answered but reported a failure itself.
    Reported(String),

    /// The client is missing something it needs (endpoint, credential).
    NotConfigured(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Transport(msg) => write!(f, "Network error: {msg}"),
            ServiceError::Status { status, message } => {
                write!(f, "HTTP error! Status: {status}, Message: {message}")
            }
            ServiceError::Protocol(msg) => write!(f, "{msg}"),
            ServiceError::Reported(msg) => write!(f, "API Error: {msg}"),
            ServiceError::NotConfigured(msg) => write!(f, "Not configured: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

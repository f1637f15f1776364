// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`http`]: explanation and video generation over HTTP (`reqwest`)
//! - [`persistence`]: query history on disk (CBOR)

pub mod http;
pub mod persistence;

pub use http::{CompletionExplanationClient, GenerationClient, ProxyExplanationClient};
pub use persistence::FileHistoryStorage;

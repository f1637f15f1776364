// SPDX-License-Identifier: MPL-2.0
//! Application layer: ports and the use cases built on top of them.
//!
//! Nothing here knows about Iced, HTTP or the filesystem. Adapters in
//! [`crate::infrastructure`] implement the [`port`] traits and are injected.
//!
//! - [`port`]: service and storage traits
//! - [`history`]: bounded, deduplicated query history
//! - [`search`]: orchestration of the two concurrent fetches

pub mod history;
pub mod port;
pub mod search;

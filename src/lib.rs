// SPDX-License-Identifier: MPL-2.0
//! `mathlens` turns a math question into a written explanation and a generated
//! animation, shown side by side in an Iced desktop window.
//!
//! The crate is layered the same way throughout:
//! - [`domain`] holds pure value types (queries, the generation prompt)
//! - [`application`] holds ports (traits) and the use cases built on them
//!   (history store, query orchestration)
//! - [`infrastructure`] holds the adapters (HTTP clients, CBOR storage)
//! - [`app`], [`ui`] and [`video_player`] make up the desktop front end

pub mod app;
pub mod application;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod logging;
pub mod ui;
pub mod video_player;

#[cfg(test)]
pub(crate) mod test_utils;

// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! This module provides localization capabilities using the Fluent localization system.
//! It handles language detection, translation file loading, and string formatting.
//!
//! # Features
//!
//! - Automatic locale detection from CLI, config, or system settings
//! - Bundled `.ftl` translations, optionally overridden from a directory
//! - Fallback to `en-US` when a locale is unavailable, `MISSING: key` when a
//!   message is

pub mod fluent;

pub use fluent::I18n;

// SPDX-License-Identifier: MPL-2.0
//! On-disk persistence adapters.

pub mod history_file;

pub use history_file::FileHistoryStorage;

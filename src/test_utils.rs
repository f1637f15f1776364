// SPDX-License-Identifier: MPL-2.0
//! Test helpers shared by unit tests.
//!
//! Float assertions come from `approx`, which handles precision issues that
//! `assert_eq!` cannot.

pub use approx::{assert_abs_diff_eq, assert_relative_eq};

/// Default epsilon for f64 comparisons of playback positions.
pub const F64_EPSILON: f64 = 1e-9;

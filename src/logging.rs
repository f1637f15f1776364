// SPDX-License-Identifier: MPL-2.0
//! Structured logging setup.
//!
//! Log output goes to stderr through `tracing-subscriber`. The filter is read
//! from `RUST_LOG` and falls back to `info` for this crate.

use tracing_subscriber::{fmt, EnvFilter};

/// Default directive when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "mathlens=info,warn";

/// Installs the global subscriber.
///
/// Safe to call more than once: later calls are ignored, which keeps
/// integration tests and the headless mode from fighting over the global.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .try_init();
}

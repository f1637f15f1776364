// SPDX-License-Identifier: MPL-2.0
//! Application directories.
//!
//! # Resolution Order
//!
//! 1. **Explicit override** passed to a `_with_override()` function (tests)
//! 2. **CLI arguments** (`--data-dir`, `--config-dir`) set via [`init_cli_overrides`]
//! 3. **Environment variables** (`MATHLENS_DATA_DIR`, `MATHLENS_CONFIG_DIR`)
//! 4. **Platform default** via the `dirs` crate, with the app name appended

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
pub const APP_NAME: &str = "Mathlens";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "MATHLENS_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "MATHLENS_CONFIG_DIR";

static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records the `--data-dir` / `--config-dir` arguments.
///
/// Only the first call has an effect; later calls are logged and ignored.
pub fn init_cli_overrides(data_dir: Option<String>, config_dir: Option<String>) {
    if CLI_DATA_DIR.set(data_dir.map(PathBuf::from)).is_err()
        || CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_err()
    {
        tracing::warn!("directory overrides already initialized, ignoring");
    }
}

fn resolve(
    override_path: Option<PathBuf>,
    cli: &OnceLock<Option<PathBuf>>,
    env_var: &str,
    platform: fn() -> Option<PathBuf>,
) -> Option<PathBuf> {
    first_candidate(
        override_path,
        cli.get().and_then(Clone::clone),
        std::env::var(env_var).ok(),
        platform,
    )
}

/// Picks the first available source; `platform` is only consulted last and
/// gets [`APP_NAME`] appended. An empty environment value counts as unset.
fn first_candidate(
    override_path: Option<PathBuf>,
    cli_path: Option<PathBuf>,
    env_value: Option<String>,
    platform: impl FnOnce() -> Option<PathBuf>,
) -> Option<PathBuf> {
    override_path
        .or(cli_path)
        .or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from))
        .or_else(|| platform().map(|base| base.join(APP_NAME)))
}

/// Directory holding application state such as the query history.
///
/// Returns `None` if no data directory can be determined.
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(override_path, &CLI_DATA_DIR, ENV_DATA_DIR, dirs::data_dir)
}

/// Directory holding `settings.toml`.
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(
        override_path,
        &CLI_CONFIG_DIR,
        ENV_CONFIG_DIR,
        dirs::config_dir,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform() -> Option<PathBuf> {
        Some(PathBuf::from("/home/ada/.local/share"))
    }

    #[test]
    fn platform_directory_gets_the_app_name() {
        assert_eq!(
            first_candidate(None, None, None, platform),
            Some(PathBuf::from("/home/ada/.local/share/Mathlens"))
        );
    }

    #[test]
    fn explicit_override_beats_every_other_source() {
        let chosen = first_candidate(
            Some(PathBuf::from("/tmp/fixture")),
            Some(PathBuf::from("/from/cli")),
            Some("/from/env".to_string()),
            platform,
        );
        assert_eq!(chosen, Some(PathBuf::from("/tmp/fixture")));
    }

    #[test]
    fn cli_argument_beats_environment() {
        let chosen = first_candidate(
            None,
            Some(PathBuf::from("/from/cli")),
            Some("/from/env".to_string()),
            platform,
        );
        assert_eq!(chosen, Some(PathBuf::from("/from/cli")));
    }

    #[test]
    fn environment_is_used_verbatim() {
        let chosen = first_candidate(None, None, Some("/srv/mathlens".to_string()), platform);
        assert_eq!(chosen, Some(PathBuf::from("/srv/mathlens")));
    }

    #[test]
    fn empty_environment_value_is_ignored() {
        let chosen = first_candidate(None, None, Some(String::new()), platform);
        assert_eq!(chosen, Some(PathBuf::from("/home/ada/.local/share/Mathlens")));
    }

    #[test]
    fn no_source_yields_none() {
        assert_eq!(first_candidate(None, None, None, || None), None);
    }
}

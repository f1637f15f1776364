// SPDX-License-Identifier: MPL-2.0
//! User preferences stored in `settings.toml`.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[services]` - Video backend and explanation endpoints
//! - `[player]` - Autoplay, volume and mute
//! - `[search]` - When the loading indicator clears
//!
//! The language-model credential is never part of this file; it is read from
//! the environment when the services are built (see [`crate::app::services`]).
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with an explicit path
//! 2. `--config-dir` or the `MATHLENS_CONFIG_DIR` environment variable
//! 3. Platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use mathlens::app::config;
//!
//! let (mut config, _warning) = config::load();
//! config.general.language = Some("fr".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::application::search::LoadingPolicy;
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, deserialize_with = "deserialize_theme_mode")]
    pub theme_mode: ThemeMode,
}

/// Which explanation adapter to use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ExplanationMode {
    /// Ask a proxy that holds the credential.
    #[default]
    Proxy,

    /// Call the completion endpoint directly with a credential from the
    /// environment.
    Completion,
}

/// Remote collaborators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServicesConfig {
    /// Base URL of the animation backend.
    #[serde(default = "default_video_base_url")]
    pub video_base_url: String,

    #[serde(default)]
    pub explanation_mode: ExplanationMode,

    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,

    #[serde(default = "default_completion_url")]
    pub completion_url: String,

    #[serde(default = "default_completion_model")]
    pub completion_model: String,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            video_base_url: default_video_base_url(),
            explanation_mode: ExplanationMode::default(),
            proxy_url: default_proxy_url(),
            completion_url: default_completion_url(),
            completion_model: default_completion_model(),
        }
    }
}

/// Video playback settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerConfig {
    /// Start playback as soon as the video is ready.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<bool>,

    /// Playback volume (0.0 to 1.0).
    #[serde(default = "default_volume", skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted: Option<bool>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            autoplay: Some(false),
            volume: Some(DEFAULT_VOLUME),
            muted: Some(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SearchConfig {
    #[serde(default)]
    pub loading_policy: LoadingPolicy,
}

// =============================================================================
// Main Config Struct
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub services: ServicesConfig,

    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

impl Config {
    /// Effective playback volume, clamped.
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.player
            .volume
            .unwrap_or(DEFAULT_VOLUME)
            .clamp(MIN_VOLUME, MAX_VOLUME)
    }

    /// Replaces any endpoint that does not parse as an absolute URL with its
    /// default. Returns `true` if something was replaced.
    fn sanitize_urls(&mut self) -> bool {
        let services = &mut self.services;
        let mut replaced = false;
        for (field, name, fallback) in [
            (
                &mut services.video_base_url,
                "video_base_url",
                DEFAULT_VIDEO_BASE_URL,
            ),
            (&mut services.proxy_url, "proxy_url", DEFAULT_PROXY_URL),
            (
                &mut services.completion_url,
                "completion_url",
                DEFAULT_COMPLETION_URL,
            ),
        ] {
            if let Err(err) = reqwest::Url::parse(field) {
                tracing::warn!(setting = name, value = %field, error = %err, "invalid URL in settings, using default");
                *field = fallback.to_string();
                replaced = true;
            }
        }
        replaced
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_video_base_url() -> String {
    DEFAULT_VIDEO_BASE_URL.to_string()
}

fn default_proxy_url() -> String {
    DEFAULT_PROXY_URL.to_string()
}

fn default_completion_url() -> String {
    DEFAULT_COMPLETION_URL.to_string()
}

fn default_completion_model() -> String {
    DEFAULT_COMPLETION_MODEL.to_string()
}

fn default_volume() -> Option<f32> {
    Some(DEFAULT_VOLUME)
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Load / Save
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// the default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    let Some(path) = get_config_path_with_override(base_dir) else {
        return (Config::default(), None);
    };
    if !path.exists() {
        return (Config::default(), None);
    }

    match load_from_path(&path) {
        Ok(mut config) => {
            let warning = config
                .sanitize_urls()
                .then(|| "notification-config-invalid-url".to_string());
            (config, warning)
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "settings unreadable, using defaults");
            (
                Config::default(),
                Some("notification-config-load-error".to_string()),
            )
        }
    }
}

/// Loads configuration from a specific path without URL sanitizing.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

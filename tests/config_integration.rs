// SPDX-License-Identifier: MPL-2.0
//! Settings file and the components configured from it.

use mathlens::app::config::{self, Config, ExplanationMode};
use mathlens::app::services;
use mathlens::application::search::LoadingPolicy;
use mathlens::i18n::fluent::I18n;
use std::fs;
use tempfile::tempdir;

#[test]
fn language_change_via_config() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("settings.toml");

    let mut english = Config::default();
    english.general.language = Some("en-US".to_string());
    config::save_to_path(&english, &path).expect("save");
    let loaded = config::load_from_path(&path).expect("load");
    let i18n = I18n::new(None, None, &loaded);
    assert_eq!(i18n.current_locale().to_string(), "en-US");
    assert_eq!(i18n.tr("search-button"), "Search");

    let mut french = Config::default();
    french.general.language = Some("fr".to_string());
    config::save_to_path(&french, &path).expect("save");
    let loaded = config::load_from_path(&path).expect("load");
    let i18n = I18n::new(None, None, &loaded);
    assert_eq!(i18n.current_locale().to_string(), "fr");
}

#[test]
fn cli_language_wins_over_config() {
    let mut config = Config::default();
    config.general.language = Some("fr".to_string());
    let i18n = I18n::new(Some("en-US".to_string()), None, &config);
    assert_eq!(i18n.current_locale().to_string(), "en-US");
}

#[test]
fn hand_written_settings_are_honored() {
    let dir = tempdir().expect("temp dir");
    fs::write(
        dir.path().join("settings.toml"),
        r#"
[general]
theme_mode = "dark"

[services]
video_base_url = "http://127.0.0.1:8000"
explanation_mode = "completion"

[player]
autoplay = true
volume = 0.5

[search]
loading_policy = "video-settled"
"#,
    )
    .expect("write");

    let (config, warning) = config::load_with_override(Some(dir.path().to_path_buf()));

    assert!(warning.is_none());
    assert_eq!(config.services.video_base_url, "http://127.0.0.1:8000");
    assert_eq!(config.services.explanation_mode, ExplanationMode::Completion);
    assert_eq!(config.player.autoplay, Some(true));
    assert_eq!(config.search.loading_policy, LoadingPolicy::VideoSettled);

    let endpoints = services::resolve_endpoints(&config, |_| None);
    assert_eq!(endpoints.video_base_url, "http://127.0.0.1:8000");
    assert_eq!(endpoints.explanation_url, config.services.completion_url);
}

#[test]
fn environment_override_beats_settings_file() {
    let mut config = Config::default();
    config.services.video_base_url = "http://127.0.0.1:8000".to_string();

    let endpoints = services::resolve_endpoints(&config, |name| {
        (name == services::ENV_VIDEO_BASE_URL).then(|| "https://render.example.com".to_string())
    });

    assert_eq!(endpoints.video_base_url, "https://render.example.com");
}

#[test]
fn saved_settings_never_hold_the_credential() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("settings.toml");
    let mut config = Config::default();
    config.services.explanation_mode = ExplanationMode::Completion;
    config::save_to_path(&config, &path).expect("save");

    let content = fs::read_to_string(&path).expect("read");
    assert!(!content.contains("api_key"));
    assert!(!content.contains("MATHLENS_LLM_API_KEY"));
}

// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::application::port::ServiceError;
use crate::ui::{player, search_bar};
use iced::{keyboard, window};

/// Top-level messages consumed by `App::update`. Component messages are
/// forwarded; fetch outcomes carry the generation they belong to.
#[derive(Debug, Clone)]
pub enum Message {
    SearchBar(search_bar::Message),
    Player(player::Message),
    ExplanationSettled {
        generation: u64,
        result: Result<String, ServiceError>,
    },
    VideoSettled {
        generation: u64,
        result: Result<String, ServiceError>,
    },
    /// Close the notice at this index.
    DismissNotice(usize),
    /// Any window event; records the id used for fullscreen changes.
    WindowSeen(window::Id),
    /// Keyboard shortcut not captured by a widget.
    KeyPressed {
        window: window::Id,
        key: keyboard::Key,
    },
    /// Periodic tick driving the loading spinner.
    SpinnerTick,
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional directory containing Fluent `.ftl` files.
    pub i18n_dir: Option<String>,
    /// Optional data directory override (for the history file).
    /// Takes precedence over `MATHLENS_DATA_DIR`.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `MATHLENS_CONFIG_DIR`.
    pub config_dir: Option<String>,
}

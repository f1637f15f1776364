// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the search bar, the
//! results and the video player.
//!
//! The `App` struct wires together localization, settings, the query history
//! and the two remote services, and translates messages into side effects
//! like launching fetches or switching the window to fullscreen.

pub mod config;
mod message;
pub mod paths;
pub mod services;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::application::history::HistoryStore;
use crate::application::search::SearchState;
use crate::i18n::fluent::I18n;
use crate::infrastructure::FileHistoryStorage;
use crate::ui::player;
use crate::ui::theming::{self, ColorScheme, ThemeMode};
use crate::video_player::Volume;
use iced::{window, Element, Subscription, Task, Theme};
use services::Services;
use std::fmt;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    query: String,
    search: SearchState,
    history: HistoryStore,
    services: Services,
    player: player::State,
    /// Notification keys waiting to be dismissed.
    notices: Vec<String>,
    theme_mode: ThemeMode,
    fullscreen: bool,
    window_id: Option<window::Id>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("query", &self.query)
            .field("in_flight", &self.search.is_in_flight())
            .field("has_video", &self.player.has_video())
            .finish()
    }
}

pub const WINDOW_DEFAULT_WIDTH: u32 = 1100;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 760;
pub const MIN_WINDOW_WIDTH: u32 = 640;
pub const MIN_WINDOW_HEIGHT: u32 = 480;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires an Fn boot closure; flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads settings, history and services.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::init_cli_overrides(flags.data_dir, flags.config_dir);

        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang, flags.i18n_dir, &config);

        let (history, history_warning) = HistoryStore::load(Box::new(FileHistoryStorage::new()));

        let mut notices = Vec::new();
        update::push_notice(&mut notices, config_warning);
        update::push_notice(&mut notices, history_warning);

        let services = match services::build(&config) {
            Ok(services) => services,
            Err(err) => {
                tracing::error!(error = %err, "HTTP client unavailable");
                update::push_notice(
                    &mut notices,
                    Some("notification-services-error".to_string()),
                );
                Services::unavailable(err.to_string())
            }
        };

        let player = player::State::new(
            Volume::new(config.volume()),
            config.player.muted.unwrap_or(false),
            config.player.autoplay.unwrap_or(false),
        );

        tracing::info!(
            locale = %i18n.current_locale(),
            history = history.entries().len(),
            policy = ?config.search.loading_policy,
            "application started"
        );

        let app = App {
            i18n,
            query: String::new(),
            search: SearchState::new(config.search.loading_policy),
            history,
            services,
            player,
            notices,
            theme_mode: config.general.theme_mode,
            fullscreen: false,
            window_id: None,
        };

        (app, Task::none())
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self.search.query() {
            Some(query) => format!("{query} - {app_name}"),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        theming::to_iced_theme(self.theme_mode)
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(self.player.is_animating()),
            subscription::create_video_subscription(&self.player),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            query: &mut self.query,
            search: &mut self.search,
            history: &mut self.history,
            services: &self.services,
            player: &mut self.player,
            notices: &mut self.notices,
            fullscreen: &mut self.fullscreen,
            window_id: &mut self.window_id,
        };

        match message {
            Message::SearchBar(search_message) => update::handle_search_bar(&mut ctx, search_message),
            Message::Player(player_message) => {
                update::handle_player_message(&mut ctx, player_message)
            }
            Message::ExplanationSettled { generation, result } => {
                update::handle_explanation_settled(&mut ctx, generation, result)
            }
            Message::VideoSettled { generation, result } => {
                update::handle_video_settled(&mut ctx, generation, result)
            }
            Message::DismissNotice(index) => {
                if index < self.notices.len() {
                    self.notices.remove(index);
                }
                Task::none()
            }
            Message::WindowSeen(id) => {
                self.window_id = Some(id);
                Task::none()
            }
            Message::KeyPressed { window, key } => {
                update::handle_key_pressed(&mut ctx, window, key)
            }
            Message::SpinnerTick => {
                update::handle_player_message(&mut ctx, player::Message::SpinnerTick)
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            query: &self.query,
            search: &self.search,
            history: &self.history,
            player: &self.player,
            notices: &self.notices,
            colors: ColorScheme::for_mode(self.theme_mode),
            fullscreen: self.fullscreen,
        })
    }
}

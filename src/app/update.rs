// SPDX-License-Identifier: MPL-2.0
//! Message handlers for the application root.
//!
//! Handlers take an [`UpdateContext`] of mutable borrows into `App` so they
//! can be exercised without building the whole application.

use super::services::Services;
use super::Message;
use crate::application::history::HistoryStore;
use crate::application::port::ServiceError;
use crate::application::search::SearchState;
use crate::ui::{player, player_controls, search_bar};
use iced::keyboard::{self, key};
use iced::{window, Task};

/// Seconds skipped by the left/right arrow keys.
pub const KEYBOARD_SEEK_STEP_SECS: f64 = 5.0;

/// Context for update operations containing mutable references to app state.
pub struct UpdateContext<'a> {
    pub query: &'a mut String,
    pub search: &'a mut SearchState,
    pub history: &'a mut HistoryStore,
    pub services: &'a Services,
    pub player: &'a mut player::State,
    pub notices: &'a mut Vec<String>,
    pub fullscreen: &'a mut bool,
    pub window_id: &'a mut Option<window::Id>,
}

/// Queues a notice unless the same key is already showing.
pub fn push_notice(notices: &mut Vec<String>, key: Option<String>) {
    if let Some(key) = key {
        if !notices.contains(&key) {
            notices.push(key);
        }
    }
}

/// Handles search bar messages.
pub fn handle_search_bar(ctx: &mut UpdateContext<'_>, message: search_bar::Message) -> Task<Message> {
    match message {
        search_bar::Message::QueryChanged(query) => {
            *ctx.query = query;
            Task::none()
        }
        search_bar::Message::Submit => submit(ctx),
        search_bar::Message::HistorySelected(entry) => {
            if ctx.search.is_in_flight() {
                return Task::none();
            }
            *ctx.query = entry;
            submit(ctx)
        }
        search_bar::Message::ClearHistory => {
            let warning = ctx.history.clear();
            push_notice(ctx.notices, warning);
            Task::none()
        }
    }
}

/// Accepts the current query and launches both fetches.
///
/// The two tasks are batched but independent: each reports back on its own
/// and neither is cancelled when the other fails.
fn submit(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Some((submission, history_warning)) = ctx.search.submit(ctx.query, ctx.history) else {
        return Task::none();
    };
    push_notice(ctx.notices, history_warning);
    ctx.player.clear();

    let generation = submission.generation;
    let explanation = Task::perform(
        ctx.services.explanation.fetch_explanation(&submission.query),
        move |result| Message::ExplanationSettled { generation, result },
    );
    let video = Task::perform(
        ctx.services.video.fetch_video(&submission.query),
        move |result| Message::VideoSettled { generation, result },
    );

    Task::batch([explanation, video])
}

pub fn handle_explanation_settled(
    ctx: &mut UpdateContext<'_>,
    generation: u64,
    result: Result<String, ServiceError>,
) -> Task<Message> {
    ctx.search.explanation_settled(generation, result);
    Task::none()
}

/// Records the video outcome and hands a fresh URL to the player.
pub fn handle_video_settled(
    ctx: &mut UpdateContext<'_>,
    generation: u64,
    result: Result<String, ServiceError>,
) -> Task<Message> {
    let url = result.as_ref().ok().cloned();
    if ctx.search.video_settled(generation, result) {
        if let Some(url) = url {
            ctx.player.load(&url);
        }
    }
    Task::none()
}

/// Handles player messages.
pub fn handle_player_message(ctx: &mut UpdateContext<'_>, message: player::Message) -> Task<Message> {
    match ctx.player.update(message) {
        player::Effect::ToggleFullscreen => {
            let desired = !*ctx.fullscreen;
            update_fullscreen_mode(ctx.fullscreen, ctx.window_id.as_ref(), desired)
        }
        player::Effect::None => Task::none(),
    }
}

/// Keyboard shortcuts for the player.
pub fn handle_key_pressed(
    ctx: &mut UpdateContext<'_>,
    window: window::Id,
    key: keyboard::Key,
) -> Task<Message> {
    *ctx.window_id = Some(window);

    let keyboard::Key::Named(named) = key else {
        return Task::none();
    };

    if named == key::Named::Escape {
        return update_fullscreen_mode(ctx.fullscreen, ctx.window_id.as_ref(), false);
    }

    if !ctx.player.has_video() {
        return Task::none();
    }

    let message = match named {
        key::Named::Space => player::Message::Controls(player_controls::Message::TogglePlayback),
        key::Named::ArrowRight => player::Message::SeekRelative(KEYBOARD_SEEK_STEP_SECS),
        key::Named::ArrowLeft => player::Message::SeekRelative(-KEYBOARD_SEEK_STEP_SECS),
        key::Named::ArrowUp => player::Message::VolumeUp,
        key::Named::ArrowDown => player::Message::VolumeDown,
        key::Named::F11 => player::Message::Controls(player_controls::Message::ToggleFullscreen),
        _ => return Task::none(),
    };
    handle_player_message(ctx, message)
}

/// Updates fullscreen mode to the desired state.
fn update_fullscreen_mode(
    fullscreen: &mut bool,
    window_id: Option<&window::Id>,
    desired: bool,
) -> Task<Message> {
    if *fullscreen == desired {
        return Task::none();
    }

    let Some(window_id) = window_id else {
        tracing::debug!("fullscreen change before any window event, ignored");
        return Task::none();
    };

    *fullscreen = desired;
    let mode = if desired {
        window::Mode::Fullscreen
    } else {
        window::Mode::Windowed
    };
    window::set_mode(*window_id, mode)
}

// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Native events are filtered down to the few the app reacts to: window
//! events (to learn the window id) and keyboard shortcuts that no widget
//! captured.

use super::Message;
use crate::ui::player;
use iced::{event, keyboard, time, window, Subscription};
use std::time::Duration;

/// Spinner frame interval.
pub const SPINNER_TICK: Duration = Duration::from_millis(33);

pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, window_id| match event {
        event::Event::Window(window::Event::Opened { .. } | window::Event::Focused) => {
            Some(Message::WindowSeen(window_id))
        }
        event::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => match status {
            event::Status::Ignored => Some(Message::KeyPressed {
                window: window_id,
                key,
            }),
            event::Status::Captured => None,
        },
        _ => None,
    })
}

/// Ticks only while the spinner is visible.
pub fn create_tick_subscription(animating: bool) -> Subscription<Message> {
    if animating {
        time::every(SPINNER_TICK).map(|_| Message::SpinnerTick)
    } else {
        Subscription::none()
    }
}

pub fn create_video_subscription(player: &player::State) -> Subscription<Message> {
    player.subscription().map(Message::Player)
}

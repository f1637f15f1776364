// SPDX-License-Identifier: MPL-2.0
//! Player control strip.
//!
//! Play/pause, timeline scrubber, mute, volume, time display and
//! fullscreen. Buttons are inert while the video is loading or failed.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::{icons, styles};
use crate::video_player::time_units::format_time;
use iced::widget::{button, container, row, slider, text, tooltip, Text};
use iced::{Alignment, Element, Length};

/// Slider step in seconds (1ms precision).
const SLIDER_STEP_SECS: f64 = 0.001;

const VOLUME_STEP: f32 = 0.01;

/// Messages emitted by the control strip.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    TogglePlayback,

    /// Slider is being dragged (visual feedback only, no actual seek).
    SeekPreview(f64),

    /// Slider released, seek to the preview position.
    SeekCommit,

    /// Adjust volume (0.0 to 1.0).
    SetVolume(f32),

    ToggleMute,

    ToggleFullscreen,
}

/// View context for rendering the controls.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub fullscreen: bool,
}

/// What the controls display.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlsState {
    pub enabled: bool,
    pub is_playing: bool,
    pub position_secs: f64,
    pub duration_secs: f64,
    /// Slider range end; stands in for the duration until it is known.
    pub slider_max: f64,
    /// When set, the slider shows this instead of the playback position.
    pub seek_preview_position: Option<f64>,
    pub volume: f32,
    pub muted: bool,
}

pub fn view<'a>(ctx: ViewContext<'a>, state: &ControlsState) -> Element<'a, Message> {
    let enabled = state.enabled;
    let on = |message: Message| enabled.then_some(message);

    let (play_icon, play_label) = if state.is_playing {
        (icons::pause(), ctx.i18n.tr("player-pause"))
    } else {
        (icons::play(), ctx.i18n.tr("player-play"))
    };
    let play_button = with_tooltip(
        button(play_icon)
            .on_press_maybe(on(Message::TogglePlayback))
            .padding(spacing::XS)
            .style(styles::button::control)
            .into(),
        play_label,
    );

    let timeline_position = state
        .seek_preview_position
        .unwrap_or(state.position_secs)
        .clamp(0.0, state.slider_max);
    // Sliders cannot be disabled; the player ignores seeks it cannot honor.
    let timeline = slider(0.0..=state.slider_max, timeline_position, Message::SeekPreview)
        .on_release(Message::SeekCommit)
        .step(SLIDER_STEP_SECS)
        .width(Length::FillPortion(1));

    let time_display = text(ctx.i18n.tr_with_args(
        "player-time",
        &[
            ("position", &format_time(state.position_secs)),
            ("duration", &format_time(state.duration_secs)),
        ],
    ))
    .size(typography::CAPTION);

    let (mute_icon, mute_label) = if state.muted || state.volume <= 0.0 {
        (icons::volume_muted(), ctx.i18n.tr("player-unmute"))
    } else {
        (icons::volume(), ctx.i18n.tr("player-mute"))
    };
    let mute_button = with_tooltip(
        button(mute_icon)
            .on_press_maybe(on(Message::ToggleMute))
            .padding(spacing::XS)
            .style(styles::button::control)
            .into(),
        mute_label,
    );

    let volume_slider = slider(0.0..=1.0, state.volume, Message::SetVolume)
        .step(VOLUME_STEP)
        .width(Length::Fixed(sizing::VOLUME_SLIDER_WIDTH));

    let (fullscreen_icon, fullscreen_label) = if ctx.fullscreen {
        (icons::fullscreen_exit(), ctx.i18n.tr("player-exit-fullscreen"))
    } else {
        (icons::fullscreen(), ctx.i18n.tr("player-fullscreen"))
    };
    let fullscreen_button = with_tooltip(
        button(fullscreen_icon)
            .on_press_maybe(on(Message::ToggleFullscreen))
            .padding(spacing::XS)
            .style(styles::button::control)
            .into(),
        fullscreen_label,
    );

    let controls = row![
        play_button,
        timeline,
        mute_button,
        volume_slider,
        time_display,
        fullscreen_button,
    ]
    .spacing(spacing::XS)
    .padding(spacing::XS)
    .align_y(Alignment::Center);

    container(controls)
        .width(Length::Fill)
        .style(styles::container::overlay)
        .into()
}

fn with_tooltip<'a>(content: Element<'a, Message>, label: String) -> Element<'a, Message> {
    tooltip(content, Text::new(label), tooltip::Position::Top)
        .gap(4)
        .into()
}

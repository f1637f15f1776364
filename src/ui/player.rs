// SPDX-License-Identifier: MPL-2.0
//! Video player component.
//!
//! Owns the [`MediaPlayer`] model, the latest decoded frame and the command
//! handle of the current playback session. User input is turned into
//! [`MediaCommand`]s for the worker; the displayed state only changes when
//! the worker reports back through [`PlaybackMessage::Event`].

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::player_controls::{self, ControlsState};
use crate::ui::styles;
use crate::ui::widgets::{animated_spinner, AnimatedSpinner};
use crate::video_player::{
    video_playback, CommandSender, MediaCommand, MediaPlayer, PlaybackMessage, PlaybackSource,
    Volume,
};
use iced::widget::{center, column, container, image, mouse_area, stack, text, Column};
use iced::{ContentFit, Element, Length, Subscription};

#[derive(Debug, Clone)]
pub enum Message {
    Playback(PlaybackMessage),
    Controls(player_controls::Message),
    /// Click on the video surface.
    SurfaceClicked,
    /// Seek by a signed offset from the current position.
    SeekRelative(f64),
    VolumeUp,
    VolumeDown,
    SpinnerTick,
}

/// Requests the player cannot fulfil itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    ToggleFullscreen,
}

#[derive(Debug)]
pub struct State {
    media: MediaPlayer,
    source: Option<PlaybackSource>,
    frame: Option<image::Handle>,
    commands: Option<CommandSender>,
    /// Commands issued before the worker handed out its sender.
    pending: Vec<MediaCommand>,
    seek_preview: Option<f64>,
    spinner_rotation: f32,
    next_session: u64,
    autoplay: bool,
}

impl Default for State {
    fn default() -> Self {
        Self::new(Volume::default(), false, false)
    }
}

impl State {
    #[must_use]
    pub fn new(volume: Volume, muted: bool, autoplay: bool) -> Self {
        Self {
            media: MediaPlayer::new(volume, muted),
            source: None,
            frame: None,
            commands: None,
            pending: Vec::new(),
            seek_preview: None,
            spinner_rotation: 0.0,
            next_session: 0,
            autoplay,
        }
    }

    /// Starts a new playback session for `url`, replacing any current one.
    pub fn load(&mut self, url: &str) {
        self.next_session += 1;
        self.reset_session();
        tracing::debug!(url, session = self.next_session, "loading video");
        self.source = Some(PlaybackSource {
            url: url.to_string(),
            session_id: self.next_session,
            autoplay: self.autoplay,
            volume: self.media.volume(),
            muted: self.media.is_muted(),
        });
    }

    /// Detaches the current video; its worker stops with the subscription.
    pub fn clear(&mut self) {
        self.reset_session();
        self.source = None;
    }

    fn reset_session(&mut self) {
        if let Some(commands) = self.commands.take() {
            if let Err(error) = commands.send(MediaCommand::Stop) {
                tracing::debug!(%error, "stop not delivered, worker already gone");
            }
        }
        self.media.reset();
        self.frame = None;
        self.pending.clear();
        self.seek_preview = None;
    }

    #[must_use]
    pub fn has_video(&self) -> bool {
        self.source.is_some()
    }

    #[must_use]
    pub fn media(&self) -> &MediaPlayer {
        &self.media
    }

    /// True while the spinner needs animation ticks.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.source.is_some()
            && !self.media.has_error()
            && (self.media.is_loading() || self.frame.is_none())
    }

    pub fn subscription(&self) -> Subscription<Message> {
        match &self.source {
            Some(source) => video_playback(source.clone()).map(Message::Playback),
            None => Subscription::none(),
        }
    }

    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            Message::Playback(PlaybackMessage::Started(sender)) => {
                for command in self.pending.drain(..) {
                    if let Err(error) = sender.send(command) {
                        tracing::debug!(%error, "queued command dropped");
                    }
                }
                self.commands = Some(sender);
            }
            Message::Playback(PlaybackMessage::Event(event)) => {
                self.media.apply(event);
            }
            Message::Playback(PlaybackMessage::Frame(handle)) => {
                self.frame = Some(handle);
            }
            Message::Controls(player_controls::Message::TogglePlayback)
            | Message::SurfaceClicked => {
                if let Some(command) = self.media.toggle_play() {
                    self.send(command);
                }
            }
            Message::Controls(player_controls::Message::SeekPreview(secs)) => {
                if self.media.controls_enabled() {
                    self.seek_preview = Some(secs);
                }
            }
            Message::Controls(player_controls::Message::SeekCommit) => {
                if let Some(target) = self.seek_preview.take() {
                    if let Some(command) = self.media.seek(target) {
                        self.send(command);
                    }
                }
            }
            Message::SeekRelative(delta) => {
                let target = self.media.position_secs() + delta;
                if let Some(command) = self.media.seek(target) {
                    self.send(command);
                }
            }
            Message::Controls(player_controls::Message::SetVolume(volume)) => {
                let commands = self.media.set_volume(volume);
                self.send_all(commands);
            }
            Message::VolumeUp => {
                let commands = self.media.set_volume(self.media.volume().increase().value());
                self.send_all(commands);
            }
            Message::VolumeDown => {
                let commands = self.media.set_volume(self.media.volume().decrease().value());
                self.send_all(commands);
            }
            Message::Controls(player_controls::Message::ToggleMute) => {
                let commands = self.media.toggle_mute();
                self.send_all(commands);
            }
            Message::Controls(player_controls::Message::ToggleFullscreen) => {
                return Effect::ToggleFullscreen;
            }
            Message::SpinnerTick => {
                self.spinner_rotation = animated_spinner::advance(self.spinner_rotation);
            }
        }
        Effect::None
    }

    fn send_all(&mut self, commands: Vec<MediaCommand>) {
        for command in commands {
            self.send(command);
        }
    }

    fn send(&mut self, command: MediaCommand) {
        match &self.commands {
            Some(sender) => {
                if let Err(error) = sender.send(command) {
                    tracing::debug!(%error, "player command not delivered");
                }
            }
            None if self.source.is_some() => self.pending.push(command),
            None => {}
        }
    }

    fn controls_state(&self) -> ControlsState {
        ControlsState {
            enabled: self.media.controls_enabled(),
            is_playing: self.media.is_playing(),
            position_secs: self.media.position_secs(),
            duration_secs: self.media.duration_secs(),
            slider_max: self.media.slider_max(),
            seek_preview_position: self.seek_preview,
            volume: self.media.volume().value(),
            muted: self.media.is_muted(),
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n, fullscreen: bool) -> Element<'a, Message> {
        let height = if fullscreen {
            Length::Fill
        } else {
            Length::Fixed(sizing::PLAYER_HEIGHT)
        };

        let frame: Element<'a, Message> = match &self.frame {
            Some(handle) => image(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => Column::new().width(Length::Fill).height(Length::Fill).into(),
        };
        let surface = mouse_area(
            container(frame)
                .width(Length::Fill)
                .height(height)
                .style(styles::container::player_surface),
        )
        .on_press(Message::SurfaceClicked);

        let mut layers = stack![surface];

        if let Some(error) = self.media.error() {
            layers = layers.push(center(
                container(text(i18n.tr(error.i18n_key())).size(typography::BODY))
                    .padding(spacing::SM)
                    .style(styles::container::overlay),
            ));
        } else if self.is_animating() {
            let spinner = AnimatedSpinner::new(iced::Color::WHITE, self.spinner_rotation);
            layers = layers.push(center(
                column![
                    spinner.into_element(),
                    text(i18n.tr("player-loading")).size(typography::CAPTION),
                ]
                .spacing(spacing::XS)
                .align_x(iced::Alignment::Center),
            ));
        }

        let controls = player_controls::view(
            player_controls::ViewContext { i18n, fullscreen },
            &self.controls_state(),
        )
        .map(Message::Controls);

        column![layers, controls]
            .spacing(spacing::XXS)
            .width(Length::Fill)
            .height(if fullscreen {
                Length::Fill
            } else {
                Length::Shrink
            })
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VideoError;
    use crate::video_player::{MediaEvent, PlaybackState};

    fn ready_player() -> State {
        let mut state = State::default();
        state.load("https://backend.example/media/v.mp4");
        for event in [
            MediaEvent::LoadStart,
            MediaEvent::LoadedMetadata {
                duration_secs: 30.0,
            },
            MediaEvent::CanPlay,
        ] {
            state.update(Message::Playback(PlaybackMessage::Event(event)));
        }
        state
    }

    #[test]
    fn load_starts_a_new_session_each_time() {
        let mut state = State::default();
        assert!(!state.has_video());

        state.load("a.mp4");
        let first = state.source.as_ref().map(|s| s.session_id);
        state.load("b.mp4");
        let second = state.source.as_ref().map(|s| s.session_id);

        assert!(state.has_video());
        assert_ne!(first, second);
        assert_eq!(state.media().state(), &PlaybackState::Idle);
    }

    #[test]
    fn commands_before_start_are_queued() {
        let mut state = ready_player();
        state.update(Message::SurfaceClicked);
        assert_eq!(state.pending, vec![MediaCommand::Play]);
        // Playback state waits for the resource.
        assert_eq!(state.media().state(), &PlaybackState::Ready);
    }

    #[test]
    fn seek_preview_commits_on_release() {
        let mut state = ready_player();
        state.update(Message::Controls(player_controls::Message::SeekPreview(
            12.5,
        )));
        assert_eq!(state.controls_state().seek_preview_position, Some(12.5));

        state.update(Message::Controls(player_controls::Message::SeekCommit));
        assert_eq!(state.seek_preview, None);
        assert_eq!(
            state.pending,
            vec![MediaCommand::Seek { target_secs: 12.5 }]
        );
    }

    #[test]
    fn seek_preview_is_ignored_while_loading() {
        let mut state = State::default();
        state.load("a.mp4");
        state.update(Message::Playback(PlaybackMessage::Event(
            MediaEvent::LoadStart,
        )));
        state.update(Message::Controls(player_controls::Message::SeekPreview(
            3.0,
        )));
        assert_eq!(state.seek_preview, None);
    }

    #[test]
    fn relative_seek_is_clamped_to_the_start() {
        let mut state = ready_player();
        state.update(Message::SeekRelative(-5.0));
        assert_eq!(
            state.pending,
            vec![MediaCommand::Seek { target_secs: 0.0 }]
        );
    }

    #[test]
    fn fullscreen_is_delegated() {
        let mut state = ready_player();
        assert_eq!(
            state.update(Message::Controls(
                player_controls::Message::ToggleFullscreen
            )),
            Effect::ToggleFullscreen
        );
    }

    #[test]
    fn volume_survives_a_new_session() {
        let mut state = ready_player();
        state.update(Message::Controls(player_controls::Message::SetVolume(0.3)));
        state.load("next.mp4");

        let source = state.source.as_ref().expect("source");
        assert!((source.volume.value() - 0.3).abs() < f32::EPSILON);
        assert!(!source.muted);
    }

    #[test]
    fn unmute_after_a_new_session_restores_the_level() {
        let mut state = ready_player();
        state.update(Message::Controls(player_controls::Message::SetVolume(0.4)));
        state.update(Message::Controls(player_controls::Message::ToggleMute));
        state.load("next.mp4");
        assert!(state.media().is_muted());

        state.update(Message::Controls(player_controls::Message::ToggleMute));

        assert!(!state.media().is_muted());
        assert!((state.media().volume().value() - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn spinner_stops_on_error() {
        let mut state = State::default();
        state.load("a.mp4");
        assert!(state.is_animating());

        state.update(Message::Playback(PlaybackMessage::Event(MediaEvent::Error(
            VideoError::NoVideoStream,
        ))));
        assert!(!state.is_animating());
        assert!(state.media().has_error());
    }

    #[test]
    fn clear_detaches_video() {
        let mut state = ready_player();
        state.clear();
        assert!(!state.has_video());
        assert!(!state.is_animating());
    }
}

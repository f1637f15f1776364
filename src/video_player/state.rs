// SPDX-License-Identifier: MPL-2.0
//! Playback state machine for the media player.
//!
//! The state only moves in response to [`MediaEvent`]s reported by the
//! media resource, through [`MediaPlayer::apply`]. User operations never
//! change the playback state themselves: they return the [`MediaCommand`] to
//! send to the resource and wait for the resulting event.
//!
//! ```text
//! Idle --LoadStart--> Loading --CanPlay--> Ready --Play--> Playing
//!                                                  Playing <--Play/Pause--> Paused
//!                                                  Playing --Ended--> Ended
//! any --Error--> Errored
//! ```
//!
//! Volume and mute are local preferences and apply immediately.

use super::Volume;
use crate::error::VideoError;

/// Playback state.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackState {
    /// No video attached.
    Idle,

    /// Resource is opening or buffering.
    Loading,

    /// First frame available, not yet started.
    Ready,

    Playing,

    Paused,

    /// Reached the end of the stream.
    Ended,

    /// Playback failed; categorized for a localized message.
    Errored(VideoError),
}

/// Notification from the media resource.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    LoadStart,
    LoadedMetadata { duration_secs: f64 },
    CanPlay,
    TimeUpdate { position_secs: f64 },
    Play,
    Pause,
    Ended,
    Error(VideoError),
}

/// Request for the media resource.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaCommand {
    Play,
    Pause,
    Seek { target_secs: f64 },
    SetVolume(f32),
    SetMuted(bool),
    Stop,
}

/// Player model: playback state plus position, duration and audio settings.
#[derive(Debug, Clone)]
pub struct MediaPlayer {
    state: PlaybackState,
    position_secs: f64,
    duration_secs: f64,
    volume: Volume,
    muted: bool,
    restore_volume: Option<Volume>,
}

impl Default for MediaPlayer {
    fn default() -> Self {
        Self::new(Volume::default(), false)
    }
}

impl MediaPlayer {
    /// A muted player holds volume 0 and remembers `volume` for unmuting.
    #[must_use]
    pub fn new(volume: Volume, muted: bool) -> Self {
        let (volume, restore_volume) = if muted && !volume.is_silent() {
            (Volume::new(0.0), Some(volume))
        } else {
            (volume, None)
        };
        Self {
            state: PlaybackState::Idle,
            position_secs: 0.0,
            duration_secs: 0.0,
            muted: volume.is_silent(),
            volume,
            restore_volume,
        }
    }

    /// Back to `Idle` for a new resource. Volume, mute and the remembered
    /// level carry over.
    pub fn reset(&mut self) {
        self.state = PlaybackState::Idle;
        self.position_secs = 0.0;
        self.duration_secs = 0.0;
    }

    /// Applies a resource event. The only place the playback state changes.
    pub fn apply(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::LoadStart => {
                self.state = PlaybackState::Loading;
                self.position_secs = 0.0;
                self.duration_secs = 0.0;
            }
            MediaEvent::Error(error) => {
                tracing::warn!(%error, "playback error");
                self.state = PlaybackState::Errored(error);
            }
            _ if self.has_error() => {
                tracing::debug!(?event, "event ignored after playback error");
            }
            MediaEvent::LoadedMetadata { duration_secs } => {
                if duration_secs.is_finite() && duration_secs > 0.0 {
                    self.duration_secs = duration_secs;
                }
            }
            MediaEvent::CanPlay => {
                if self.state == PlaybackState::Loading {
                    self.state = PlaybackState::Ready;
                }
            }
            MediaEvent::TimeUpdate { position_secs } => {
                if position_secs.is_finite() {
                    self.position_secs = position_secs.max(0.0);
                }
            }
            MediaEvent::Play => self.state = PlaybackState::Playing,
            MediaEvent::Pause => {
                if self.state == PlaybackState::Playing {
                    self.state = PlaybackState::Paused;
                }
            }
            MediaEvent::Ended => {
                self.state = PlaybackState::Ended;
                if self.duration_secs > 0.0 {
                    self.position_secs = self.duration_secs;
                }
            }
        }
    }

    /// Play if not playing, pause if playing. Ended restarts from the start.
    ///
    /// Returns `None` when no video can be controlled.
    pub fn toggle_play(&self) -> Option<MediaCommand> {
        match self.state {
            PlaybackState::Playing => Some(MediaCommand::Pause),
            PlaybackState::Ready | PlaybackState::Paused | PlaybackState::Ended => {
                Some(MediaCommand::Play)
            }
            PlaybackState::Idle | PlaybackState::Loading | PlaybackState::Errored(_) => None,
        }
    }

    /// Seek request with the target clamped to `[0, duration]`.
    pub fn seek(&self, target_secs: f64) -> Option<MediaCommand> {
        if !self.controls_enabled() || !target_secs.is_finite() {
            return None;
        }
        let target_secs = target_secs.clamp(0.0, self.duration_secs.max(0.0));
        Some(MediaCommand::Seek { target_secs })
    }

    /// Sets the volume. Zero mutes, a positive value unmutes.
    pub fn set_volume(&mut self, value: f32) -> Vec<MediaCommand> {
        self.volume = Volume::new(value);
        self.muted = self.volume.is_silent();
        if !self.muted {
            self.restore_volume = None;
        }
        self.audio_commands()
    }

    /// Mutes while remembering the level, or restores it (full volume when
    /// nothing was remembered).
    pub fn toggle_mute(&mut self) -> Vec<MediaCommand> {
        if self.muted {
            self.volume = self
                .restore_volume
                .take()
                .filter(|volume| !volume.is_silent())
                .unwrap_or(Volume::new(1.0));
            self.muted = false;
        } else {
            self.restore_volume = Some(self.volume);
            self.volume = Volume::new(0.0);
            self.muted = true;
        }
        self.audio_commands()
    }

    fn audio_commands(&self) -> Vec<MediaCommand> {
        vec![
            MediaCommand::SetVolume(self.volume.value()),
            MediaCommand::SetMuted(self.muted),
        ]
    }

    #[must_use]
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state == PlaybackState::Loading
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    #[must_use]
    pub fn has_error(&self) -> bool {
        matches!(self.state, PlaybackState::Errored(_))
    }

    #[must_use]
    pub fn error(&self) -> Option<&VideoError> {
        match &self.state {
            PlaybackState::Errored(error) => Some(error),
            _ => None,
        }
    }

    /// Controls only respond once the resource is usable.
    #[must_use]
    pub fn controls_enabled(&self) -> bool {
        matches!(
            self.state,
            PlaybackState::Ready
                | PlaybackState::Playing
                | PlaybackState::Paused
                | PlaybackState::Ended
        )
    }

    #[must_use]
    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Upper bound for the seek slider; 100 until the duration is known.
    #[must_use]
    pub fn slider_max(&self) -> f64 {
        if self.duration_secs > 0.0 {
            self.duration_secs
        } else {
            100.0
        }
    }

    #[must_use]
    pub fn volume(&self) -> Volume {
        self.volume
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Iced subscription for video playback.
//!
//! Connects the blocking FFmpeg worker to the UI event loop. The first
//! message is always [`PlaybackMessage::Started`] carrying the command
//! handle; after that the worker's events and frames are forwarded as they
//! arrive.

use super::decoder::{self, DecoderEvent, WorkerConfig};
use super::state::{MediaCommand, MediaEvent};
use super::Volume;
use crate::error::VideoError;
use iced::futures::SinkExt;
use iced::stream;
use iced::widget::image;
use tokio::sync::mpsc;

/// Capacity of the worker's event channel. Keeps decoding at most a few
/// frames ahead of the UI.
const EVENT_CHANNEL_CAPACITY: usize = 4;

/// Subscription ID for video playback.
/// Each playback session gets a unique ID so a new video restarts the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VideoPlaybackId(u64);

/// What to play and how to start.
#[derive(Debug, Clone)]
pub struct PlaybackSource {
    pub url: String,
    pub session_id: u64,
    pub autoplay: bool,
    pub volume: Volume,
    pub muted: bool,
}

/// Handle for sending commands to the playback worker from the UI.
#[derive(Clone)]
pub struct CommandSender {
    tx: mpsc::UnboundedSender<MediaCommand>,
}

impl CommandSender {
    /// Sends a command to the worker.
    ///
    /// # Errors
    ///
    /// Returns an error when the worker has already stopped.
    pub fn send(&self, command: MediaCommand) -> Result<(), VideoError> {
        self.tx
            .send(command)
            .map_err(|_| VideoError::Other("Video decoder not running".to_string()))
    }
}

impl std::fmt::Debug for CommandSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSender")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

/// Messages emitted by the video playback subscription.
#[derive(Debug, Clone)]
pub enum PlaybackMessage {
    /// Worker started; commands go through this sender.
    Started(CommandSender),

    /// State notification from the media resource.
    Event(MediaEvent),

    /// A new frame is ready for display.
    Frame(image::Handle),
}

impl From<DecoderEvent> for PlaybackMessage {
    fn from(event: DecoderEvent) -> Self {
        match event {
            DecoderEvent::Media(event) => PlaybackMessage::Event(event),
            DecoderEvent::Frame(frame) => PlaybackMessage::Frame(image::Handle::from_rgba(
                frame.width,
                frame.height,
                std::sync::Arc::unwrap_or_clone(frame.rgba_data),
            )),
        }
    }
}

/// Creates a video playback subscription for one playback session.
pub fn video_playback(source: PlaybackSource) -> iced::Subscription<PlaybackMessage> {
    iced::Subscription::run_with_id(
        VideoPlaybackId(source.session_id),
        stream::channel(100, move |mut output| async move {
            let (command_tx, command_rx) = mpsc::unbounded_channel();
            let (event_tx, mut event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

            if let Err(error) = output
                .send(PlaybackMessage::Started(CommandSender {
                    tx: command_tx.clone(),
                }))
                .await
            {
                tracing::debug!(%error, "player dropped before the session started");
            }

            let config = WorkerConfig {
                url: source.url,
                autoplay: source.autoplay,
                volume: source.volume,
                muted: source.muted,
            };

            // FFmpeg contexts are not Send, so the whole session lives on a
            // blocking thread.
            let worker = tokio::task::spawn_blocking(move || {
                decoder::run_blocking(config, command_rx, event_tx);
            });

            while let Some(event) = event_rx.recv().await {
                if output.send(PlaybackMessage::from(event)).await.is_err() {
                    break;
                }
            }

            if let Err(error) = command_tx.send(MediaCommand::Stop) {
                tracing::debug!(%error, "worker finished before stop");
            }
            drop(event_rx);
            if let Err(e) = worker.await {
                tracing::warn!(error = %e, "playback worker panicked");
            }

            // Keep the subscription alive; iced drops it when the session ID
            // changes.
            std::future::pending::<()>().await;
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn command_sender_reports_stopped_worker() {
        let (tx, rx) = mpsc::unbounded_channel();
        let sender = CommandSender { tx };
        assert!(sender.send(MediaCommand::Play).is_ok());

        drop(rx);
        assert!(sender.send(MediaCommand::Pause).is_err());
        assert!(format!("{sender:?}").contains("closed: true"));
    }

    #[test]
    fn media_events_are_forwarded_unchanged() {
        let message = PlaybackMessage::from(DecoderEvent::Media(MediaEvent::CanPlay));
        assert!(matches!(message, PlaybackMessage::Event(MediaEvent::CanPlay)));
    }

    #[test]
    fn frames_become_image_handles() {
        let frame = decoder::DecodedFrame {
            rgba_data: Arc::new(vec![0; 2 * 2 * 4]),
            width: 2,
            height: 2,
            pts_secs: 0.0,
        };
        assert!(matches!(
            PlaybackMessage::from(DecoderEvent::Frame(frame)),
            PlaybackMessage::Frame(_)
        ));
    }

    #[test]
    fn playback_ids_differ_per_session() {
        assert_ne!(VideoPlaybackId(1), VideoPlaybackId(2));
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Video playback engine for Mathlens.
//!
//! FFmpeg opens and decodes the generated video straight from its URL on a
//! blocking worker; cpal plays the audio track. The UI only sees
//! [`PlaybackMessage`]s from [`video_playback`] and drives the worker through
//! a [`CommandSender`], while [`MediaPlayer`] tracks what the resource
//! reported.

mod audio_output;
mod decoder;
mod state;
pub mod subscription;
pub mod time_units;
mod volume;

pub use decoder::{init_ffmpeg, DecodedFrame, DecoderEvent};
pub use state::{MediaCommand, MediaEvent, MediaPlayer, PlaybackState};
pub use subscription::{video_playback, CommandSender, PlaybackMessage, PlaybackSource};
pub use volume::Volume;

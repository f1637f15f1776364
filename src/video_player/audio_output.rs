// SPDX-License-Identifier: MPL-2.0
//! Audio output using cpal.
//!
//! The decoder thread owns the [`AudioOutput`] and pushes resampled samples
//! into a bounded buffer; the cpal callback drains it. Volume, mute and pause
//! are shared atomics so the callback never blocks on them.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::VideoError;

/// Seconds of audio the buffer may hold before samples are dropped.
const MAX_BUFFER_SECS: usize = 2;

/// Shared state between the audio callback and the decoder thread.
struct SharedState {
    /// Volume stored as f32 bits for atomic access.
    volume_bits: AtomicU32,
    muted: AtomicBool,
    paused: AtomicBool,
}

impl SharedState {
    fn new(volume: f32, muted: bool) -> Self {
        Self {
            volume_bits: AtomicU32::new(volume.to_bits()),
            muted: AtomicBool::new(muted),
            paused: AtomicBool::new(true),
        }
    }

    fn volume(&self) -> f32 {
        f32::from_bits(self.volume_bits.load(Ordering::Relaxed))
    }

    fn set_volume(&self, volume: f32) {
        self.volume_bits.store(volume.to_bits(), Ordering::Relaxed);
    }

    fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::Relaxed);
    }

    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Relaxed);
    }
}

/// Output stream on the default device. Starts paused.
pub struct AudioOutput {
    shared_state: Arc<SharedState>,
    buffer: Arc<Mutex<Vec<f32>>>,
    max_buffer_len: usize,
    sample_rate: u32,
    channels: u16,
    /// Kept alive to maintain playback.
    _stream: cpal::Stream,
}

impl AudioOutput {
    /// Opens the default output device.
    ///
    /// Callers resample to [`Self::sample_rate`] and [`Self::channels`].
    pub fn new(volume: super::Volume, muted: bool) -> Result<Self, VideoError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| VideoError::Other("No audio output device found".to_string()))?;

        let supported_config = device
            .default_output_config()
            .map_err(|e| VideoError::Other(format!("Failed to get audio config: {e}")))?;

        let sample_rate = supported_config.sample_rate();
        let channels = supported_config.channels();

        let shared_state = Arc::new(SharedState::new(volume.value(), muted));
        let max_buffer_len = sample_rate as usize * channels as usize * MAX_BUFFER_SECS;
        let buffer = Arc::new(Mutex::new(Vec::with_capacity(max_buffer_len)));

        let config: cpal::StreamConfig = supported_config.config();
        let stream = match supported_config.sample_format() {
            cpal::SampleFormat::F32 => Self::build_stream::<f32>(
                &device,
                &config,
                Arc::clone(&buffer),
                Arc::clone(&shared_state),
            )?,
            cpal::SampleFormat::I16 => Self::build_stream::<i16>(
                &device,
                &config,
                Arc::clone(&buffer),
                Arc::clone(&shared_state),
            )?,
            cpal::SampleFormat::U16 => Self::build_stream::<u16>(
                &device,
                &config,
                Arc::clone(&buffer),
                Arc::clone(&shared_state),
            )?,
            other => {
                return Err(VideoError::Other(format!(
                    "Unsupported audio sample format: {other:?}"
                )))
            }
        };

        stream
            .play()
            .map_err(|e| VideoError::Other(format!("Failed to start audio stream: {e}")))?;

        tracing::debug!(sample_rate, channels, "audio output opened");

        Ok(Self {
            shared_state,
            buffer,
            max_buffer_len,
            sample_rate,
            channels,
            _stream: stream,
        })
    }

    fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        buffer: Arc<Mutex<Vec<f32>>>,
        shared_state: Arc<SharedState>,
    ) -> Result<cpal::Stream, VideoError> {
        device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    let silence = T::from_sample(0.0f32);
                    if shared_state.is_paused() {
                        data.fill(silence);
                        return;
                    }

                    let Ok(mut buf) = buffer.lock() else {
                        data.fill(silence);
                        return;
                    };

                    let gain = if shared_state.is_muted() {
                        0.0
                    } else {
                        perceptual_gain(shared_state.volume())
                    };

                    for (i, sample) in data.iter_mut().enumerate() {
                        *sample = match buf.get(i) {
                            // i16 conversion overflows at exactly 1.0
                            Some(value) => T::from_sample((value * gain).clamp(-1.0, 0.999_999_9)),
                            None => silence,
                        };
                    }

                    let consumed = data.len().min(buf.len());
                    buf.drain(..consumed);
                },
                |err| {
                    tracing::warn!(error = %err, "audio output error");
                },
                None,
            )
            .map_err(|e| VideoError::Other(format!("Failed to build audio stream: {e}")))
    }

    /// Queues interleaved samples. Samples beyond the buffer cap are dropped.
    pub fn queue(&self, samples: &[f32]) {
        if let Ok(mut buf) = self.buffer.lock() {
            let room = self.max_buffer_len.saturating_sub(buf.len());
            let take = room.min(samples.len());
            if take < samples.len() {
                tracing::trace!(dropped = samples.len() - take, "audio buffer full");
            }
            buf.extend_from_slice(&samples[..take]);
        }
    }

    /// Discards queued audio, used on seek.
    pub fn clear(&self) {
        if let Ok(mut buf) = self.buffer.lock() {
            buf.clear();
        }
    }

    pub fn pause(&self) {
        self.shared_state.set_paused(true);
    }

    pub fn resume(&self) {
        self.shared_state.set_paused(false);
    }

    pub fn set_volume(&self, volume: super::Volume) {
        self.shared_state.set_volume(volume.value());
    }

    pub fn set_muted(&self, muted: bool) {
        self.shared_state.set_muted(muted);
    }

    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[must_use]
    pub fn channels(&self) -> u16 {
        self.channels
    }
}

/// Quadratic curve so the slider feels linear to the ear.
fn perceptual_gain(volume: f32) -> f32 {
    volume * volume
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use crate::video_player::Volume;

    #[test]
    fn shared_state_starts_paused_with_given_settings() {
        let state = SharedState::new(0.6, true);
        assert_abs_diff_eq!(state.volume(), 0.6);
        assert!(state.is_muted());
        assert!(state.is_paused());
    }

    #[test]
    fn shared_state_updates() {
        let state = SharedState::new(1.0, false);
        state.set_volume(0.25);
        state.set_muted(true);
        state.set_paused(false);

        assert_abs_diff_eq!(state.volume(), 0.25);
        assert!(state.is_muted());
        assert!(!state.is_paused());
    }

    #[test]
    fn perceptual_gain_is_quadratic() {
        assert_abs_diff_eq!(perceptual_gain(0.5), 0.25);
        assert_abs_diff_eq!(perceptual_gain(1.0), 1.0);
        assert_abs_diff_eq!(perceptual_gain(0.0), 0.0);
    }

    #[test]
    #[ignore = "requires audio hardware"]
    fn audio_output_can_be_created() {
        if let Ok(output) = AudioOutput::new(Volume::new(0.8), false) {
            assert!(output.sample_rate() > 0);
            assert!(output.channels() > 0);
            output.queue(&[0.0; 64]);
            output.clear();
        }
    }
}

// SPDX-License-Identifier: MPL-2.0
//! FFmpeg playback worker.
//!
//! One blocking thread per playback session opens the video URL, decodes
//! video to RGBA frames and audio into an [`AudioOutput`], and reports
//! [`MediaEvent`]s. Packets are read in container order, so audio and video
//! share a single demuxer. Video frames are paced against the wall clock
//! from the moment playback (re)started.
//!
//! The worker ends when it receives [`MediaCommand::Stop`], when the command
//! channel closes, or when nobody listens to its events any more.

use super::audio_output::AudioOutput;
use super::state::{MediaCommand, MediaEvent};
use super::time_units::secs_to_av_timestamp;
use super::Volume;
use crate::error::VideoError;
use ffmpeg_next as ffmpeg;
use std::sync::{Arc, Once};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

static FFMPEG_INIT: Once = Once::new();

/// Minimum interval between two `TimeUpdate` events.
const TIME_UPDATE_INTERVAL: Duration = Duration::from_millis(250);

/// Idle sleep while paused.
const IDLE_POLL: Duration = Duration::from_millis(10);

/// Frames this far before a seek target are still shown.
const SEEK_TOLERANCE_SECS: f64 = 0.05;

/// Initializes FFmpeg once per process, with network protocols and quiet
/// logging.
pub fn init_ffmpeg() -> Result<(), VideoError> {
    let mut init_result = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg::init() {
            init_result = Err(VideoError::Other(format!(
                "FFmpeg initialization failed: {e}"
            )));
            return;
        }
        ffmpeg::format::network::init();

        // SAFETY: av_log_set_level only changes the global log threshold.
        unsafe {
            ffmpeg::ffi::av_log_set_level(ffmpeg::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

/// A decoded video frame ready for display.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// RGBA pixel data (width × height × 4 bytes).
    pub rgba_data: Arc<Vec<u8>>,
    pub width: u32,
    pub height: u32,
    /// Presentation timestamp in seconds.
    pub pts_secs: f64,
}

/// Output of the worker.
#[derive(Debug, Clone)]
pub enum DecoderEvent {
    Media(MediaEvent),
    Frame(DecodedFrame),
}

/// What the worker needs to start.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub url: String,
    pub autoplay: bool,
    pub volume: Volume,
    pub muted: bool,
}

struct VideoPipeline {
    stream_index: usize,
    decoder: ffmpeg::decoder::Video,
    scaler: ffmpeg::software::scaling::Context,
    time_base: f64,
}

struct AudioPipeline {
    stream_index: usize,
    decoder: ffmpeg::decoder::Audio,
    resampler: ffmpeg::software::resampling::Context,
    output: AudioOutput,
    time_base: f64,
}

/// Playback clock and position bookkeeping.
#[derive(Debug, Default)]
struct Clock {
    playing: bool,
    ended: bool,
    /// Wall-clock instant and PTS of the first frame since (re)start.
    anchor: Option<(Instant, f64)>,
    position_secs: f64,
    seek_target: Option<f64>,
    /// Decode one frame while paused to show the seek result.
    show_next_frame: bool,
    last_time_update: Option<Instant>,
}

impl Clock {
    fn restart(&mut self) {
        self.anchor = None;
        self.last_time_update = None;
    }

    /// Sleeps until `pts_secs` is due.
    fn pace(&mut self, pts_secs: f64) {
        if !self.playing {
            return;
        }
        match self.anchor {
            None => self.anchor = Some((Instant::now(), pts_secs)),
            Some((start, first_pts)) => {
                let delay = (pts_secs - first_pts).max(0.0);
                let due = start + Duration::from_secs_f64(delay);
                let now = Instant::now();
                if due > now {
                    std::thread::sleep(due - now);
                }
            }
        }
    }

    fn time_update_due(&mut self) -> bool {
        let now = Instant::now();
        match self.last_time_update {
            Some(last) if now.duration_since(last) < TIME_UPDATE_INTERVAL => false,
            _ => {
                self.last_time_update = Some(now);
                true
            }
        }
    }
}

/// Sends events, remembering whether the receiver is still there.
struct Emitter {
    tx: mpsc::Sender<DecoderEvent>,
}

impl Emitter {
    fn media(&self, event: MediaEvent) -> bool {
        self.tx.blocking_send(DecoderEvent::Media(event)).is_ok()
    }

    fn frame(&self, frame: DecodedFrame) -> bool {
        self.tx.blocking_send(DecoderEvent::Frame(frame)).is_ok()
    }
}

/// Runs a playback session to completion on the current (blocking) thread.
pub fn run_blocking(
    config: WorkerConfig,
    mut command_rx: mpsc::UnboundedReceiver<MediaCommand>,
    event_tx: mpsc::Sender<DecoderEvent>,
) {
    let emitter = Emitter { tx: event_tx };
    if !emitter.media(MediaEvent::LoadStart) {
        return;
    }

    tracing::info!(url = %config.url, "opening video");
    match Session::open(&config, &emitter) {
        Ok(mut session) => session.run(&config, &mut command_rx, &emitter),
        Err(error) => {
            tracing::warn!(url = %config.url, %error, "video could not be opened");
            emitter.media(MediaEvent::Error(error));
        }
    }
}

struct Session {
    input: ffmpeg::format::context::Input,
    video: VideoPipeline,
    audio: Option<AudioPipeline>,
    clock: Clock,
}

impl Session {
    fn open(config: &WorkerConfig, emitter: &Emitter) -> Result<Self, VideoError> {
        init_ffmpeg()?;

        let input = ffmpeg::format::input(&config.url)
            .map_err(|e| VideoError::from_message(&format!("Failed to open video: {e}")))?;

        let duration = input.duration();
        if duration > 0 {
            emitter.media(MediaEvent::LoadedMetadata {
                duration_secs: duration as f64 / f64::from(ffmpeg::ffi::AV_TIME_BASE),
            });
        }

        let video = open_video(&input)?;
        let audio = match open_audio(&input, config) {
            Ok(audio) => audio,
            Err(error) => {
                tracing::warn!(%error, "continuing without audio");
                None
            }
        };

        Ok(Self {
            input,
            video,
            audio,
            clock: Clock {
                show_next_frame: true,
                ..Clock::default()
            },
        })
    }

    fn run(
        &mut self,
        config: &WorkerConfig,
        command_rx: &mut mpsc::UnboundedReceiver<MediaCommand>,
        emitter: &Emitter,
    ) {
        // First frame as poster, then ready.
        if !self.decode_step(emitter) {
            return;
        }
        if !emitter.media(MediaEvent::CanPlay) {
            return;
        }
        if config.autoplay && !self.handle(MediaCommand::Play, emitter) {
            return;
        }

        loop {
            loop {
                match command_rx.try_recv() {
                    Ok(MediaCommand::Stop) => return,
                    Ok(command) => {
                        if !self.handle(command, emitter) {
                            return;
                        }
                    }
                    Err(mpsc::error::TryRecvError::Empty) => break,
                    Err(mpsc::error::TryRecvError::Disconnected) => return,
                }
            }

            if !self.clock.playing && !self.clock.show_next_frame {
                std::thread::sleep(IDLE_POLL);
                continue;
            }

            if !self.decode_step(emitter) {
                return;
            }
        }
    }

    /// Applies a command. Returns `false` when the listener is gone.
    fn handle(&mut self, command: MediaCommand, emitter: &Emitter) -> bool {
        match command {
            MediaCommand::Play => {
                if self.clock.ended && !self.seek_to(0.0) {
                    return emitter.media(MediaEvent::Error(VideoError::DecodingFailed(
                        "Restart failed".to_string(),
                    )));
                }
                self.clock.playing = true;
                self.clock.ended = false;
                self.clock.restart();
                if let Some(audio) = &self.audio {
                    audio.output.resume();
                }
                emitter.media(MediaEvent::Play)
            }
            MediaCommand::Pause => {
                self.clock.playing = false;
                self.clock.restart();
                if let Some(audio) = &self.audio {
                    audio.output.pause();
                }
                emitter.media(MediaEvent::Pause)
            }
            MediaCommand::Seek { target_secs } => {
                if !self.seek_to(target_secs) {
                    tracing::warn!(target_secs, "seek failed");
                    return true;
                }
                self.clock.ended = false;
                if !self.clock.playing {
                    self.clock.show_next_frame = true;
                }
                emitter.media(MediaEvent::TimeUpdate {
                    position_secs: target_secs,
                })
            }
            MediaCommand::SetVolume(volume) => {
                if let Some(audio) = &self.audio {
                    audio.output.set_volume(Volume::new(volume));
                }
                true
            }
            MediaCommand::SetMuted(muted) => {
                if let Some(audio) = &self.audio {
                    audio.output.set_muted(muted);
                }
                true
            }
            MediaCommand::Stop => false,
        }
    }

    fn seek_to(&mut self, target_secs: f64) -> bool {
        let timestamp = secs_to_av_timestamp(target_secs);
        // RangeTo lets FFmpeg land on the keyframe before the target.
        if let Err(e) = self.input.seek(timestamp, ..timestamp) {
            tracing::debug!(error = %e, "ffmpeg seek failed");
            return false;
        }
        self.video.decoder.flush();
        if let Some(audio) = &mut self.audio {
            audio.decoder.flush();
            audio.output.clear();
        }
        self.clock.position_secs = target_secs;
        self.clock.seek_target = Some(target_secs);
        self.clock.restart();
        true
    }

    /// Reads packets until one video frame was shown or the stream ended.
    ///
    /// Returns `false` when the listener is gone.
    fn decode_step(&mut self, emitter: &Emitter) -> bool {
        loop {
            let next = self
                .input
                .packets()
                .next()
                .map(|(stream, packet)| (stream.index(), packet));

            let Some((index, packet)) = next else {
                return self.end_of_stream(emitter);
            };

            if index == self.video.stream_index {
                match self.decode_video_packet(&packet, emitter) {
                    Some(true) => return true,
                    Some(false) => {}
                    None => return false,
                }
            } else if let Some(audio) = &mut self.audio {
                if index == audio.stream_index {
                    audio.decode_packet(&packet, self.clock.seek_target);
                }
            }
        }
    }

    /// `Some(true)` when a frame was shown, `Some(false)` when the packet
    /// produced nothing to show, `None` when the listener is gone.
    fn decode_video_packet(
        &mut self,
        packet: &ffmpeg::Packet,
        emitter: &Emitter,
    ) -> Option<bool> {
        if let Err(e) = self.video.decoder.send_packet(packet) {
            tracing::debug!(error = %e, "video packet rejected");
            return Some(false);
        }

        let mut shown = false;
        let mut decoded = ffmpeg::frame::Video::empty();
        while self.video.decoder.receive_frame(&mut decoded).is_ok() {
            let pts_secs = decoded
                .timestamp()
                .map_or(self.clock.position_secs, |pts| pts as f64 * self.video.time_base);

            if let Some(target) = self.clock.seek_target {
                if pts_secs + SEEK_TOLERANCE_SECS < target {
                    continue;
                }
                self.clock.seek_target = None;
            }

            let mut rgba = ffmpeg::frame::Video::empty();
            if let Err(e) = self.video.scaler.run(&decoded, &mut rgba) {
                tracing::debug!(error = %e, "frame scaling failed");
                continue;
            }

            self.clock.pace(pts_secs);
            self.clock.position_secs = pts_secs;

            let frame = DecodedFrame {
                rgba_data: Arc::new(extract_rgba_data(&rgba)),
                width: rgba.width(),
                height: rgba.height(),
                pts_secs,
            };
            if !emitter.frame(frame) {
                return None;
            }
            if self.clock.playing
                && self.clock.time_update_due()
                && !emitter.media(MediaEvent::TimeUpdate {
                    position_secs: pts_secs,
                })
            {
                return None;
            }

            self.clock.show_next_frame = false;
            shown = true;
        }
        Some(shown)
    }

    fn end_of_stream(&mut self, emitter: &Emitter) -> bool {
        let was_playing = self.clock.playing;
        self.clock.playing = false;
        self.clock.show_next_frame = false;
        self.clock.seek_target = None;
        self.clock.restart();

        if self.clock.ended {
            return true;
        }
        self.clock.ended = true;

        if !was_playing && self.clock.position_secs <= 0.0 {
            // Nothing was ever decoded.
            return emitter.media(MediaEvent::Error(VideoError::CorruptedStream));
        }
        tracing::debug!("end of stream");
        emitter.media(MediaEvent::Ended)
    }
}

impl AudioPipeline {
    fn decode_packet(&mut self, packet: &ffmpeg::Packet, seek_target: Option<f64>) {
        if let Err(e) = self.decoder.send_packet(packet) {
            tracing::debug!(error = %e, "audio packet rejected");
            return;
        }

        let mut decoded = ffmpeg::frame::Audio::empty();
        while self.decoder.receive_frame(&mut decoded).is_ok() {
            if let (Some(target), Some(pts)) = (seek_target, decoded.timestamp()) {
                if (pts as f64 * self.time_base) + SEEK_TOLERANCE_SECS < target {
                    continue;
                }
            }

            let mut resampled = ffmpeg::frame::Audio::empty();
            if let Err(e) = self.resampler.run(&decoded, &mut resampled) {
                tracing::debug!(error = %e, "audio resampling failed");
                continue;
            }
            let samples = extract_samples(&resampled, self.output.channels());
            self.output.queue(&samples);
        }
    }
}

fn open_video(input: &ffmpeg::format::context::Input) -> Result<VideoPipeline, VideoError> {
    let stream = input
        .streams()
        .best(ffmpeg::media::Type::Video)
        .ok_or(VideoError::NoVideoStream)?;

    let context = ffmpeg::codec::context::Context::from_parameters(stream.parameters())
        .map_err(|e| VideoError::from_message(&format!("Failed to create codec context: {e}")))?;
    let decoder = context
        .decoder()
        .video()
        .map_err(|e| VideoError::from_message(&format!("Failed to create video decoder: {e}")))?;

    let scaler = ffmpeg::software::scaling::Context::get(
        decoder.format(),
        decoder.width(),
        decoder.height(),
        ffmpeg::format::Pixel::RGBA,
        decoder.width(),
        decoder.height(),
        ffmpeg::software::scaling::Flags::BILINEAR,
    )
    .map_err(|e| VideoError::DecodingFailed(format!("Failed to create scaler: {e}")))?;

    let time_base = stream.time_base();
    Ok(VideoPipeline {
        stream_index: stream.index(),
        decoder,
        scaler,
        time_base: f64::from(time_base.numerator()) / f64::from(time_base.denominator()),
    })
}

fn open_audio(
    input: &ffmpeg::format::context::Input,
    config: &WorkerConfig,
) -> Result<Option<AudioPipeline>, VideoError> {
    let Some(stream) = input.streams().best(ffmpeg::media::Type::Audio) else {
        return Ok(None);
    };

    let context = ffmpeg::codec::context::Context::from_parameters(stream.parameters())
        .map_err(|e| VideoError::Other(format!("Failed to create audio codec context: {e}")))?;
    let decoder = context
        .decoder()
        .audio()
        .map_err(|e| VideoError::Other(format!("Failed to create audio decoder: {e}")))?;

    let output = AudioOutput::new(config.volume, config.muted)?;

    let output_layout = match output.channels() {
        1 => ffmpeg::ChannelLayout::MONO,
        _ => ffmpeg::ChannelLayout::STEREO,
    };
    let resampler = ffmpeg::software::resampling::Context::get(
        decoder.format(),
        decoder.channel_layout(),
        decoder.rate(),
        ffmpeg::format::Sample::F32(ffmpeg::format::sample::Type::Packed),
        output_layout,
        output.sample_rate(),
    )
    .map_err(|e| VideoError::Other(format!("Failed to create resampler: {e}")))?;

    let time_base = stream.time_base();
    Ok(Some(AudioPipeline {
        stream_index: stream.index(),
        decoder,
        resampler,
        output,
        time_base: f64::from(time_base.numerator()) / f64::from(time_base.denominator()),
    }))
}

/// Copies RGBA rows out of a frame, dropping the stride padding.
fn extract_rgba_data(frame: &ffmpeg::frame::Video) -> Vec<u8> {
    let width = frame.width() as usize;
    let height = frame.height() as usize;
    let data = frame.data(0);
    let stride = frame.stride(0);

    let mut rgba_bytes = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        let row_start = y * stride;
        let row_end = row_start + width * 4;
        if row_end > data.len() {
            break;
        }
        rgba_bytes.extend_from_slice(&data[row_start..row_end]);
    }
    rgba_bytes
}

/// Reads packed little-endian f32 samples from a resampled frame.
///
/// Output channels are mono or stereo; wider devices get the stereo pair
/// duplicated into their first two channels only by the device itself.
fn extract_samples(frame: &ffmpeg::frame::Audio, device_channels: u16) -> Vec<f32> {
    let channels = if device_channels == 1 { 1 } else { 2 };
    let data = frame.data(0);
    let sample_count = (frame.samples() * channels).min(data.len() / 4);

    let packed: Vec<f32> = data[..sample_count * 4]
        .chunks_exact(4)
        .map(|bytes| f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
        .collect();

    spread_channels(&packed, channels, usize::from(device_channels))
}

/// Maps interleaved mono/stereo samples onto the device channel count,
/// leaving extra channels silent.
fn spread_channels(samples: &[f32], source: usize, target: usize) -> Vec<f32> {
    if source == target || target == 0 {
        return samples.to_vec();
    }
    let frames = samples.len() / source;
    let mut out = vec![0.0; frames * target];
    for (frame, chunk) in samples.chunks_exact(source).enumerate() {
        let base = frame * target;
        for (channel, value) in chunk.iter().enumerate().take(target) {
            out[base + channel] = *value;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_reports_time_updates_at_most_every_interval() {
        let mut clock = Clock::default();
        assert!(clock.time_update_due());
        assert!(!clock.time_update_due());

        clock.last_time_update = Some(Instant::now() - TIME_UPDATE_INTERVAL * 2);
        assert!(clock.time_update_due());
    }

    #[test]
    fn clock_does_not_pace_while_paused() {
        let mut clock = Clock::default();
        let start = Instant::now();
        clock.pace(100.0);
        assert!(start.elapsed() < Duration::from_millis(50));
        assert!(clock.anchor.is_none());
    }

    #[test]
    fn clock_anchors_on_first_frame() {
        let mut clock = Clock {
            playing: true,
            ..Clock::default()
        };
        clock.pace(12.0);
        assert!(matches!(clock.anchor, Some((_, pts)) if (pts - 12.0).abs() < 1e-9));

        clock.restart();
        assert!(clock.anchor.is_none());
    }

    #[test]
    fn spread_stereo_to_surround_leaves_extra_channels_silent() {
        let stereo = [0.1, 0.2, 0.3, 0.4];
        let out = spread_channels(&stereo, 2, 4);
        assert_eq!(out, vec![0.1, 0.2, 0.0, 0.0, 0.3, 0.4, 0.0, 0.0]);
    }

    #[test]
    fn spread_is_identity_for_matching_layout() {
        let stereo = [0.5, -0.5];
        assert_eq!(spread_channels(&stereo, 2, 2), stereo.to_vec());
    }

    #[tokio::test]
    async fn unreachable_url_reports_load_start_then_error() {
        let (_command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, mut event_rx) = mpsc::channel(8);
        let config = WorkerConfig {
            url: "/nonexistent/mathlens/video.mp4".to_string(),
            autoplay: false,
            volume: Volume::default(),
            muted: false,
        };

        tokio::task::spawn_blocking(move || run_blocking(config, command_rx, event_tx));

        assert!(matches!(
            event_rx.recv().await,
            Some(DecoderEvent::Media(MediaEvent::LoadStart))
        ));
        assert!(matches!(
            event_rx.recv().await,
            Some(DecoderEvent::Media(MediaEvent::Error(_)))
        ));
    }
}

// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Http(String),
    Video(VideoError),
}

/// Playback failures, categorized so the player can show a localized message.
#[derive(Debug, Clone, PartialEq)]
pub enum VideoError {
    /// The video host could not be reached or refused the request.
    Network(String),

    /// Video codec is not supported by the system's FFmpeg.
    UnsupportedCodec(String),

    /// Downloaded data is not a playable container.
    CorruptedStream,

    /// The resource contains no video stream.
    NoVideoStream,

    /// Decoding failed during playback.
    DecodingFailed(String),

    /// Generic error with raw message.
    Other(String),
}

impl VideoError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            VideoError::Network(_) => "player-error-network",
            VideoError::UnsupportedCodec(_) => "player-error-unsupported-codec",
            VideoError::CorruptedStream => "player-error-corrupted",
            VideoError::NoVideoStream => "player-error-no-video-stream",
            VideoError::DecodingFailed(_) => "player-error-decoding-failed",
            VideoError::Other(_) => "player-error-general",
        }
    }

    /// Categorizes a raw FFmpeg or decoder message.
    pub fn from_message(msg: &str) -> Self {
        let lower = msg.to_lowercase();

        if lower.contains("codec") || lower.contains("decoder") {
            if let Some(codec) = Self::extract_codec_name(&lower) {
                return VideoError::UnsupportedCodec(codec);
            }
            if lower.contains("not found") || lower.contains("unsupported") {
                return VideoError::DecodingFailed(msg.to_string());
            }
        }

        if lower.contains("connection")
            || lower.contains("timed out")
            || lower.contains("network")
            || lower.contains("server returned")
            || lower.contains("name resolution")
            || lower.contains("404")
            || lower.contains("403")
        {
            return VideoError::Network(msg.to_string());
        }

        if lower.contains("no video stream") || lower.contains("no video track") {
            return VideoError::NoVideoStream;
        }

        if lower.contains("invalid data found")
            || lower.contains("corrupt")
            || lower.contains("malformed")
        {
            return VideoError::CorruptedStream;
        }

        if lower.contains("packet")
            || lower.contains("scaling")
            || lower.contains("seek")
            || lower.contains("decode")
        {
            return VideoError::DecodingFailed(msg.to_string());
        }

        VideoError::Other(msg.to_string())
    }

    fn extract_codec_name(msg: &str) -> Option<String> {
        ["h264", "hevc", "h265", "vp8", "vp9", "av1", "mpeg4"]
            .into_iter()
            .find(|codec| msg.contains(codec))
            .map(str::to_uppercase)
    }
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::Network(msg) => write!(f, "Could not fetch video: {}", msg),
            VideoError::UnsupportedCodec(codec) => {
                write!(f, "Unsupported video codec: {}", codec)
            }
            VideoError::CorruptedStream => write!(f, "Video data is corrupted"),
            VideoError::NoVideoStream => write!(f, "No video stream found"),
            VideoError::DecodingFailed(msg) => write!(f, "Decoding failed: {}", msg),
            VideoError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Http(e) => write!(f, "HTTP Error: {}", e),
            Error::Video(e) => write!(f, "Video Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<VideoError> for Error {
    fn from(err: VideoError) -> Self {
        Error::Video(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<ciborium::de::Error<std::io::Error>> for Error {
    fn from(err: ciborium::de::Error<std::io::Error>) -> Self {
        Error::Io(format!("CBOR decode: {}", err))
    }
}

impl From<ciborium::ser::Error<std::io::Error>> for Error {
    fn from(err: ciborium::ser::Error<std::io::Error>) -> Self {
        Error::Io(format!("CBOR encode: {}", err))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let err: Error = std::io::Error::other("boom").into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn toml_parse_error_becomes_config_error() {
        let parsed: std::result::Result<toml::Value, _> = toml::from_str("a = = 1");
        let err: Error = parsed.unwrap_err().into();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn video_error_from_message_network() {
        let err = VideoError::from_message("Connection refused");
        assert!(matches!(err, VideoError::Network(_)));

        let err = VideoError::from_message("Server returned 404 Not Found");
        assert!(matches!(err, VideoError::Network(_)));
    }

    #[test]
    fn video_error_from_message_no_stream() {
        let err = VideoError::from_message("No video stream found");
        assert_eq!(err, VideoError::NoVideoStream);
    }

    #[test]
    fn video_error_from_message_codec() {
        let err = VideoError::from_message("Decoder h264 not found");
        assert_eq!(err, VideoError::UnsupportedCodec("H264".to_string()));
    }

    #[test]
    fn video_error_from_message_corrupted() {
        let err = VideoError::from_message("Invalid data found when processing input");
        assert_eq!(err, VideoError::CorruptedStream);
    }

    #[test]
    fn video_error_from_message_decoding() {
        let err = VideoError::from_message("Packet send failed: error");
        assert!(matches!(err, VideoError::DecodingFailed(_)));
    }

    #[test]
    fn video_error_falls_back_to_other() {
        let err = VideoError::from_message("something odd");
        assert_eq!(err, VideoError::Other("something odd".to_string()));
        assert_eq!(err.i18n_key(), "player-error-general");
    }

    #[test]
    fn video_error_display_includes_codec() {
        let err = VideoError::UnsupportedCodec("AV1".to_string());
        assert!(format!("{}", err).contains("AV1"));
    }
}

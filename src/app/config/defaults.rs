// SPDX-License-Identifier: MPL-2.0
//! Default values for configuration settings.
//!
//! # Categories
//!
//! - **Services**: collaborator endpoints and model
//! - **Volume**: playback volume bounds

// ==========================================================================
// Service Defaults
// ==========================================================================

/// Hosted animation backend.
pub const DEFAULT_VIDEO_BASE_URL: &str = "https://mathlens-beta-937226988264.us-central1.run.app";

/// Explanation proxy served next to the web front end in development.
pub const DEFAULT_PROXY_URL: &str = "http://localhost:3000/api/getExplanation";

/// OpenAI-compatible chat completion endpoint.
pub const DEFAULT_COMPLETION_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Model requested from the completion endpoint.
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-3.5-turbo";

// ==========================================================================
// Volume Defaults
// ==========================================================================

/// Default playback volume (0.0 to 1.0).
pub const DEFAULT_VOLUME: f32 = 1.0;

/// Minimum volume level.
pub const MIN_VOLUME: f32 = 0.0;

/// Maximum volume level.
pub const MAX_VOLUME: f32 = 1.0;

/// Volume slider step.
pub const VOLUME_STEP: f32 = 0.01;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_volume_is_within_bounds() {
        assert!((MIN_VOLUME..=MAX_VOLUME).contains(&DEFAULT_VOLUME));
    }

    #[test]
    fn default_urls_parse() {
        for url in [
            DEFAULT_VIDEO_BASE_URL,
            DEFAULT_PROXY_URL,
            DEFAULT_COMPLETION_URL,
        ] {
            assert!(reqwest::Url::parse(url).is_ok(), "{url}");
        }
    }
}

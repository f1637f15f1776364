// SPDX-License-Identifier: MPL-2.0
//! Video generation adapter.
//!
//! Posts the question and the rendered animation prompt to
//! `{base_url}/generate` as a multipart form. The backend answers with JSON
//! carrying either a `video_url` (absolute, or relative to the backend) or an
//! `error`.

use super::{error_message, is_success, send};
use crate::application::port::{ServiceError, VideoService};
use crate::domain::{GenerationPrompt, Query};
use futures_util::future::BoxFuture;
use reqwest::multipart::Form;
use serde::Deserialize;

const UNEXPECTED_FORMAT: &str = "Unexpected response format from API.";

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    video_url: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Client for the animation backend.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    client: reqwest::Client,
    base_url: String,
}

impl GenerationClient {
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/generate", self.base_url.trim_end_matches('/'))
    }
}

impl VideoService for GenerationClient {
    fn fetch_video(&self, query: &Query) -> BoxFuture<'static, Result<String, ServiceError>> {
        let form = Form::new()
            .text("question", query.as_str().to_string())
            .text("prompt", GenerationPrompt::render(query).into_inner());
        let endpoint = self.endpoint();
        tracing::debug!(url = %endpoint, "requesting video generation");

        let request = self.client.post(endpoint).multipart(form);
        let base_url = self.base_url.clone();

        Box::pin(async move {
            let (status, body) = send(request).await?;
            interpret_generation_response(status, &body, &base_url)
        })
    }
}

/// Maps a `/generate` response to an absolute video URL.
pub fn interpret_generation_response(
    status: u16,
    body: &str,
    base_url: &str,
) -> Result<String, ServiceError> {
    if !is_success(status) {
        return Err(ServiceError::Status {
            status,
            message: error_message(body),
        });
    }

    let Ok(parsed) = serde_json::from_str::<GenerateResponse>(body) else {
        tracing::warn!(body, "unexpected generation response");
        return Err(ServiceError::Protocol(UNEXPECTED_FORMAT.to_string()));
    };

    match (parsed.video_url, parsed.error) {
        (Some(url), _) if !url.trim().is_empty() => Ok(resolve_video_url(base_url, url.trim())),
        (_, Some(error)) => Err(ServiceError::Reported(error)),
        _ => Err(ServiceError::Protocol(UNEXPECTED_FORMAT.to_string())),
    }
}

/// Turns a backend-relative video path into an absolute URL.
///
/// `http://` and `https://` URLs are returned unchanged. Anything else is
/// joined to `base` with exactly one `/`.
#[must_use]
pub fn resolve_video_url(base: &str, url: &str) -> String {
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return url.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        url.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://backend.example";

    #[test]
    fn relative_path_is_joined_to_base() {
        assert_eq!(
            resolve_video_url(BASE, "/media/videos/abc.mp4"),
            "https://backend.example/media/videos/abc.mp4"
        );
        assert_eq!(
            resolve_video_url("https://backend.example/", "media/abc.mp4"),
            "https://backend.example/media/abc.mp4"
        );
        assert_eq!(
            resolve_video_url("https://backend.example//", "//media/abc.mp4"),
            "https://backend.example/media/abc.mp4"
        );
    }

    #[test]
    fn absolute_urls_pass_through() {
        for url in ["https://cdn.example/v.mp4", "http://cdn.example/v.mp4"] {
            assert_eq!(resolve_video_url(BASE, url), url);
        }
    }

    #[test]
    fn success_with_relative_url_is_resolved() {
        let body = r#"{"video_url":"/media/videos/q.mp4"}"#;
        assert_eq!(
            interpret_generation_response(200, body, BASE).as_deref(),
            Ok("https://backend.example/media/videos/q.mp4")
        );
    }

    #[test]
    fn video_url_wins_over_error_field() {
        let body = r#"{"video_url":"https://cdn/v.mp4","error":"ignored"}"#;
        assert_eq!(
            interpret_generation_response(200, body, BASE).as_deref(),
            Ok("https://cdn/v.mp4")
        );
    }

    #[test]
    fn reported_error_is_surfaced() {
        let body = r#"{"error":"Manim render failed"}"#;
        assert_eq!(
            interpret_generation_response(200, body, BASE),
            Err(ServiceError::Reported("Manim render failed".into()))
        );
    }

    #[test]
    fn unexpected_shapes_are_protocol_errors() {
        for body in [r#"{"status":"ok"}"#, r#"{"video_url":""}"#, "not json"] {
            assert_eq!(
                interpret_generation_response(200, body, BASE),
                Err(ServiceError::Protocol(UNEXPECTED_FORMAT.into())),
                "{body}"
            );
        }
    }

    #[test]
    fn error_status_with_json_error_field() {
        let body = r#"{"error":"Invalid prompt"}"#;
        assert_eq!(
            interpret_generation_response(500, body, BASE),
            Err(ServiceError::Status {
                status: 500,
                message: "Invalid prompt".into()
            })
        );
    }

    #[test]
    fn error_status_with_plain_text_body() {
        let err = interpret_generation_response(502, "Bad Gateway", BASE).unwrap_err();
        assert_eq!(
            err.to_string(),
            "HTTP error! Status: 502, Message: Bad Gateway"
        );
    }

    #[test]
    fn endpoint_has_single_slash() {
        let client = GenerationClient::new(reqwest::Client::new(), "http://host:8080/");
        assert_eq!(client.endpoint(), "http://host:8080/generate");
    }
}

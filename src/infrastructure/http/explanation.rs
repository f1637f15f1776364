// SPDX-License-Identifier: MPL-2.0
//! Explanation adapters.
//!
//! Two ways to obtain an explanation:
//!
//! - [`ProxyExplanationClient`] asks an endpoint that owns the model
//!   credential (`GET {url}?query=...`)
//! - [`CompletionExplanationClient`] talks to an OpenAI-compatible chat
//!   completion endpoint itself, with a credential taken from the
//!   environment

use super::{error_message, is_success, send};
use crate::application::port::{ExplanationService, ServiceError};
use crate::domain::Query;
use futures_util::future::{self, BoxFuture};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment variable holding the completion endpoint credential.
pub const API_KEY_ENV: &str = "MATHLENS_LLM_API_KEY";

/// Instruction sent ahead of every question.
pub const EXPLANATION_SYSTEM_PROMPT: &str = "You are a patient math tutor. \
Explain the student's math question concisely, in a few short paragraphs. \
Write inline math between single dollar signs, like $a^2 + b^2 = c^2$.";

const GENERIC_FAILURE: &str = "Failed to get explanation";

// =============================================================================
// Proxy
// =============================================================================

#[derive(Debug, Deserialize)]
struct ProxyResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Fetches explanations from a proxy endpoint.
#[derive(Debug, Clone)]
pub struct ProxyExplanationClient {
    client: reqwest::Client,
    url: String,
}

impl ProxyExplanationClient {
    #[must_use]
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ExplanationService for ProxyExplanationClient {
    fn fetch_explanation(&self, query: &Query) -> BoxFuture<'static, Result<String, ServiceError>> {
        tracing::debug!(url = %self.url, "requesting explanation from proxy");
        let request = self
            .client
            .get(&self.url)
            .query(&[("query", query.as_str())]);

        Box::pin(async move {
            let (status, body) = send(request).await?;
            interpret_proxy_response(status, &body)
        })
    }
}

/// Maps a proxy response to an explanation.
pub fn interpret_proxy_response(status: u16, body: &str) -> Result<String, ServiceError> {
    if !is_success(status) {
        return Err(ServiceError::Status {
            status,
            message: error_message(body),
        });
    }

    let parsed: ProxyResponse = serde_json::from_str(body)
        .map_err(|e| ServiceError::Protocol(format!("Invalid explanation response: {e}")))?;

    match parsed.explanation {
        Some(text) if parsed.success && !text.trim().is_empty() => Ok(text),
        _ => Err(ServiceError::Reported(
            parsed.error.unwrap_or_else(|| GENERIC_FAILURE.to_string()),
        )),
    }
}

// =============================================================================
// Chat completion
// =============================================================================

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Asks a chat completion endpoint directly.
#[derive(Clone)]
pub struct CompletionExplanationClient {
    client: reqwest::Client,
    url: String,
    model: String,
    api_key: Option<String>,
}

impl fmt::Debug for CompletionExplanationClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionExplanationClient")
            .field("url", &self.url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl CompletionExplanationClient {
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            model: model.into(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    /// Builds a client whose credential comes from [`API_KEY_ENV`].
    #[must_use]
    pub fn from_env(client: reqwest::Client, url: impl Into<String>, model: impl Into<String>) -> Self {
        Self::new(client, url, model, std::env::var(API_KEY_ENV).ok())
    }

    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

impl ExplanationService for CompletionExplanationClient {
    fn fetch_explanation(&self, query: &Query) -> BoxFuture<'static, Result<String, ServiceError>> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Box::pin(future::ready(Err(ServiceError::NotConfigured(format!(
                "{API_KEY_ENV} is not set"
            )))));
        };

        let body = CompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: EXPLANATION_SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: query.as_str(),
                },
            ],
        };
        tracing::debug!(url = %self.url, model = %self.model, "requesting chat completion");
        let request = self.client.post(&self.url).bearer_auth(api_key).json(&body);

        Box::pin(async move {
            let (status, body) = send(request).await?;
            interpret_completion_response(status, &body)
        })
    }
}

/// Maps a chat completion response to the first choice's text.
pub fn interpret_completion_response(status: u16, body: &str) -> Result<String, ServiceError> {
    if !is_success(status) {
        return Err(ServiceError::Status {
            status,
            message: error_message(body),
        });
    }

    let parsed: CompletionResponse = serde_json::from_str(body)
        .map_err(|e| ServiceError::Protocol(format!("Invalid completion response: {e}")))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| ServiceError::Protocol("Completion response contained no message".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_success_returns_explanation() {
        let body = r#"{"success":true,"explanation":"Rows times columns."}"#;
        assert_eq!(
            interpret_proxy_response(200, body).as_deref(),
            Ok("Rows times columns.")
        );
    }

    #[test]
    fn proxy_reported_failure_uses_error_field() {
        let body = r#"{"success":false,"error":"quota exceeded"}"#;
        assert_eq!(
            interpret_proxy_response(200, body),
            Err(ServiceError::Reported("quota exceeded".into()))
        );
    }

    #[test]
    fn proxy_success_without_explanation_is_generic_failure() {
        let body = r#"{"success":true}"#;
        assert_eq!(
            interpret_proxy_response(200, body),
            Err(ServiceError::Reported(GENERIC_FAILURE.into()))
        );
    }

    #[test]
    fn proxy_non_json_is_protocol_error() {
        assert!(matches!(
            interpret_proxy_response(200, "<html>"),
            Err(ServiceError::Protocol(_))
        ));
    }

    #[test]
    fn proxy_error_status_carries_body() {
        assert_eq!(
            interpret_proxy_response(503, "maintenance"),
            Err(ServiceError::Status {
                status: 503,
                message: "maintenance".into()
            })
        );
    }

    #[test]
    fn completion_returns_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  $x^2$ grows.  "}},{"message":{"content":"second"}}]}"#;
        assert_eq!(
            interpret_completion_response(200, body).as_deref(),
            Ok("$x^2$ grows.")
        );
    }

    #[test]
    fn completion_without_choices_is_protocol_error() {
        assert!(matches!(
            interpret_completion_response(200, r#"{"choices":[]}"#),
            Err(ServiceError::Protocol(_))
        ));
    }

    #[test]
    fn completion_error_object_message_is_extracted() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        assert_eq!(
            interpret_completion_response(401, body),
            Err(ServiceError::Status {
                status: 401,
                message: "Incorrect API key provided".into()
            })
        );
    }

    #[tokio::test]
    async fn completion_without_credential_is_not_configured() {
        let client = CompletionExplanationClient::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9/v1/chat/completions",
            "gpt-3.5-turbo",
            Some("   ".into()),
        );
        assert!(!client.has_credential());

        let query = Query::parse("limits").expect("valid");
        let result = client.fetch_explanation(&query).await;

        assert!(matches!(result, Err(ServiceError::NotConfigured(_))));
    }

    #[test]
    fn debug_output_redacts_credential() {
        let client = CompletionExplanationClient::new(
            reqwest::Client::new(),
            "http://localhost",
            "m",
            Some("sk-secret".into()),
        );
        let printed = format!("{client:?}");
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("<redacted>"));
    }
}

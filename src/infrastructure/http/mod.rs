// SPDX-License-Identifier: MPL-2.0
//! HTTP adapters for the remote collaborators.
//!
//! Each client splits into a thin async `send` part and a pure
//! `interpret_*` function that maps `(status, body)` to the port result, so
//! the response rules are testable without a network.

pub mod explanation;
pub mod generation;

pub use explanation::{CompletionExplanationClient, ProxyExplanationClient};
pub use generation::GenerationClient;

use crate::application::port::ServiceError;
use crate::error::Result;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("Mathlens/", env!("CARGO_PKG_VERSION"));

/// Builds the shared client: bounded redirects, crate user agent, default
/// timeouts.
pub fn build_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Sends `request` and returns the status code and body text.
///
/// Only transport problems fail here; status handling is left to the
/// interpreter.
async fn send(request: reqwest::RequestBuilder) -> std::result::Result<(u16, String), ServiceError> {
    let response = request.send().await.map_err(transport)?;
    let status = response.status().as_u16();
    let body = response.text().await.map_err(transport)?;
    tracing::debug!(status, bytes = body.len(), "response received");
    Ok((status, body))
}

fn transport(err: reqwest::Error) -> ServiceError {
    ServiceError::Transport(err.to_string())
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Diagnostic text for a failed response.
///
/// Prefers a JSON `error` field (a string, or an object with a `message`),
/// then the JSON document itself, then the raw body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => match value.get("error") {
            Some(serde_json::Value::String(message)) => message.clone(),
            Some(serde_json::Value::Object(object)) => object
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map_or_else(|| value.to_string(), str::to_string),
            _ => value.to_string(),
        },
        Err(_) => {
            let text = body.trim();
            if text.is_empty() {
                "Unknown error".to_string()
            } else {
                text.to_string()
            }
        }
    }
}

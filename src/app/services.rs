// SPDX-License-Identifier: MPL-2.0
//! Builds the remote collaborators from settings and environment.
//!
//! Endpoint overrides from the environment win over `settings.toml`, so a
//! deployment can point the same build at a local or hosted backend. The
//! language-model credential only ever comes from the environment.

use crate::app::config::{Config, ExplanationMode};
use crate::application::port::{ExplanationService, ServiceError, VideoService};
use crate::domain::Query;
use crate::error::Result;
use crate::infrastructure::http::{self, explanation::API_KEY_ENV};
use crate::infrastructure::{CompletionExplanationClient, GenerationClient, ProxyExplanationClient};
use futures_util::future::{self, BoxFuture};
use std::sync::Arc;

/// Overrides `[services] video_base_url`.
pub const ENV_VIDEO_BASE_URL: &str = "MATHLENS_VIDEO_BASE_URL";

/// Overrides the explanation endpoint of the active mode.
pub const ENV_EXPLANATION_URL: &str = "MATHLENS_EXPLANATION_URL";

/// The two collaborators a search talks to.
#[derive(Clone)]
pub struct Services {
    pub explanation: Arc<dyn ExplanationService>,
    pub video: Arc<dyn VideoService>,
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

impl Services {
    /// Stand-in used when the HTTP client cannot be built. Every fetch
    /// fails with [`ServiceError::NotConfigured`] carrying `reason`.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        let unavailable = Arc::new(Unavailable(reason.into()));
        Self {
            explanation: unavailable.clone(),
            video: unavailable,
        }
    }
}

struct Unavailable(String);

impl Unavailable {
    fn fail(&self) -> BoxFuture<'static, std::result::Result<String, ServiceError>> {
        Box::pin(future::ready(Err(ServiceError::NotConfigured(self.0.clone()))))
    }
}

impl ExplanationService for Unavailable {
    fn fetch_explanation(
        &self,
        _query: &Query,
    ) -> BoxFuture<'static, std::result::Result<String, ServiceError>> {
        self.fail()
    }
}

impl VideoService for Unavailable {
    fn fetch_video(&self, _query: &Query) -> BoxFuture<'static, std::result::Result<String, ServiceError>> {
        self.fail()
    }
}

/// Endpoints after environment overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub video_base_url: String,
    pub explanation_url: String,
}

/// Applies environment overrides on top of `config`.
///
/// `lookup` stands in for `std::env::var` so the precedence can be tested
/// without touching the process environment. Values that are empty or do
/// not parse as URLs are ignored.
pub fn resolve_endpoints(config: &Config, lookup: impl Fn(&str) -> Option<String>) -> Endpoints {
    let services = &config.services;
    let configured_explanation = match services.explanation_mode {
        ExplanationMode::Proxy => &services.proxy_url,
        ExplanationMode::Completion => &services.completion_url,
    };

    Endpoints {
        video_base_url: env_url(&lookup, ENV_VIDEO_BASE_URL)
            .unwrap_or_else(|| services.video_base_url.clone()),
        explanation_url: env_url(&lookup, ENV_EXPLANATION_URL)
            .unwrap_or_else(|| configured_explanation.clone()),
    }
}

fn env_url(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    let value = lookup(name)?;
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match reqwest::Url::parse(value) {
        Ok(_) => Some(value.to_string()),
        Err(err) => {
            tracing::warn!(variable = name, error = %err, "ignoring invalid URL from environment");
            None
        }
    }
}

/// Builds both clients around one shared HTTP client.
pub fn build(config: &Config) -> Result<Services> {
    build_with(config, |name| std::env::var(name).ok())
}

/// Same as [`build`] with an explicit environment lookup.
pub fn build_with(config: &Config, lookup: impl Fn(&str) -> Option<String>) -> Result<Services> {
    let client = http::build_client()?;
    let endpoints = resolve_endpoints(config, &lookup);

    let explanation: Arc<dyn ExplanationService> = match config.services.explanation_mode {
        ExplanationMode::Proxy => Arc::new(ProxyExplanationClient::new(
            client.clone(),
            endpoints.explanation_url.clone(),
        )),
        ExplanationMode::Completion => {
            let completion = CompletionExplanationClient::new(
                client.clone(),
                endpoints.explanation_url.clone(),
                config.services.completion_model.clone(),
                lookup(API_KEY_ENV),
            );
            if !completion.has_credential() {
                tracing::warn!(variable = API_KEY_ENV, "completion mode without a credential");
            }
            Arc::new(completion)
        }
    };

    tracing::info!(
        video = %endpoints.video_base_url,
        explanation = %endpoints.explanation_url,
        mode = ?config.services.explanation_mode,
        "services configured"
    );

    Ok(Services {
        explanation,
        video: Arc::new(GenerationClient::new(client, endpoints.video_base_url)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn settings_are_used_without_overrides() {
        let config = Config::default();
        let endpoints = resolve_endpoints(&config, env(&[]));
        assert_eq!(endpoints.video_base_url, config.services.video_base_url);
        assert_eq!(endpoints.explanation_url, config.services.proxy_url);
    }

    #[test]
    fn completion_mode_uses_completion_url() {
        let mut config = Config::default();
        config.services.explanation_mode = ExplanationMode::Completion;
        let endpoints = resolve_endpoints(&config, env(&[]));
        assert_eq!(endpoints.explanation_url, config.services.completion_url);
    }

    #[test]
    fn environment_overrides_settings() {
        let endpoints = resolve_endpoints(
            &Config::default(),
            env(&[
                (ENV_VIDEO_BASE_URL, "http://127.0.0.1:8000"),
                (ENV_EXPLANATION_URL, "http://127.0.0.1:3000/api/getExplanation"),
            ]),
        );
        assert_eq!(endpoints.video_base_url, "http://127.0.0.1:8000");
        assert_eq!(
            endpoints.explanation_url,
            "http://127.0.0.1:3000/api/getExplanation"
        );
    }

    #[test]
    fn blank_or_invalid_overrides_are_ignored() {
        let config = Config::default();
        let endpoints = resolve_endpoints(
            &config,
            env(&[(ENV_VIDEO_BASE_URL, "  "), (ENV_EXPLANATION_URL, "not a url")]),
        );
        assert_eq!(endpoints.video_base_url, config.services.video_base_url);
        assert_eq!(endpoints.explanation_url, config.services.proxy_url);
    }

    #[tokio::test]
    async fn unavailable_services_fail_every_fetch() {
        let services = Services::unavailable("TLS backend missing");
        let query = Query::parse("limits").expect("query");

        let explanation = services.explanation.fetch_explanation(&query).await;
        let video = services.video.fetch_video(&query).await;

        assert_eq!(
            explanation,
            Err(ServiceError::NotConfigured("TLS backend missing".into()))
        );
        assert!(video.is_err());
    }

    #[test]
    fn build_never_prints_the_credential() {
        let mut config = Config::default();
        config.services.explanation_mode = ExplanationMode::Completion;
        let services =
            build_with(&config, env(&[(API_KEY_ENV, "sk-secret")])).expect("services");
        assert!(!format!("{services:?}").contains("sk-secret"));
    }
}

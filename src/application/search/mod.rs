// SPDX-License-Identifier: MPL-2.0
//! Query orchestration.
//!
//! A submission launches two independent fetches: the explanation and the
//! video. [`SearchState`] tracks them as a small state machine:
//!
//! - [`SearchState::submit`] validates the input, refuses while a submission
//!   is in flight, resets the previous result and records the query in the
//!   history store
//! - the caller runs both fetches however it likes (two `iced::Task`s, or
//!   [`run_search`] headlessly) and reports each outcome through
//!   [`SearchState::explanation_settled`] / [`SearchState::video_settled`]
//! - each failure appends to an error list, so both failures stay visible
//! - outcomes tagged with an older generation are ignored
//!
//! When the loading flag clears is governed by [`LoadingPolicy`].

use super::history::HistoryStore;
use super::port::{ExplanationService, ServiceError, VideoService};
use crate::domain::Query;
use serde::{Deserialize, Serialize};
use std::fmt;

/// When a submission stops counting as in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadingPolicy {
    /// Loading clears once both fetches have settled.
    #[default]
    AllSettled,

    /// Loading clears as soon as the video fetch settles, even if the
    /// explanation is still outstanding.
    VideoSettled,
}

/// Progress of one of the two fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStatus {
    #[default]
    Idle,
    Pending,
    Settled,
}

/// Which fetch an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSource {
    Explanation,
    Video,
}

/// One accumulated failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchError {
    pub source: ErrorSource,
    pub error: ServiceError,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            ErrorSource::Explanation => write!(f, "Explanation error: {}", self.error),
            ErrorSource::Video => write!(f, "Video error: {}", self.error),
        }
    }
}

/// Transient result of the latest submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub explanation: Option<String>,
    pub video_url: Option<String>,
}

/// Returned by an accepted submission; the caller launches both fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub generation: u64,
    pub query: Query,
}

/// Combined state of the two fetches for the current submission.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    policy: LoadingPolicy,
    generation: u64,
    in_flight: bool,
    explanation: TaskStatus,
    video: TaskStatus,
    query: Option<Query>,
    result: SearchResult,
    errors: Vec<SearchError>,
}

impl SearchState {
    #[must_use]
    pub fn new(policy: LoadingPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Accepts `raw` as a new submission.
    ///
    /// Returns `None`, touching nothing, when the trimmed input is empty or
    /// a submission is already in flight. History warnings are logged by the
    /// store and returned alongside the submission.
    pub fn submit(
        &mut self,
        raw: &str,
        history: &mut HistoryStore,
    ) -> Option<(Submission, Option<String>)> {
        if self.in_flight {
            tracing::debug!("submission ignored: previous one still in flight");
            return None;
        }
        let query = Query::parse(raw)?;

        let history_warning = history.append(query.as_str());
        Some((self.begin(query), history_warning))
    }

    /// Starts a submission without touching history.
    ///
    /// Callers must check [`Self::is_in_flight`] first; `submit` does.
    pub fn begin(&mut self, query: Query) -> Submission {
        self.generation += 1;
        self.in_flight = true;
        self.explanation = TaskStatus::Pending;
        self.video = TaskStatus::Pending;
        self.result = SearchResult::default();
        self.errors.clear();
        self.query = Some(query.clone());

        tracing::info!(generation = self.generation, query = %query, "search submitted");

        Submission {
            generation: self.generation,
            query,
        }
    }

    /// Records the explanation outcome. Returns `false` for stale outcomes.
    pub fn explanation_settled(
        &mut self,
        generation: u64,
        outcome: Result<String, ServiceError>,
    ) -> bool {
        if !self.accepts(generation, self.explanation) {
            tracing::debug!(generation, "stale explanation outcome ignored");
            return false;
        }

        match outcome {
            Ok(text) => {
                tracing::info!(generation, chars = text.len(), "explanation received");
                self.result.explanation = Some(text);
            }
            Err(error) => {
                tracing::warn!(generation, %error, "explanation failed");
                self.errors.push(SearchError {
                    source: ErrorSource::Explanation,
                    error,
                });
            }
        }
        self.explanation = TaskStatus::Settled;
        self.update_in_flight();
        true
    }

    /// Records the video outcome. Returns `false` for stale outcomes.
    pub fn video_settled(&mut self, generation: u64, outcome: Result<String, ServiceError>) -> bool {
        if !self.accepts(generation, self.video) {
            tracing::debug!(generation, "stale video outcome ignored");
            return false;
        }

        match outcome {
            Ok(url) => {
                tracing::info!(generation, %url, "video ready");
                self.result.video_url = Some(url);
            }
            Err(error) => {
                tracing::warn!(generation, %error, "video generation failed");
                self.errors.push(SearchError {
                    source: ErrorSource::Video,
                    error,
                });
            }
        }
        self.video = TaskStatus::Settled;
        self.update_in_flight();
        true
    }

    fn accepts(&self, generation: u64, status: TaskStatus) -> bool {
        generation == self.generation && status == TaskStatus::Pending
    }

    fn update_in_flight(&mut self) {
        let done = match self.policy {
            LoadingPolicy::AllSettled => {
                self.explanation == TaskStatus::Settled && self.video == TaskStatus::Settled
            }
            LoadingPolicy::VideoSettled => self.video == TaskStatus::Settled,
        };
        if done {
            self.in_flight = false;
        }
    }

    /// Whether a new submission would be refused.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// The combined loading flag shown by the view.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    #[must_use]
    pub fn explanation_pending(&self) -> bool {
        self.explanation == TaskStatus::Pending
    }

    #[must_use]
    pub fn video_pending(&self) -> bool {
        self.video == TaskStatus::Pending
    }

    /// True once a submission has happened and nothing is outstanding.
    #[must_use]
    pub fn has_settled(&self) -> bool {
        self.explanation == TaskStatus::Settled && self.video == TaskStatus::Settled
    }

    #[must_use]
    pub fn policy(&self) -> LoadingPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: LoadingPolicy) {
        self.policy = policy;
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    #[must_use]
    pub fn result(&self) -> &SearchResult {
        &self.result
    }

    #[must_use]
    pub fn errors(&self) -> &[SearchError] {
        &self.errors
    }

    /// All errors, one per line; `None` when there are none.
    #[must_use]
    pub fn error_text(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        Some(
            self.errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}

/// Result of a headless search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub query: Query,
    pub result: SearchResult,
    pub errors: Vec<SearchError>,
}

impl SearchOutcome {
    /// True when neither fetch produced anything.
    #[must_use]
    pub fn is_total_failure(&self) -> bool {
        self.result.explanation.is_none() && self.result.video_url.is_none()
    }
}

/// Runs both fetches concurrently and waits for both, whatever they return.
///
/// Neither failure cancels the other fetch. The settlement rules are the
/// same as in the interactive flow.
pub async fn run_search(
    explainer: &dyn ExplanationService,
    video: &dyn VideoService,
    query: Query,
) -> SearchOutcome {
    let mut state = SearchState::new(LoadingPolicy::AllSettled);
    let submission = state.begin(query);

    let (explanation, video_url) = futures_util::future::join(
        explainer.fetch_explanation(&submission.query),
        video.fetch_video(&submission.query),
    )
    .await;

    state.explanation_settled(submission.generation, explanation);
    state.video_settled(submission.generation, video_url);

    SearchOutcome {
        query: submission.query,
        result: state.result,
        errors: state.errors,
    }
}

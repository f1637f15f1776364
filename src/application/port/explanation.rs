// SPDX-License-Identifier: MPL-2.0
//! Explanation port.

use super::ServiceError;
use crate::domain::Query;
use futures_util::future::BoxFuture;

/// Produces a short natural-language explanation for a query.
///
/// One request per call; implementations never retry.
pub trait ExplanationService: Send + Sync {
    fn fetch_explanation(&self, query: &Query) -> BoxFuture<'static, Result<String, ServiceError>>;
}

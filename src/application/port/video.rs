// SPDX-License-Identifier: MPL-2.0
//! Video generation port.

use super::ServiceError;
use crate::domain::Query;
use futures_util::future::BoxFuture;

/// Requests an animated explanation video for a query.
pub trait VideoService: Send + Sync {
    /// Resolves to an absolute URL the player can open.
    ///
    /// Relative paths returned by the backend are already resolved against
    /// the service base URL.
    fn fetch_video(&self, query: &Query) -> BoxFuture<'static, Result<String, ServiceError>>;
}

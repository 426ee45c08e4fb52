//! Retry decorator for page fetchers
//!
//! Wraps any `PageFetcher` so each page request runs under a
//! `RetryPolicy`. The traverser itself never retries.

use super::types::{Page, PageFetcher, PageQuery};
use crate::error::Result;
use crate::http::RetryPolicy;
use async_trait::async_trait;

/// A `PageFetcher` that retries the wrapped fetcher on retryable errors
#[derive(Debug, Clone)]
pub struct Retrying<F> {
    inner: F,
    policy: RetryPolicy,
}

impl<F> Retrying<F> {
    /// Wrap `inner` with `policy`
    pub fn new(inner: F, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    #[cfg(test)]
    pub(crate) fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

/// Wrap a fetcher with a retry policy
pub fn retrying<F>(inner: F, policy: RetryPolicy) -> Retrying<F> {
    Retrying::new(inner, policy)
}

#[async_trait]
impl<T, Q, F> PageFetcher<T, Q> for Retrying<F>
where
    T: Send + 'static,
    Q: PageQuery,
    F: PageFetcher<T, Q>,
{
    async fn fetch(&self, query: Q) -> Result<Page<T>> {
        let inner = &self.inner;
        self.policy
            .run(move || inner.fetch(query.clone()))
            .await
    }
}

//! Pagination types and traits
//!
//! Defines the page model and the two collaborator contracts the traverser
//! consumes: a query that carries a cursor, and a capability that fetches
//! one page for a query.

use crate::error::Result;
use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Pagination metadata returned with every page of a listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// URL that re-fetches the current page
    pub refresh_url: String,
    /// URL of the next page, present only if further pages exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_url: Option<String>,
    /// Total number of objects in the current page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    /// Total number of objects matching the request (with `include_count`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched: Option<i64>,
    /// Cursor that re-fetches the current page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_cursor: Option<String>,
    /// Opaque cursor for the next page; absent on the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

impl Pagination {
    /// Metadata for a terminal page
    pub fn last(refresh_url: impl Into<String>) -> Self {
        Self {
            refresh_url: refresh_url.into(),
            ..Default::default()
        }
    }

    /// Metadata for a page followed by another page
    pub fn with_next(refresh_url: impl Into<String>, next_cursor: impl Into<String>) -> Self {
        Self {
            refresh_url: refresh_url.into(),
            next_cursor: Some(next_cursor.into()),
            ..Default::default()
        }
    }

    /// Whether the server signalled further pages
    pub fn has_next(&self) -> bool {
        self.next_cursor.is_some()
    }
}

/// One page of a listing: items in server order plus pagination metadata
///
/// Pages are immutable once built; a fresh request yields a fresh page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    items: Vec<T>,
    pagination: Pagination,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self { items, pagination }
    }

    /// Items on this page
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page, returning its items
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Pagination metadata
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Cursor for the next page, `None` on the last page
    pub fn next_cursor(&self) -> Option<&str> {
        self.pagination.next_cursor.as_deref()
    }

    /// Whether this is the terminal page
    pub fn is_last(&self) -> bool {
        !self.pagination.has_next()
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A listing query whose only field the traverser touches is the cursor
///
/// Filter and sort fields are opaque. `page_limit` is read for the page
/// size check and nothing else.
pub trait PageQuery: Clone + Send + Sync + 'static {
    /// Cursor currently set on the query
    fn cursor(&self) -> Option<&str>;

    /// Copy of this query with the cursor replaced
    #[must_use]
    fn with_cursor(&self, cursor: Option<String>) -> Self;

    /// Requested page size, if the caller set one
    fn page_limit(&self) -> Option<u64> {
        None
    }
}

/// Capability that fetches one page for a query
///
/// Authentication, headers, retries and JSON decoding all live behind this
/// trait.
#[async_trait]
pub trait PageFetcher<T, Q>: Send + Sync
where
    T: Send + 'static,
    Q: PageQuery,
{
    /// Fetch the page selected by `query`
    async fn fetch(&self, query: Q) -> Result<Page<T>>;
}

#[async_trait]
impl<T, Q, F> PageFetcher<T, Q> for &F
where
    T: Send + 'static,
    Q: PageQuery,
    F: PageFetcher<T, Q> + ?Sized,
{
    async fn fetch(&self, query: Q) -> Result<Page<T>> {
        (**self).fetch(query).await
    }
}

#[async_trait]
impl<T, Q, F> PageFetcher<T, Q> for Arc<F>
where
    T: Send + 'static,
    Q: PageQuery,
    F: PageFetcher<T, Q> + ?Sized,
{
    async fn fetch(&self, query: Q) -> Result<Page<T>> {
        (**self).fetch(query).await
    }
}

/// Adapts an async closure into a `PageFetcher`
pub struct FnFetcher<F> {
    f: F,
}

impl<F> FnFetcher<F> {
    /// Wrap a closure `Fn(Q) -> impl Future<Output = Result<Page<T>>>`
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<T, Q, F, Fut> PageFetcher<T, Q> for FnFetcher<F>
where
    T: Send + 'static,
    Q: PageQuery,
    F: Fn(Q) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Page<T>>> + Send + 'static,
{
    async fn fetch(&self, query: Q) -> Result<Page<T>> {
        (self.f)(query).await
    }
}

impl<F> std::fmt::Debug for FnFetcher<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnFetcher").finish_non_exhaustive()
    }
}

/// Boxed stream of items produced by a traversal
pub type ItemStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;

/// Boxed stream of pages produced by a traversal
pub type PageStream<'a, T> = ItemStream<'a, Page<T>>;

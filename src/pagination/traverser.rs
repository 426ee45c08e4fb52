//! Cursor-driven traversal of a paged listing
//!
//! `PagedListTraverser` walks the cursor chain of a listing one page at a
//! time. Nothing is prefetched: the next page is requested only once the
//! consumer has drained the current one, and dropping the stream stops
//! the traversal.

use super::types::{ItemStream, Page, PageFetcher, PageQuery, PageStream};
use crate::error::{Error, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::marker::PhantomData;
use tracing::debug;

/// Where the traversal goes next
enum Step {
    First,
    After(String),
    Done,
}

/// Walks every page of a listing for a fixed base query
pub struct PagedListTraverser<T, Q, F> {
    fetcher: F,
    base_query: Q,
    _item: PhantomData<fn() -> T>,
}

impl<T, Q, F> PagedListTraverser<T, Q, F>
where
    T: Send + 'static,
    Q: PageQuery,
    F: PageFetcher<T, Q>,
{
    /// Create a traverser over `fetcher` for `base_query`
    pub fn new(fetcher: F, base_query: Q) -> Self {
        Self {
            fetcher,
            base_query,
            _item: PhantomData,
        }
    }

    /// Fetch the first page
    ///
    /// Any cursor present on the base query is cleared.
    pub async fn first(&self) -> Result<Page<T>> {
        self.fetch_page(None).await
    }

    /// Fetch the page after `current`
    ///
    /// Fails with `Error::Exhausted` without fetching when `current` is the
    /// last page.
    pub async fn next(&self, current: &Page<T>) -> Result<Page<T>> {
        let cursor = current.next_cursor().ok_or(Error::Exhausted)?;
        self.fetch_page(Some(cursor.to_string())).await
    }

    /// Lazily stream every page, starting from a fresh first page
    ///
    /// The stream ends after the page without a cursor, or right after the
    /// first error.
    pub fn pages(&self) -> PageStream<'_, T> {
        Box::pin(stream::try_unfold(Step::First, move |step| async move {
            let page = match step {
                Step::First => self.first().await?,
                Step::After(cursor) => self.fetch_page(Some(cursor)).await?,
                Step::Done => return Ok(None),
            };
            let next = match page.next_cursor() {
                Some(cursor) => Step::After(cursor.to_string()),
                None => Step::Done,
            };
            Ok::<_, Error>(Some((page, next)))
        }))
    }

    /// Lazily stream every item of every page, in server order
    ///
    /// Each call starts a new traversal against the live collection.
    pub fn all(&self) -> ItemStream<'_, T> {
        self.pages()
            .map_ok(|page| stream::iter(page.into_items()).map(Ok::<T, Error>))
            .try_flatten()
            .boxed()
    }

    async fn fetch_page(&self, cursor: Option<String>) -> Result<Page<T>> {
        let query = self.base_query.with_cursor(cursor.clone());
        debug!(
            "Fetching page (cursor: {})",
            cursor.as_deref().unwrap_or("<none>")
        );

        let page = self.fetcher.fetch(query).await?;
        check_page(&page, self.base_query.page_limit(), cursor.as_deref())?;

        debug!("Fetched page with {} items (last: {})", page.len(), page.is_last());
        Ok(page)
    }
}

impl<T, Q: std::fmt::Debug, F> std::fmt::Debug for PagedListTraverser<T, Q, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedListTraverser")
            .field("base_query", &self.base_query)
            .finish_non_exhaustive()
    }
}

/// Reject pages whose contents contradict their own pagination metadata
///
/// A page that announces a next cursor must be full unless it is empty, and
/// must not hand back the cursor it was requested with.
fn check_page<T>(page: &Page<T>, page_limit: Option<u64>, sent_cursor: Option<&str>) -> Result<()> {
    let Some(next_cursor) = page.next_cursor() else {
        return Ok(());
    };

    if sent_cursor == Some(next_cursor) {
        return Err(Error::protocol(format!(
            "next cursor '{next_cursor}' is the cursor that was just requested"
        )));
    }

    if let Some(limit) = page_limit {
        let count = page.len() as u64;
        if count != 0 && count != limit {
            return Err(Error::protocol(format!(
                "page holds {count} items but announces a next page with page_limit {limit}"
            )));
        }
    }

    Ok(())
}

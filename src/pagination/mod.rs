//! Pagination module
//!
//! Cursor-based traversal of paged listings.
//!
//! # Overview
//!
//! A listing endpoint returns one `Page<T>` per request. The page carries a
//! `Pagination` block whose `next_cursor` is present only when another page
//! exists. `PagedListTraverser` turns a base query plus a `PageFetcher` into
//! a lazy stream of items by following that cursor chain:
//!
//! ```text
//! first():  fetch(query, cursor = None)        -> page 1 (next_cursor = "c1")
//! next(1):  fetch(query, cursor = Some("c1"))  -> page 2 (next_cursor = None)
//! next(2):  Err(Exhausted), no request made
//! ```
//!
//! Retrying is a decorator (`Retrying`) around the fetcher, so the traversal
//! core stays free of timing and backoff concerns.

mod retrying;
mod traverser;
mod types;

pub use retrying::{retrying, Retrying};
pub use traverser::PagedListTraverser;
pub use types::{
    FnFetcher, ItemStream, Page, PageFetcher, PageQuery, PageStream, Pagination,
};

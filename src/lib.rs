// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Watson SDK
//!
//! An async Rust client for IBM Watson Assistant v1 entities, built around
//! a lazy cursor traversal of paged listings.
//!
//! ## Features
//!
//! - **Cursor Pagination**: `PagedListTraverser` walks any paged listing
//!   through a `PageFetcher`, one page at a time, with no prefetching
//! - **Entity Operations**: create, get, update, delete and list entities
//! - **Authentication**: IAM API key (with token caching), Basic, Bearer
//! - **Resilience**: retry decorator with backoff, client-side rate limiting
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use watson_sdk::assistant::{Assistant, ListEntitiesOptions};
//! use watson_sdk::config::ServiceConfig;
//!
//! #[tokio::main]
//! async fn main() -> watson_sdk::Result<()> {
//!     let config = ServiceConfig::from_env("ASSISTANT")?;
//!     let assistant = Assistant::from_config(&config)?;
//!
//!     let traverser = assistant.entities_with_retry(
//!         ListEntitiesOptions::new("my-workspace"),
//!         config.retry_policy(),
//!     );
//!     let entities: Vec<_> = traverser.all().try_collect().await?;
//!     println!("{} entities", entities.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Assistant service                         │
//! │  create / get / update / delete_entity     list_entities → page │
//! │  entities(options) → PagedListTraverser<Entity, ...>            │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌───────────────┬──────────────┴────────────┬─────────────────────┐
//! │  Pagination   │           HTTP            │        Auth         │
//! ├───────────────┼───────────────────────────┼─────────────────────┤
//! │ first / next  │ one attempt per request   │ IAM API key         │
//! │ all → Stream  │ status classification     │ Basic               │
//! │ Retrying<F>   │ rate limit, RetryPolicy   │ Bearer              │
//! └───────────────┴───────────────────────────┴─────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the SDK
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication implementations
pub mod auth;

/// HTTP client, retry policy and rate limiting
pub mod http;

/// Cursor pagination
pub mod pagination;

/// Watson Assistant v1
pub mod assistant;

/// Service configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use assistant::Assistant;
pub use config::ServiceConfig;
pub use pagination::{Page, PageFetcher, PageQuery, PagedListTraverser};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

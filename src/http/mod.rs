//! HTTP client module
//!
//! Provides the HTTP client, rate limiting, and the retry policy.
//!
//! # Features
//!
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Error Classification**: 429, 4xx/5xx and timeouts map to distinct errors
//! - **Retry Policy**: Constant, linear, and exponential backoff, applied
//!   around calls rather than inside the client
//! - **Authentication**: Integration with auth module

mod client;
mod rate_limit;
mod retry;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use retry::RetryPolicy;

#[cfg(test)]
mod tests;

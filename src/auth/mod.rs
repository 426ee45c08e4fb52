//! Authentication module
//!
//! Supports: Basic, Bearer, IBM Cloud IAM (API key)
//!
//! The `Authenticator` handles all auth types and caches IAM access tokens
//! until shortly before they expire.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, CachedToken, APIKEY_USERNAME, DEFAULT_IAM_URL};

//! Auth configuration types
//!
//! These types represent the runtime auth configuration resolved from a
//! config file or the environment.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};

/// Default IBM Cloud IAM token endpoint
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com/identity/token";

/// Username that marks basic credentials as an IAM API key
pub const APIKEY_USERNAME: &str = "apikey";

/// Authentication configuration
#[derive(Debug, Clone, Default)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// Bearer token authentication (caller-managed token)
    Bearer {
        /// The bearer token
        token: String,
    },

    /// IBM Cloud IAM API key exchanged for short-lived access tokens
    Iam {
        /// The IAM API key
        apikey: String,
        /// Token endpoint URL
        url: String,
        /// Optional client ID sent as basic auth on the token request
        client_id: Option<String>,
        /// Optional client secret sent as basic auth on the token request
        client_secret: Option<String>,
    },
}

impl AuthConfig {
    /// Create an IAM config against the default token endpoint
    pub fn iam(apikey: impl Into<String>) -> Self {
        Self::Iam {
            apikey: apikey.into(),
            url: DEFAULT_IAM_URL.to_string(),
            client_id: None,
            client_secret: None,
        }
    }

    /// Create a basic auth config
    ///
    /// A username of `apikey` means the password is an IAM API key, so the
    /// config is promoted to IAM.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        let username = username.into();
        let password = password.into();
        if username == APIKEY_USERNAME {
            Self::iam(password)
        } else {
            Self::Basic { username, password }
        }
    }

    /// Create a bearer token config
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Check that the credentials are usable
    ///
    /// IAM client credentials are only sent as a pair, so setting just one
    /// of `client_id`/`client_secret` is rejected.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Iam { apikey, .. } if apikey.trim().is_empty() => {
                Err(Error::missing_field("auth.apikey"))
            }
            Self::Iam {
                client_id: Some(_),
                client_secret: None,
                ..
            } => Err(Error::missing_field("auth.client_secret")),
            Self::Iam {
                client_id: None,
                client_secret: Some(_),
                ..
            } => Err(Error::missing_field("auth.client_id")),
            _ => Ok(()),
        }
    }

    /// Short name of the auth type, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Basic { .. } => "basic",
            Self::Bearer { .. } => "bearer",
            Self::Iam { .. } => "iam",
        }
    }
}

/// Cached token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = Utc::now() + chrono::Duration::seconds(seconds);
        Self {
            token,
            expires_at: Some(expires_at),
        }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false, // No expiration = never expires
        }
    }
}

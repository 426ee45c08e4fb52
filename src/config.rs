//! Service configuration
//!
//! Settings can come from a YAML file:
//!
//! ```yaml
//! service_url: "https://api.us-south.assistant.watson.cloud.ibm.com/instances/abc"
//! version: "2019-02-28"
//! auth:
//!   type: iam
//!   apikey: "my-apikey"
//! http:
//!   timeout_seconds: 30
//!   max_retries: 3
//!   retry_backoff:
//!     type: exponential
//!     initial_ms: 100
//!     max_ms: 60000
//!   rate_limit:
//!     requests_per_second: 10
//! ```
//!
//! or from `<PREFIX>_*` environment variables (see `ServiceConfig::from_env`).

use crate::assistant::DEFAULT_VERSION;
use crate::auth::{AuthConfig, DEFAULT_IAM_URL};
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClient, HttpClientConfig, RateLimiterConfig, RetryPolicy};
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-Level Service Config
// ============================================================================

/// Complete configuration for one Watson service instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the service instance
    pub service_url: String,

    /// API version date
    #[serde(default = "default_version")]
    pub version: String,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfigDef,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

impl ServiceConfig {
    /// Minimal config for `service_url` with defaults everywhere else
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into(),
            version: default_version(),
            auth: AuthConfigDef::default(),
            http: HttpConfig::default(),
        }
    }

    /// Load a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&contents)
    }

    /// Parse a config from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Build a config from `<PREFIX>_*` environment variables
    ///
    /// Reads `_URL`, `_VERSION`, `_AUTH_TYPE`, `_APIKEY`, `_AUTH_URL`,
    /// `_USERNAME`, `_PASSWORD` and `_BEARER_TOKEN`.
    pub fn from_env(prefix: &str) -> Result<Self> {
        Self::from_vars(prefix, |key| std::env::var(key).ok())
    }

    /// Build a config from a variable lookup, with the same keys as `from_env`
    pub fn from_vars<F>(prefix: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |suffix: &str| {
            lookup(&format!("{prefix}_{suffix}")).filter(|value| !value.trim().is_empty())
        };

        let service_url = var("URL").ok_or_else(|| Error::missing_field(format!("{prefix}_URL")))?;
        let mut config = Self::new(service_url);

        if let Some(version) = var("VERSION") {
            config.version = version;
        }

        config.auth = match var("AUTH_TYPE").map(|t| t.to_ascii_lowercase()).as_deref() {
            Some("iam") => AuthConfigDef::Iam {
                apikey: var("APIKEY").ok_or_else(|| Error::missing_field(format!("{prefix}_APIKEY")))?,
                url: var("AUTH_URL"),
            },
            Some("basic") => AuthConfigDef::Basic {
                username: var("USERNAME")
                    .ok_or_else(|| Error::missing_field(format!("{prefix}_USERNAME")))?,
                password: var("PASSWORD")
                    .ok_or_else(|| Error::missing_field(format!("{prefix}_PASSWORD")))?,
            },
            Some("bearertoken") | Some("bearer") => AuthConfigDef::Bearer {
                token: var("BEARER_TOKEN")
                    .ok_or_else(|| Error::missing_field(format!("{prefix}_BEARER_TOKEN")))?,
            },
            Some("noauth") | Some("none") => AuthConfigDef::None,
            Some(other) => {
                return Err(Error::invalid_value(
                    format!("{prefix}_AUTH_TYPE"),
                    format!("unknown auth type '{other}'"),
                ));
            }
            None => {
                if let Some(apikey) = var("APIKEY") {
                    AuthConfigDef::Iam {
                        apikey,
                        url: var("AUTH_URL"),
                    }
                } else if let (Some(username), Some(password)) = (var("USERNAME"), var("PASSWORD")) {
                    AuthConfigDef::Basic { username, password }
                } else if let Some(token) = var("BEARER_TOKEN") {
                    AuthConfigDef::Bearer { token }
                } else {
                    AuthConfigDef::None
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot check
    pub fn validate(&self) -> Result<()> {
        if self.service_url.trim().is_empty() {
            return Err(Error::missing_field("service_url"));
        }
        url::Url::parse(&self.service_url)
            .map_err(|e| Error::invalid_value("service_url", e.to_string()))?;
        if self.version.trim().is_empty() {
            return Err(Error::missing_field("version"));
        }
        if self.http.timeout_seconds == 0 {
            return Err(Error::invalid_value("http.timeout_seconds", "must be at least 1"));
        }
        self.auth_config().validate()
    }

    /// Runtime auth configuration
    pub fn auth_config(&self) -> AuthConfig {
        self.auth.to_auth_config()
    }

    /// HTTP client settings
    pub fn http_client_config(&self) -> HttpClientConfig {
        let builder = HttpClientConfig::builder().timeout(Duration::from_secs(self.http.timeout_seconds));
        match self.http.rate_limit.to_limiter_config() {
            Some(limit) => builder.rate_limit(limit).build(),
            None => builder.no_rate_limit().build(),
        }
    }

    /// Retry policy used by the retry decorator
    pub fn retry_policy(&self) -> RetryPolicy {
        let backoff = &self.http.retry_backoff;
        RetryPolicy::new(self.http.max_retries).with_backoff(
            backoff.backoff_type,
            Duration::from_millis(backoff.initial_ms),
            Duration::from_millis(backoff.max_ms),
        )
    }

    /// Build an authenticated HTTP client
    pub fn build_client(&self) -> Result<HttpClient> {
        HttpClient::with_auth(self.http_client_config(), self.auth_config())
    }
}

// ============================================================================
// Auth Config Definition (in YAML)
// ============================================================================

/// Authentication configuration from YAML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfigDef {
    /// No authentication
    #[default]
    None,

    /// HTTP Basic authentication
    Basic { username: String, password: String },

    /// Caller-managed bearer token
    Bearer { token: String },

    /// IBM Cloud IAM API key
    Iam {
        apikey: String,
        /// Token endpoint, defaults to the public IAM endpoint
        #[serde(default)]
        url: Option<String>,
    },
}

impl AuthConfigDef {
    /// Resolve into the runtime auth configuration
    pub fn to_auth_config(&self) -> AuthConfig {
        match self {
            Self::None => AuthConfig::None,
            Self::Basic { username, password } => AuthConfig::basic(username, password),
            Self::Bearer { token } => AuthConfig::bearer(token),
            Self::Iam { apikey, url } => AuthConfig::Iam {
                apikey: apikey.clone(),
                url: url.clone().unwrap_or_else(|| DEFAULT_IAM_URL.to_string()),
                client_id: None,
                client_secret: None,
            },
        }
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of retries per page request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub retry_backoff: BackoffConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_backoff: BackoffConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    60000
}

/// Rate limiting configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Whether client-side rate limiting is on
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Requests per second limit
    #[serde(default = "default_rps")]
    pub requests_per_second: u32,

    /// Burst size, defaults to `requests_per_second`
    #[serde(default)]
    pub burst_size: Option<u32>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            requests_per_second: default_rps(),
            burst_size: None,
        }
    }
}

impl RateLimitConfig {
    /// Limiter settings, `None` when disabled
    pub fn to_limiter_config(&self) -> Option<RateLimiterConfig> {
        self.enabled.then(|| {
            RateLimiterConfig::new(
                self.requests_per_second,
                self.burst_size.unwrap_or(self.requests_per_second),
            )
        })
    }
}

fn default_rps() -> u32 {
    10
}

fn default_true() -> bool {
    true
}

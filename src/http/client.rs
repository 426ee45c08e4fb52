//! HTTP client with rate limiting and response classification
//!
//! Provides the transport used by the service layer:
//! - Rate limiting to prevent API throttling
//! - Authentication via the auth module
//! - JSON request/response bodies
//! - Error classification so retry decisions can be made by a `RetryPolicy`
//!
//! Each call makes exactly one attempt. Retrying is layered on top.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::auth::{AuthConfig, Authenticator};
use crate::error::{Error, Result};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Default `Retry-After` when a 429 carries none
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            rate_limit: Some(RateLimiterConfig::default()),
            default_headers: HashMap::new(),
            user_agent: format!("watson-sdk/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters, sent in insertion order
    pub query: Vec<(String, String)>,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body (JSON)
    pub body: Option<Value>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Add a query parameter when the value is present
    #[must_use]
    pub fn query_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[cfg(test)]
    pub(crate) fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP client with rate limiting and authentication
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    authenticator: Option<Authenticator>,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            authenticator: None,
            rate_limiter,
        })
    }

    /// Create a client with authentication
    pub fn with_auth(config: HttpClientConfig, auth_config: AuthConfig) -> Result<Self> {
        auth_config.validate()?;
        let mut client = Self::with_config(config)?;
        client.set_authenticator(auth_config);
        Ok(client)
    }

    /// Set the authenticator
    pub fn set_authenticator(&mut self, auth_config: AuthConfig) {
        self.authenticator = Some(Authenticator::with_client(auth_config, self.client.clone()));
    }

    #[cfg(test)]
    pub(crate) fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Make a single request and classify the response
    pub async fn request(&self, method: Method, url: &str, config: RequestConfig) -> Result<Response> {
        let timeout = config.timeout.unwrap_or(self.config.timeout);

        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let mut req = self
            .client
            .request(method.clone(), url)
            .header("Accept", "application/json");

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        for (key, value) in &config.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        if let Some(ref body) = config.body {
            req = req.json(body);
        }

        req = req.timeout(timeout);

        if let Some(ref auth) = self.authenticator {
            req = auth.apply(req).await?;
        }

        debug!("{} {}", method, url);

        let response = match req.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return Err(Error::Timeout {
                    timeout_ms: timeout.as_millis() as u64,
                });
            }
            Err(e) => return Err(Error::Http(e)),
        };

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = extract_retry_after(&response);
            warn!("Rate limited (429) on {method} {url}, retry after {retry_after}s");
            return Err(Error::RateLimited {
                retry_after_seconds: retry_after,
            });
        }

        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: extract_error_message(&body),
            });
        }

        debug!("Request succeeded: {} {} ({})", method, url, status.as_u16());
        Ok(response)
    }

    /// Make a request and parse the JSON response
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
    ) -> Result<T> {
        let response = self.request(method, url, config).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Make a request whose response body is ignored
    pub async fn request_empty(&self, method: Method, url: &str, config: RequestConfig) -> Result<()> {
        self.request(method, url, config).await?;
        Ok(())
    }

    /// Make a GET request and parse the JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str, config: RequestConfig) -> Result<T> {
        self.request_json(Method::GET, url, config).await
    }

    /// Make a POST request and parse the JSON response
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        config: RequestConfig,
    ) -> Result<T> {
        self.request_json(Method::POST, url, config).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, url: &str, config: RequestConfig) -> Result<()> {
        self.request_empty(Method::DELETE, url, config).await
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_authenticator", &self.authenticator.is_some())
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Extract retry-after header value
fn extract_retry_after(response: &Response) -> u64 {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// Pull the human-readable message out of a Watson error body
///
/// Watson errors look like `{"error": "Resource not found", "code": 404}`.
/// Anything else is returned as-is.
pub(crate) fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .or_else(|| v.get("errorMessage"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use crate::types::BackoffType;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client() -> HttpClient {
    let config = HttpClientConfig::builder().no_rate_limit().build();
    HttpClient::with_config(config).unwrap()
}

fn fast_retries(max_retries: u32) -> RetryPolicy {
    RetryPolicy::new(max_retries).with_backoff(
        BackoffType::Constant,
        Duration::from_millis(10),
        Duration::from_millis(50),
    )
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.rate_limit.is_some());
    assert!(config.user_agent.starts_with("watson-sdk/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .timeout(Duration::from_secs(60))
        .header("X-Watson-Learning-Opt-Out", "true")
        .user_agent("test-agent/1.0")
        .no_rate_limit()
        .build();

    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(
        config.default_headers.get("X-Watson-Learning-Opt-Out"),
        Some(&"true".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
    assert!(config.rate_limit.is_none());
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("version", "2019-02-28")
        .query("page_limit", 10)
        .query_opt("cursor", None::<String>)
        .query_opt("sort", Some("entity"))
        .header("X-Request-Id", "abc123")
        .json(json!({"entity": "beverage"}))
        .timeout(Duration::from_secs(10));

    assert_eq!(config.query_value("version"), Some("2019-02-28"));
    assert_eq!(config.query_value("page_limit"), Some("10"));
    assert_eq!(config.query_value("cursor"), None);
    assert_eq!(config.query_value("sort"), Some("entity"));
    assert_eq!(
        config.headers.get("X-Request-Id"),
        Some(&"abc123".to_string())
    );
    assert!(config.body.is_some());
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
}

#[tokio::test]
async fn test_http_client_get_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/workspaces"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "workspaces": [{"name": "Customer Care"}]
        })))
        .mount(&mock_server)
        .await;

    let client = test_client();
    let data: Value = client
        .get_json(
            &format!("{}/v1/workspaces", mock_server.uri()),
            RequestConfig::new(),
        )
        .await
        .unwrap();

    assert_eq!(data["workspaces"][0]["name"], "Customer Care");
}

#[tokio::test]
async fn test_http_client_post_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/items"))
        .and(body_json(json!({"name": "test"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "name": "test",
            "created": "2020-01-01T00:00:00Z"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client();
    let data: Value = client
        .post_json(
            &format!("{}/v1/items", mock_server.uri()),
            RequestConfig::new().json(json!({"name": "test"})),
        )
        .await
        .unwrap();

    assert_eq!(data["name"], "test");
}

#[tokio::test]
async fn test_http_client_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("version", "2019-02-28"))
        .and(query_param("page_limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client();
    let _: Value = client
        .get_json(
            &format!("{}/v1/search", mock_server.uri()),
            RequestConfig::new()
                .query("version", "2019-02-28")
                .query("page_limit", 2),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_http_client_default_and_request_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/data"))
        .and(header("X-Watson-Learning-Opt-Out", "true"))
        .and(header("X-Request-Id", "req-456"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .header("X-Watson-Learning-Opt-Out", "true")
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let _: Value = client
        .get_json(
            &format!("{}/v1/data", mock_server.uri()),
            RequestConfig::new().header("X-Request-Id", "req-456"),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_http_client_authenticated_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/secure"))
        .and(header("Authorization", "Bearer token-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder().no_rate_limit().build();
    let client =
        HttpClient::with_auth(config, crate::auth::AuthConfig::bearer("token-abc")).unwrap();

    let data: Value = client
        .get_json(
            &format!("{}/v1/secure", mock_server.uri()),
            RequestConfig::new(),
        )
        .await
        .unwrap();
    assert_eq!(data["ok"], true);
}

#[tokio::test]
async fn test_http_client_404_extracts_watson_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "Resource not found",
            "code": 404
        })))
        .mount(&mock_server)
        .await;

    let client = test_client();
    let err = client
        .get_json::<Value>(
            &format!("{}/v1/missing", mock_server.uri()),
            RequestConfig::new(),
        )
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "Resource not found");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_client_plain_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Server exploded"))
        .mount(&mock_server)
        .await;

    let client = test_client();
    let err = client
        .get_json::<Value>(
            &format!("{}/v1/broken", mock_server.uri()),
            RequestConfig::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::HttpStatus { status: 500, ref body } if body == "Server exploded"
    ));
}

#[tokio::test]
async fn test_http_client_429_is_classified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/limited"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client();
    let err = client
        .get_json::<Value>(
            &format!("{}/v1/limited", mock_server.uri()),
            RequestConfig::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::RateLimited {
            retry_after_seconds: 7
        }
    ));
}

#[tokio::test]
async fn test_http_client_delete_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/items/1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client();
    client
        .delete(
            &format!("{}/v1/items/1", mock_server.uri()),
            RequestConfig::new(),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_retry_policy_retries_500_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let client = test_client();
    let url = format!("{}/v1/flaky", mock_server.uri());
    let data: Value = fast_retries(3)
        .run(|| client.get_json(&url, RequestConfig::new()))
        .await
        .unwrap();

    assert_eq!(data["ok"], true);
}

#[tokio::test]
async fn test_retry_policy_honors_rate_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/limited"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "1"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/limited"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let client = test_client();
    let url = format!("{}/v1/limited", mock_server.uri());
    let data: Value = fast_retries(2)
        .run(|| client.get_json(&url, RequestConfig::new()))
        .await
        .unwrap();

    assert_eq!(data["ok"], true);
}

#[tokio::test]
async fn test_retry_policy_gives_up() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/always-fail"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = test_client();
    let url = format!("{}/v1/always-fail", mock_server.uri());
    let result: crate::Result<Value> = fast_retries(2)
        .run(|| client.get_json(&url, RequestConfig::new()))
        .await;

    assert!(matches!(result, Err(Error::HttpStatus { status: 503, .. })));
}

#[tokio::test]
async fn test_http_client_with_rate_limiter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .rate_limit(RateLimiterConfig::new(100, 10))
        .build();
    let client = HttpClient::with_config(config).unwrap();
    assert!(client.has_rate_limiter());

    let url = format!("{}/v1/data", mock_server.uri());
    for _ in 0..3 {
        let _: Value = client.get_json(&url, RequestConfig::new()).await.unwrap();
    }
}

#[test]
fn test_http_client_debug() {
    let client = HttpClient::new().unwrap();
    let debug_str = format!("{client:?}");
    assert!(debug_str.contains("HttpClient"));
    assert!(debug_str.contains("has_rate_limiter: true"));
}

#[test]
fn test_extract_error_message() {
    assert_eq!(
        client::extract_error_message(r#"{"error": "Invalid request", "code": 400}"#),
        "Invalid request"
    );
    assert_eq!(
        client::extract_error_message(r#"{"errorMessage": "Bad key"}"#),
        "Bad key"
    );
    assert_eq!(client::extract_error_message("plain text"), "plain text");
}

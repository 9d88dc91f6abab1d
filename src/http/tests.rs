//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use crate::types::{BackoffType, Method};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn get(client: &HttpClient, url: &str) -> crate::error::Result<reqwest::Response> {
    client
        .request(reqwest::Method::GET, url, RequestConfig::new())
        .await
}

fn test_client(base_url: String) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(base_url)
        .no_rate_limit()
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_secs(1),
        )
        .build();
    HttpClient::with_config(config).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_retries, 3);
    assert_eq!(config.base_url.as_deref(), Some(DEFAULT_BASE_URL));
    assert!(config.rate_limit.is_some());
    assert!(config.user_agent.starts_with("bitbucket-sdk/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://bitbucket.example.com/rest/2.0")
        .timeout(Duration::from_secs(60))
        .max_retries(5)
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(200),
            Duration::from_secs(30),
        )
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(
        config.base_url,
        Some("https://bitbucket.example.com/rest/2.0".to_string())
    );
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.max_retries, 5);
    assert_eq!(config.backoff_type, BackoffType::Linear);
    assert_eq!(config.initial_backoff, Duration::from_millis(200));
    assert_eq!(config.max_backoff, Duration::from_secs(30));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("state", "OPEN")
        .query("state", "MERGED")
        .queries([("pagelen", "10")])
        .header("X-Request-Id", "abc123")
        .json(serde_json::json!({"key": "value"}))
        .timeout(Duration::from_secs(10))
        .retries(2);

    assert_eq!(
        config.query,
        vec![
            ("state".to_string(), "OPEN".to_string()),
            ("state".to_string(), "MERGED".to_string()),
            ("pagelen".to_string(), "10".to_string()),
        ]
    );
    assert_eq!(
        config.headers.get("X-Request-Id"),
        Some(&"abc123".to_string())
    );
    assert!(config.body.is_some());
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
    assert_eq!(config.max_retries, Some(2));
}

#[test]
fn test_build_url() {
    let client = test_client("https://api.bitbucket.org/2.0/".to_string());
    assert_eq!(
        client.build_url("/repositories/team/repo/pullrequests"),
        "https://api.bitbucket.org/2.0/repositories/team/repo/pullrequests"
    );
    assert_eq!(
        client.build_url("https://api.bitbucket.org/2.0/repositories?page=2"),
        "https://api.bitbucket.org/2.0/repositories?page=2"
    );
}

#[tokio::test]
async fn test_http_client_execute_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repositories/team/repo/pullrequests/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 1,
            "title": "Add feature"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    let data: serde_json::Value = execute_json(
        &client,
        Method::GET,
        "/repositories/team/repo/pullrequests/1",
        RequestConfig::new(),
    )
    .await
    .unwrap();

    assert_eq!(data["id"], 1);
    assert_eq!(data["title"], "Add feature");
}

#[tokio::test]
async fn test_http_client_post() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repositories/team/repo/pullrequests"))
        .and(body_json(serde_json::json!({"title": "New PR"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 7,
            "title": "New PR"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    let response = client
        .request(
            reqwest::Method::POST,
            "/repositories/team/repo/pullrequests",
            RequestConfig::new().json(serde_json::json!({"title": "New PR"})),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 201);
}

#[tokio::test]
async fn test_http_client_repeated_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repositories/team/repo/pullrequests"))
        .and(query_param("state", "OPEN"))
        .and(query_param("state", "MERGED"))
        .and(query_param("pagelen", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "values": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    let response = client
        .request(
            reqwest::Method::GET,
            "/repositories/team/repo/pullrequests",
            RequestConfig::new()
                .query("state", "OPEN")
                .query("state", "MERGED")
                .query("pagelen", "25"),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_default_and_request_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header("X-Custom", "default"))
        .and(header("X-Request-Id", "req-456"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .header("X-Custom", "default")
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config).unwrap();
    let response = client
        .request(
            reqwest::Method::GET,
            "/user",
            RequestConfig::new().header("X-Request-Id", "req-456"),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_applies_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header("Authorization", "Bearer repo-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .no_rate_limit()
        .build();

    let client =
        HttpClient::with_auth(config, crate::auth::AuthConfig::bearer("repo-token")).unwrap();
    assert!(client.has_authenticator());

    let response = get(&client, "/user").await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_404_uses_bitbucket_error_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repositories/team/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "type": "error",
            "error": {"message": "Repository team/missing not found"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    let err = get(&client, "/repositories/team/missing").await.unwrap_err();

    match err {
        Error::Remote { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Repository team/missing not found");
        }
        other => panic!("Expected Remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_client_empty_error_body_uses_reason_phrase() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/src/master/missing.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    let err = get(&client, "/src/master/missing.txt").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "HTTP 404: Not Found");
}

#[tokio::test]
async fn test_http_client_plain_error_body_passes_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad pagelen"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    let err = get(&client, "/broken").await.unwrap_err();

    assert!(matches!(
        err,
        Error::Remote { status: 400, ref message } if message == "bad pagelen"
    ));
}

#[tokio::test]
async fn test_http_client_retry_on_500() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    let response = get(&client, "/flaky").await.unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_rate_limit_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "1")
                .set_body_string("Rate limited"),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    let response = get(&client, "/limited").await.unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_max_retries_exceeded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/always-fail"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Server error"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .max_retries(2)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_secs(1),
        )
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config).unwrap();
    let err = get(&client, "/always-fail").await.unwrap_err();

    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_http_client_does_not_retry_client_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forbidden"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    let err = get(&client, "/forbidden").await.unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_http_client_full_url_without_base() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/test"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .no_base_url()
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let response = get(&client, &format!("{}/api/test", mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_transport_execute_returns_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repositories/team/repo/pullrequests/3/diff"))
        .respond_with(ResponseTemplate::new(200).set_body_string("diff --git a/x b/x\n"))
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    let transport: &dyn Transport = &client;
    let body = transport
        .execute(
            Method::GET,
            "/repositories/team/repo/pullrequests/3/diff",
            RequestConfig::new(),
        )
        .await
        .unwrap();

    assert_eq!(body, "diff --git a/x b/x\n");
}

#[tokio::test]
async fn test_transport_execute_json_and_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/item"))
        .and(body_json(serde_json::json!({"name": "x"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "x"})))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/item"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());

    let echoed: serde_json::Value =
        send_json(&client, Method::PUT, "/item", &serde_json::json!({"name": "x"}))
            .await
            .unwrap();
    assert_eq!(echoed["name"], "x");

    execute_empty(&client, Method::DELETE, "/item", RequestConfig::new())
        .await
        .unwrap();
}

#[test]
fn test_calculate_backoff_constant() {
    let config = HttpClientConfig::builder()
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(100),
            Duration::from_secs(10),
        )
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(1), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(5), Duration::from_millis(100));
}

#[test]
fn test_calculate_backoff_linear() {
    let config = HttpClientConfig::builder()
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(100),
            Duration::from_secs(10),
        )
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(1), Duration::from_millis(200));
    assert_eq!(client.calculate_backoff(2), Duration::from_millis(300));
}

#[test]
fn test_calculate_backoff_exponential_respects_max() {
    let config = HttpClientConfig::builder()
        .backoff(
            BackoffType::Exponential,
            Duration::from_millis(100),
            Duration::from_millis(500),
        )
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(1), Duration::from_millis(200));
    assert_eq!(client.calculate_backoff(2), Duration::from_millis(400));
    assert_eq!(client.calculate_backoff(10), Duration::from_millis(500));
}

#[test]
fn test_http_client_debug() {
    let client = HttpClient::new().unwrap();
    let debug_str = format!("{client:?}");
    assert!(debug_str.contains("HttpClient"));
    assert!(debug_str.contains("config"));
    assert!(client.has_rate_limiter());
    assert!(!client.has_authenticator());
}

#[tokio::test]
async fn test_http_client_with_rate_limiter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .rate_limit(RateLimiterConfig::new(100, 10))
        .build();

    let client = HttpClient::with_config(config).unwrap();

    for _ in 0..3 {
        let response = get(&client, "/user").await.unwrap();
        assert_eq!(response.status(), 200);
    }
}

fn retrying_client(base_url: String) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(base_url)
        .max_retries(3)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(1),
            Duration::from_millis(1),
        )
        .no_rate_limit()
        .build();
    HttpClient::with_config(config).unwrap()
}

#[tokio::test]
async fn test_http_client_post_sent_once_on_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repositories/team/repo/pullrequests"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = retrying_client(mock_server.uri());
    let err = send_json::<_, serde_json::Value>(
        &client,
        Method::POST,
        "/repositories/team/repo/pullrequests",
        &serde_json::json!({"title": "Only once"}),
    )
    .await
    .unwrap_err();

    match err {
        Error::Remote { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "Bad Gateway");
        }
        other => panic!("Expected remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_client_put_retried_on_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/repositories/team/repo/pullrequests/4"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/repositories/team/repo/pullrequests/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 4})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = retrying_client(mock_server.uri());
    let updated: serde_json::Value = send_json(
        &client,
        Method::PUT,
        "/repositories/team/repo/pullrequests/4",
        &serde_json::json!({"title": "Again"}),
    )
    .await
    .unwrap();

    assert_eq!(updated["id"], 4);
}

#[tokio::test]
async fn test_http_client_post_retried_after_429() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repositories/team/repo/pullrequests/4/approve"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/repositories/team/repo/pullrequests/4/approve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"approved": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = retrying_client(mock_server.uri());
    let body: serde_json::Value = execute_json(
        &client,
        Method::POST,
        "/repositories/team/repo/pullrequests/4/approve",
        RequestConfig::new(),
    )
    .await
    .unwrap();

    assert_eq!(body["approved"], true);
}

#[tokio::test]
async fn test_http_client_exhausted_429_keeps_bitbucket_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repositories/team/repo/pullrequests"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "0")
                .set_body_json(serde_json::json!({
                    "type": "error",
                    "error": {"message": "Rate limit for this resource has been exceeded"}
                })),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    let err = client
        .request(
            reqwest::Method::GET,
            "/repositories/team/repo/pullrequests",
            RequestConfig::new().retries(1),
        )
        .await
        .unwrap_err();

    match err {
        Error::Remote { status, ref message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "Rate limit for this resource has been exceeded");
        }
        ref other => panic!("Expected remote error, got {other:?}"),
    }
    assert_eq!(err.status(), Some(429));
    assert!(err.is_retryable());
}

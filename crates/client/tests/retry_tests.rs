//! Retry behavior for throttled and unavailable responses.
//!
//! # Invariants
//! - 429, 502, 503 and 504 are retried with 1s, 2s, 4s, ... backoff
//! - 500 is not retried
//! - Connection failures are retried and the last transport error is returned
//! - Exhausting the budget yields `MaxRetriesExceeded` with the attempt count

mod common;

use common::*;
use mailkeys_client::ClientError;
use mailkeys_config::{NavigationAction, Shortcut};
use std::time::Duration;
use wiremock::matchers::{method, path};

#[tokio::test(start_paused = true)]
async fn test_retry_on_503_then_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/shortcut.get"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/shortcut.get"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(trpc_ok(serde_json::json!({ "shortcuts": null }))),
        )
        .mount(&mock_server)
        .await;

    let server_uri = mock_server.uri();
    let result_handle = tokio::spawn(async move {
        endpoints::get_shortcuts(
            &Client::new(),
            &server_uri,
            &AuthStrategy::bearer("test-token"),
            3,
        )
        .await
    });

    assert_pending(&result_handle, "first 503 retry should wait for backoff").await;
    advance_and_yield(Duration::from_secs(1)).await;
    assert_pending(&result_handle, "second 503 retry should wait for backoff").await;
    advance_and_yield(Duration::from_secs(2)).await;
    let result = result_handle.await.expect("get shortcuts task");

    assert!(result.unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_retry_on_429_and_gateway_errors() {
    let mock_server = MockServer::start().await;

    for status in [429, 502, 504] {
        Mock::given(method("POST"))
            .and(path("/api/trpc/shortcut.update"))
            .respond_with(ResponseTemplate::new(status))
            .up_to_n_times(1)
            .mount(&mock_server)
            .await;
    }

    Mock::given(method("POST"))
        .and(path("/api/trpc/shortcut.update"))
        .respond_with(ResponseTemplate::new(200).set_body_json(trpc_ok(serde_json::Value::Null)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let server_uri = mock_server.uri();
    let result_handle = tokio::spawn(async move {
        endpoints::update_shortcuts(
            &Client::new(),
            &server_uri,
            &AuthStrategy::bearer("test-token"),
            &[Shortcut::new(NavigationAction::Inbox, &["g", "i"])],
            3,
        )
        .await
    });

    advance_and_yield(Duration::from_secs(1)).await;
    advance_and_yield(Duration::from_secs(2)).await;
    advance_and_yield(Duration::from_secs(4)).await;
    let result = result_handle.await.expect("update task");

    assert!(result.is_ok(), "unexpected error: {result:?}");
}

#[tokio::test(start_paused = true)]
async fn test_max_retries_exhausted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/trpc/shortcut.prune"))
        .respond_with(ResponseTemplate::new(429))
        .expect(2)
        .mount(&mock_server)
        .await;

    let server_uri = mock_server.uri();
    let result_handle = tokio::spawn(async move {
        endpoints::prune_shortcuts(
            &Client::new(),
            &server_uri,
            &AuthStrategy::bearer("test-token"),
            1,
        )
        .await
    });

    advance_and_yield(Duration::from_secs(1)).await;
    let result = result_handle.await.expect("prune task");

    assert!(matches!(result, Err(ClientError::MaxRetriesExceeded(2))));
}

#[tokio::test]
async fn test_no_retry_on_500() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/shortcut.get"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = endpoints::get_shortcuts(
        &Client::new(),
        &mock_server.uri(),
        &AuthStrategy::bearer("test-token"),
        3,
    )
    .await;

    assert!(matches!(result, Err(ClientError::Api { status: 500, .. })));
}

#[tokio::test]
async fn test_zero_retries_sends_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/shortcut.get"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = endpoints::get_shortcuts(
        &Client::new(),
        &mock_server.uri(),
        &AuthStrategy::bearer("test-token"),
        0,
    )
    .await;

    assert!(matches!(result, Err(ClientError::MaxRetriesExceeded(1))));
}

#[tokio::test]
async fn test_connection_failure_is_retried_then_surfaced() {
    // Port 9 (discard) is almost never listening locally
    let started = tokio::time::Instant::now();
    let result = endpoints::get_shortcuts(
        &Client::new(),
        "http://127.0.0.1:9",
        &AuthStrategy::bearer("test-token"),
        1,
    )
    .await;

    assert!(
        started.elapsed() >= Duration::from_secs(1),
        "second attempt should wait for backoff"
    );
    match result {
        Err(err @ ClientError::HttpError(_)) => assert!(err.is_retryable(), "{err:?}"),
        other => panic!("expected transport error, got {other:?}"),
    }
}

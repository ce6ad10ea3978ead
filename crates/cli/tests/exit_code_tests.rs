//! Integration tests for structured exit codes.
//!
//! These tests verify that mailkeys returns the correct exit codes
//! for different error scenarios, enabling reliable shell scripting.

mod common;

use common::{mailkeys_cmd, mailkeys_cmd_with_base_url};
use predicates::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Missing credentials for a server-bound command return exit code 2.
#[test]
fn test_missing_auth_returns_exit_code_2() {
    mailkeys_cmd()
        .env_remove("MAILKEYS_API_TOKEN")
        .arg("reset")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Authentication is required"));
}

/// Rejected credentials return exit code 2.
#[tokio::test]
async fn test_unauthorized_returns_exit_code_2() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/shortcut.get"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {
                "message": "You must be logged in",
                "data": { "code": "UNAUTHORIZED", "httpStatus": 401 }
            }
        })))
        .mount(&server)
        .await;

    mailkeys_cmd_with_base_url(&server.uri())
        .arg("list")
        .assert()
        .code(2);
}

/// Connection refused returns exit code 3.
#[test]
fn test_connection_refused_returns_exit_code_3() {
    // Port 9 (discard) is almost never listening locally
    mailkeys_cmd_with_base_url("http://127.0.0.1:9")
        .arg("list")
        .assert()
        .code(3);
}

/// Throttling that outlasts the retry budget returns exit code 8.
#[tokio::test]
async fn test_throttled_returns_exit_code_8() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/shortcut.get"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    mailkeys_cmd_with_base_url(&server.uri())
        .arg("list")
        .assert()
        .code(8);
}

/// Invalid URLs fail configuration with exit code 1.
#[test]
fn test_invalid_base_url_returns_exit_code_1() {
    mailkeys_cmd()
        .args(["--base-url", "not a url", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to build configuration"));
}

/// A zero cache TTL from the command line is rejected like any other bad setting.
#[test]
fn test_zero_cache_ttl_flag_returns_exit_code_1() {
    mailkeys_cmd()
        .args(["--cache-ttl", "0", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cache TTL must be greater than 0 seconds"));
}

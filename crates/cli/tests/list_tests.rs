//! Integration tests for `mailkeys list`.

mod common;

use common::{mailkeys_cmd, mailkeys_cmd_with_base_url, trpc_ok};
use predicates::prelude::*;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_defaults_table_offline() {
    mailkeys_cmd()
        .env_remove("MAILKEYS_API_TOKEN")
        .args(["list", "--defaults"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SCOPE"))
        .stdout(predicate::str::contains("commandPalette"))
        .stdout(predicate::str::contains("meta+k"))
        .stdout(predicate::str::contains("closeCompose"));
}

#[test]
fn test_defaults_json_filtered_by_scope() {
    let output = mailkeys_cmd()
        .args(["list", "--defaults", "--scope", "navigation", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows.len(), 7);
    assert!(rows.iter().all(|r| r["scope"] == "navigation"));
    assert!(rows.iter().all(|r| r["overridden"] == false));

    let inbox = rows.iter().find(|r| r["action"] == "inbox").unwrap();
    assert_eq!(inbox["combination"], "alt+shift+i");
    assert_eq!(inbox["description"], "Go to inbox");
}

#[tokio::test]
async fn test_overrides_are_merged() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/shortcut.get"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(trpc_ok(serde_json::json!({
            "shortcuts": {
                "userId": "u_1",
                "shortcuts": [
                    { "action": "inbox", "keys": ["mod", "i"], "scope": "navigation" }
                ]
            }
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let output = mailkeys_cmd_with_base_url(&server.uri())
        .args(["list", "--scope", "navigation", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{:?}", output);

    let rows: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    let inbox = rows.iter().find(|r| r["action"] == "inbox").unwrap();
    assert_eq!(inbox["combination"], "meta+i");
    assert_eq!(inbox["overridden"], true);

    let drafts = rows.iter().find(|r| r["action"] == "goToDrafts").unwrap();
    assert_eq!(drafts["overridden"], false);
}

#[tokio::test]
async fn test_no_stored_row_lists_defaults() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/shortcut.get"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(trpc_ok(serde_json::json!({ "shortcuts": null }))),
        )
        .mount(&server)
        .await;

    mailkeys_cmd_with_base_url(&server.uri())
        .args(["list", "--scope", "compose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("closeCompose"))
        .stdout(predicate::str::contains("overridden").not());
}

#[test]
fn test_invalid_output_format() {
    mailkeys_cmd()
        .args(["list", "--defaults", "--output", "xml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid output format"));
}

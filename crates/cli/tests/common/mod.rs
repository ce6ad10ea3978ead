//! Shared test utilities for mailkeys CLI integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Pin the host to a known platform and layout.
//!
//! Invariants / Assumptions:
//! - `MAILKEYS_API_TOKEN` is set to "test-token" unless overridden.
//! - The host is Apple with a standard layout unless overridden.

use assert_cmd::Command;

/// Returns a hermetic `mailkeys` command for integration testing.
pub fn mailkeys_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("mailkeys");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    cmd.env("MAILKEYS_API_TOKEN", "test-token");
    cmd.env("MAILKEYS_PLATFORM", "apple");
    cmd.env("MAILKEYS_LAYOUT", "standard");

    // Clear potential host leakage
    cmd.env_remove("MAILKEYS_BASE_URL")
        .env_remove("MAILKEYS_SESSION_COOKIE")
        .env_remove("MAILKEYS_LANGUAGES")
        .env_remove("MAILKEYS_MAX_RETRIES")
        .env_remove("MAILKEYS_CACHE_TTL_SECONDS")
        .env_remove("RUST_LOG");

    cmd
}

/// A hermetic command pointed at `base_url` with retries disabled.
#[allow(dead_code)]
pub fn mailkeys_cmd_with_base_url(base_url: &str) -> Command {
    let mut cmd = mailkeys_cmd();
    cmd.env("MAILKEYS_BASE_URL", base_url);
    cmd.env("MAILKEYS_MAX_RETRIES", "0");
    cmd
}

/// `{"result":{"data":...}}`
#[allow(dead_code)]
pub fn trpc_ok(data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({ "result": { "data": data } })
}

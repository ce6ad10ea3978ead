//! Common test utilities for integration tests.
//!
//! This module re-exports the types most tests need and provides an
//! in-memory [`ShortcutRemote`] for exercising the gateway without HTTP.
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)
//! - Test-specific assertions or test logic

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

// Re-export commonly used types for test convenience
// These are used via `use common::*;` in test files
#[allow(unused_imports)]
pub use mailkeys_client::endpoints;
#[allow(unused_imports)]
pub use mailkeys_config::AuthStrategy;
#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use mailkeys_client::{ClientError, ShortcutRemote, UserHotkeys};
use mailkeys_config::{OverrideSet, Shortcut};

/// Advance Tokio's paused clock and yield so sleepers can observe the change.
#[allow(dead_code)]
pub async fn advance_and_yield(duration: Duration) {
    tokio::time::advance(duration).await;
    tokio::task::yield_now().await;
}

/// Assert that a task has not completed after yielding to the scheduler.
#[allow(dead_code)]
pub async fn assert_pending<T>(handle: &tokio::task::JoinHandle<T>, context: &str) {
    tokio::task::yield_now().await;
    assert!(!handle.is_finished(), "Expected pending task: {}", context);
}

/// A successful tRPC response body carrying `data`.
#[allow(dead_code)]
pub fn trpc_ok(data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({ "result": { "data": data } })
}

/// A tRPC error body.
#[allow(dead_code)]
pub fn trpc_error(message: &str, code: &str, status: u16) -> serde_json::Value {
    serde_json::json!({
        "error": {
            "message": message,
            "data": { "code": code, "httpStatus": status }
        }
    })
}

/// In-memory shortcut store that counts calls and can be told to fail writes.
#[allow(dead_code)]
#[derive(Default)]
pub struct FakeRemote {
    stored: Mutex<Option<UserHotkeys>>,
    fail_writes: AtomicBool,
    pub gets: AtomicUsize,
    pub updates: AtomicUsize,
    pub prunes: AtomicUsize,
}

#[allow(dead_code)]
impl FakeRemote {
    pub fn with_overrides(shortcuts: Vec<Shortcut>) -> Self {
        let remote = Self::default();
        *remote.stored.lock().unwrap() = Some(UserHotkeys {
            user_id: Some("user-1".to_string()),
            shortcuts: OverrideSet::new(shortcuts),
            ..UserHotkeys::default()
        });
        remote
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn stored(&self) -> Option<OverrideSet> {
        self.stored
            .lock()
            .unwrap()
            .as_ref()
            .map(|row| row.shortcuts.clone())
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn write_error(&self) -> Option<ClientError> {
        self.fail_writes.load(Ordering::SeqCst).then(|| ClientError::Api {
            status: 500,
            url: "memory://shortcut".to_string(),
            message: "write failed".to_string(),
            code: Some("INTERNAL_SERVER_ERROR".to_string()),
        })
    }
}

#[async_trait]
impl ShortcutRemote for FakeRemote {
    async fn get(&self) -> mailkeys_client::Result<Option<UserHotkeys>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn update(&self, shortcuts: &[Shortcut]) -> mailkeys_client::Result<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        // Give a concurrent caller a chance to run mid-write.
        tokio::task::yield_now().await;
        if let Some(err) = self.write_error() {
            return Err(err);
        }
        let mut stored = self.stored.lock().unwrap();
        let row = stored.get_or_insert_with(UserHotkeys::default);
        row.shortcuts = OverrideSet::new(shortcuts.to_vec());
        Ok(())
    }

    async fn prune(&self) -> mailkeys_client::Result<()> {
        self.prunes.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.write_error() {
            return Err(err);
        }
        *self.stored.lock().unwrap() = None;
        Ok(())
    }
}

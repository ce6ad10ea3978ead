//! Procedure-level HTTP calls.
//!
//! Each function takes the shared `reqwest::Client`, the normalized base URL,
//! the auth strategy and the retry budget, so they can be exercised directly
//! against a mock server without building a [`crate::ShortcutClient`].

mod request;
mod shortcut;

pub use request::send_request_with_retry;
pub use shortcut::{get_shortcuts, prune_shortcuts, update_shortcuts};

use mailkeys_config::constants::RPC_PATH_PREFIX;

/// Full URL of a remote procedure, e.g. `…/api/trpc/shortcut.get`.
pub fn procedure_url(base_url: &str, procedure: &str) -> String {
    format!("{base_url}{RPC_PATH_PREFIX}/{procedure}")
}

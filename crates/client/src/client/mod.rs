//! Authenticated client for the mail server's shortcut procedures.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `shortcuts`: `shortcut.*` procedure methods
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Caching and optimistic updates (handled by [`crate::SettingsGateway`])
//!
//! # Invariants
//! - `base_url` never ends with a slash
//! - Every request carries the configured credentials

pub mod builder;
mod shortcuts;

use mailkeys_config::AuthStrategy;

/// Client for the `shortcut.*` remote procedures.
///
/// ```rust,ignore
/// use mailkeys_client::ShortcutClient;
/// use mailkeys_config::AuthStrategy;
///
/// let client = ShortcutClient::builder()
///     .base_url("https://mail.example.com".to_string())
///     .auth_strategy(AuthStrategy::bearer("my-token"))
///     .build()?;
/// let overrides = client.get_shortcuts().await?;
/// ```
#[derive(Debug)]
pub struct ShortcutClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) auth: AuthStrategy,
    pub(crate) max_retries: usize,
}

impl ShortcutClient {
    /// Create a new client builder.
    pub fn builder() -> builder::ShortcutClientBuilder {
        builder::ShortcutClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Short label of the auth strategy in use.
    pub fn auth_kind(&self) -> &'static str {
        self.auth.kind()
    }

    pub fn max_retries(&self) -> usize {
        self.max_retries
    }
}

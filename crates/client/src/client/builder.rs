//! Client builder for constructing [`ShortcutClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating required configuration (base_url, auth_strategy)
//! - Normalizing the base URL (removing trailing slashes)
//! - Configuring the underlying HTTP client (timeouts, TLS verification)
//!
//! # What this module does NOT handle:
//! - Actual API calls (handled by [`ShortcutClient`] methods)
//! - Retry logic for failed requests (handled by `endpoints::send_request_with_retry`)
//!
//! # Invariants
//! - `base_url` and `auth_strategy` are required fields and must be provided before calling `build()`
//! - The base URL is always normalized to have no trailing slashes
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning

use std::time::Duration;

use crate::client::ShortcutClient;
use crate::error::{ClientError, Result};
use mailkeys_config::{
    AuthStrategy, Config,
    constants::{DEFAULT_MAX_REDIRECTS, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS},
};

/// Builder for creating a new [`ShortcutClient`].
///
/// ```rust,ignore
/// let client = ShortcutClient::builder()
///     .base_url("https://mail.example.com".to_string())
///     .auth_strategy(AuthStrategy::session_cookie("abc"))
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
pub struct ShortcutClientBuilder {
    base_url: Option<String>,
    auth_strategy: Option<AuthStrategy>,
    skip_verify: bool,
    timeout: Duration,
    max_retries: usize,
}

impl Default for ShortcutClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            auth_strategy: None,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl ShortcutClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the mail server, e.g. `https://mail.example.com`.
    ///
    /// Trailing slashes will be automatically removed.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    pub fn auth_strategy(mut self, strategy: AuthStrategy) -> Self {
        self.auth_strategy = Some(strategy);
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this in development or testing environments.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the request timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retries for throttled or unavailable responses.
    ///
    /// Default is 3 retries with exponential backoff (1s, 2s, 4s delays).
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Create a client builder from configuration.
    pub fn from_config(mut self, config: &Config) -> Self {
        self.base_url = Some(config.connection.base_url.clone());
        self.auth_strategy = Some(config.auth.clone());
        self.skip_verify = config.connection.skip_verify;
        self.timeout = config.connection.timeout;
        self.max_retries = config.connection.max_retries;
        self
    }

    /// Normalize a base URL by removing trailing slashes.
    ///
    /// - `"https://mail.example.com/"` -> `"https://mail.example.com"`
    /// - `"https://mail.example.com//"` -> `"https://mail.example.com"`
    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the [`ShortcutClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` was not provided.
    /// Returns [`ClientError::Unauthorized`] if `auth_strategy` was not provided.
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<ShortcutClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);

        let auth = self
            .auth_strategy
            .ok_or_else(|| ClientError::Unauthorized("auth_strategy is required".to_string()))?;

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if self.skip_verify {
            if base_url.starts_with("https://") {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        let http = http_builder.build()?;

        tracing::debug!(%base_url, auth = auth.kind(), "Built shortcut client");

        Ok(ShortcutClient {
            http,
            base_url,
            auth,
            max_retries: self.max_retries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_with_bearer() {
        let config = Config::new("https://mail.example.com/", AuthStrategy::bearer("tok"));
        let client = ShortcutClient::builder()
            .from_config(&config)
            .build()
            .unwrap();

        assert_eq!(client.base_url(), "https://mail.example.com");
        assert_eq!(client.auth_kind(), "bearer");
    }

    #[test]
    fn test_from_config_preserves_settings() {
        let mut config = Config::new(
            "https://mail.example.com",
            AuthStrategy::session_cookie("abc"),
        );
        config.connection.skip_verify = true;
        config.connection.timeout = Duration::from_secs(90);
        config.connection.max_retries = 7;

        let builder = ShortcutClient::builder().from_config(&config);
        assert!(builder.skip_verify);
        assert_eq!(builder.timeout, Duration::from_secs(90));
        assert_eq!(builder.max_retries, 7);
        assert_eq!(builder.build().unwrap().max_retries(), 7);
    }

    #[test]
    fn test_build_requires_base_url() {
        let result = ShortcutClient::builder()
            .auth_strategy(AuthStrategy::bearer("tok"))
            .build();
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_build_requires_auth() {
        let result = ShortcutClient::builder()
            .base_url("http://localhost:8787".to_string())
            .build();
        assert!(matches!(result, Err(ClientError::Unauthorized(_))));
    }

    #[test]
    fn test_normalize_base_url() {
        for (input, expected) in [
            ("https://mail.example.com/", "https://mail.example.com"),
            ("https://mail.example.com", "https://mail.example.com"),
            ("https://mail.example.com//", "https://mail.example.com"),
        ] {
            assert_eq!(
                ShortcutClientBuilder::normalize_base_url(input.to_string()),
                expected
            );
        }
    }
}

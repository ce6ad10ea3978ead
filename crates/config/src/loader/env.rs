//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `MAILKEYS_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//! - Provide helper functions for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Building the final Config (see builder.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//! - Host detection signals (see `host::HostSignals::from_env`).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid numeric values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            // No trimming needed, return original to avoid allocation
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_var<T: FromStr>(var: &str, value: &str, message: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        var: var.to_string(),
        message: message.to_string(),
    })
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none("MAILKEYS_BASE_URL") {
        loader.set_base_url(Some(url));
    }
    if let Some(token) = env_var_or_none("MAILKEYS_API_TOKEN") {
        loader.set_api_token(Some(SecretString::new(token.into())));
    }
    if let Some(cookie) = env_var_or_none("MAILKEYS_SESSION_COOKIE") {
        loader.set_session_cookie(Some(SecretString::new(cookie.into())));
    }
    if let Some(name) = env_var_or_none("MAILKEYS_SESSION_COOKIE_NAME") {
        loader.set_session_cookie_name(Some(name));
    }
    if let Some(skip) = env_var_or_none("MAILKEYS_SKIP_VERIFY") {
        loader.set_skip_verify(Some(parse_var(
            "MAILKEYS_SKIP_VERIFY",
            &skip,
            "must be true or false",
        )?));
    }
    if let Some(timeout) = env_var_or_none("MAILKEYS_TIMEOUT") {
        let secs: u64 = parse_var("MAILKEYS_TIMEOUT", &timeout, "must be a number")?;
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(retries) = env_var_or_none("MAILKEYS_MAX_RETRIES") {
        loader.set_max_retries(Some(parse_var(
            "MAILKEYS_MAX_RETRIES",
            &retries,
            "must be a non-negative integer",
        )?));
    }
    if let Some(ttl) = env_var_or_none("MAILKEYS_CACHE_TTL_SECONDS") {
        let secs: u64 = parse_var("MAILKEYS_CACHE_TTL_SECONDS", &ttl, "must be a number")?;
        loader.set_cache_ttl(Some(Duration::from_secs(secs)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_var_or_none_filters_empty_and_whitespace_strings() {
        let key1 = "_MAILKEYS_TEST_UNSET_VAR";
        assert!(env_var_or_none(key1).is_none(), "Unset env var should return None");

        temp_env::with_vars([(key1, Some(""))], || {
            assert!(env_var_or_none(key1).is_none(), "Empty string env var should return None");
        });

        temp_env::with_vars([(key1, Some("   "))], || {
            assert!(
                env_var_or_none(key1).is_none(),
                "Whitespace-only env var should return None"
            );
        });

        let key2 = "_MAILKEYS_TEST_SET_VAR";
        temp_env::with_vars([(key2, Some(" test-value "))], || {
            assert_eq!(env_var_or_none(key2), Some("test-value".to_string()));
        });
    }

    #[test]
    fn test_parse_var_reports_variable() {
        let err = parse_var::<u64>("MAILKEYS_TIMEOUT", "soon", "must be a number").unwrap_err();
        match err {
            ConfigError::InvalidValue { var, message } => {
                assert_eq!(var, "MAILKEYS_TIMEOUT");
                assert_eq!(message, "must be a number");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

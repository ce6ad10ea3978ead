//! Centralized constants for the mailkeys workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication and improve maintainability.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed connection timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default maximum number of retries for failed requests.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Upper bound accepted for `MAILKEYS_MAX_RETRIES`.
pub const MAX_MAX_RETRIES: usize = 10;

/// Default base URL of the mail server during development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8787";

/// Path prefix under which the remote procedures are mounted.
pub const RPC_PATH_PREFIX: &str = "/api/trpc";

/// Cookie name used when authenticating with a browser session.
pub const DEFAULT_SESSION_COOKIE_NAME: &str = "session_token";

// =============================================================================
// Override Cache Defaults
// =============================================================================

/// Default time-to-live for the cached override set (5 minutes).
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Maximum allowed cache TTL in seconds (24 hours).
pub const MAX_CACHE_TTL_SECS: u64 = 86400;

// =============================================================================
// Host Detection
// =============================================================================

/// Language tag that marks a Dvorak keyboard host.
pub const DVORAK_LANGUAGE_TAG: &str = "en-DV";

/// Navigator platform string reported by Intel Macs (and iPads posing as them).
pub const MAC_INTEL_PLATFORM: &str = "MacIntel";

// =============================================================================
// Logging
// =============================================================================

/// Default directory for file-based logs written while the terminal is in raw mode.
pub const DEFAULT_LOG_DIR: &str = "logs";

//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ClientError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Signal handling (see cancellation.rs for SIGINT handling).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use mailkeys_client::ClientError;
use mailkeys_config::{ConfigError, KeybindError, ValidationError};

use crate::commands::set::UnknownAction;

/// Structured exit codes for mailkeys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Authentication failure - missing, invalid or expired credentials.
    AuthenticationFailed = 2,

    /// Connection error - network, timeout, or DNS failure.
    ConnectionError = 3,

    /// Unknown action or missing procedure.
    NotFound = 4,

    /// Validation error - malformed combination or rejected shortcut.
    ///
    /// Scripts should fix the input and not retry the same request.
    ValidationError = 5,

    /// Server still throttled or unavailable after all retries.
    ServiceUnavailable = 8,

    /// Interrupted - SIGINT/Ctrl+C (Unix standard: 128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::Unauthorized(_) => ExitCode::AuthenticationFailed,

            ClientError::InvalidUrl(_) => ExitCode::ConnectionError,
            ClientError::HttpError(e) => {
                if e.is_connect() || e.is_timeout() {
                    ExitCode::ConnectionError
                } else {
                    ExitCode::GeneralError
                }
            }

            ClientError::NotFound(_) => ExitCode::NotFound,

            ClientError::Validation(_) | ClientError::InvalidResponse(_) => {
                ExitCode::ValidationError
            }

            ClientError::MaxRetriesExceeded(_) => ExitCode::ServiceUnavailable,
            ClientError::Api { status, .. } if ClientError::is_retryable_status(*status) => {
                ExitCode::ServiceUnavailable
            }

            ClientError::Api { .. } => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if nothing in the chain has a mapping.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
            if cause.is::<KeybindError>() || cause.is::<ValidationError>() {
                return ExitCode::ValidationError;
            }
            if cause.is::<UnknownAction>() {
                return ExitCode::NotFound;
            }
            if let Some(ConfigError::MissingAuth) = cause.downcast_ref::<ConfigError>() {
                return ExitCode::AuthenticationFailed;
            }
        }

        ExitCode::GeneralError
    }
}

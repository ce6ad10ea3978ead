//! Error types for the shortcut client.

use thiserror::Error;

use mailkeys_config::ValidationError;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while reading or writing shortcut settings.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Error response from the server that has no more specific variant.
    #[error("API error ({status}) at {url}: {message}{}", .code.as_ref().map(|c| format!(" [{c}]")).unwrap_or_default())]
    Api {
        status: u16,
        url: String,
        message: String,
        code: Option<String>,
    },

    /// A shortcut was rejected, either locally before sending or by the server.
    #[error("Invalid shortcut: {0}")]
    Validation(String),

    /// The session is missing, expired, or not allowed to touch these settings.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Procedure not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid response format from the server.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Maximum retries exceeded.
    #[error("Maximum retries exceeded ({0} attempts)")]
    MaxRetriesExceeded(usize),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl ClientError {
    /// Check if this error is retryable.
    ///
    /// Transport errors count only when the request never got an answer:
    /// connection failures and timeouts.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpError(e) => e.is_connect() || e.is_timeout(),
            Self::Api { status, .. } => Self::is_retryable_status(*status),
            _ => false,
        }
    }

    /// Check if an HTTP status code is retryable.
    ///
    /// Retryable status codes:
    /// - 429: Too Many Requests (rate limiting)
    /// - 502: Bad Gateway (transient server error)
    /// - 503: Service Unavailable (transient server error)
    /// - 504: Gateway Timeout (transient server error)
    ///
    /// 500 is not retried; it usually means the write itself failed.
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 502 | 503 | 504)
    }
}

//! Retry helper for HTTP requests with exponential backoff.
//!
//! Requests that come back throttled (429), with a transient gateway error
//! (502, 503, 504), or that fail to connect or time out are retried after
//! 1s, 2s, 4s, ... (`2^attempt`). Any other non-success status is turned into
//! a typed [`ClientError`] from the tRPC error envelope.

use reqwest::{RequestBuilder, Response, StatusCode};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::models::TrpcErrorEnvelope;

/// tRPC code the server uses for schema validation failures.
const BAD_REQUEST_CODE: &str = "BAD_REQUEST";

/// Sends an HTTP request, retrying throttled, unavailable and unreachable
/// attempts.
///
/// `max_retries` is the number of retries after the first attempt; `0` sends
/// the request once.
///
/// # Errors
///
/// Returns `ClientError::MaxRetriesExceeded` when every attempt came back
/// with a retryable status, the transport error of the last attempt when the
/// server stayed unreachable, and the mapped server error for any other
/// non-success status.
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
) -> Result<Response> {
    for attempt in 0..=max_retries {
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None => {
                debug!("Request builder cannot be cloned, single attempt only");
                let response = builder.send().await?;
                return check_status(response).await;
            }
        };
        let last_attempt = attempt == max_retries;

        match attempt_builder.send().await {
            Ok(response) if !ClientError::is_retryable_status(response.status().as_u16()) => {
                if attempt > 0 && response.status().is_success() {
                    debug!(attempt = attempt + 1, "Request succeeded after retry");
                }
                return check_status(response).await;
            }
            Ok(response) => {
                let status = response.status().as_u16();
                if last_attempt {
                    debug!(attempts = attempt + 1, status, "Max retries exhausted");
                    return Err(ClientError::MaxRetriesExceeded(max_retries + 1));
                }
                debug!(attempt = attempt + 1, status, "Transient status");
            }
            Err(err) => {
                let err = ClientError::from(err);
                if last_attempt || !err.is_retryable() {
                    return Err(err);
                }
                debug!(attempt = attempt + 1, error = %err, "Transport failure");
            }
        }

        let backoff_secs = 2u64.pow(attempt as u32);
        debug!(
            attempt = attempt + 1,
            max_retries = max_retries + 1,
            backoff_secs,
            "Retrying with exponential backoff"
        );
        tokio::time::sleep(tokio::time::Duration::from_secs(backoff_secs)).await;
    }

    Err(ClientError::MaxRetriesExceeded(max_retries + 1))
}

async fn check_status(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    Err(error_for_status(status, url, &body))
}

/// Map a non-success response onto a [`ClientError`].
pub(crate) fn error_for_status(status: StatusCode, url: String, body: &str) -> ClientError {
    let (message, code) = match serde_json::from_str::<TrpcErrorEnvelope>(body) {
        Ok(envelope) => (
            envelope.error.message,
            envelope.error.data.and_then(|d| d.code),
        ),
        Err(_) => (body.to_string(), None),
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized(message),
        StatusCode::BAD_REQUEST if code.as_deref() == Some(BAD_REQUEST_CODE) => {
            ClientError::Validation(message)
        }
        StatusCode::NOT_FOUND => ClientError::NotFound(url),
        _ => ClientError::Api {
            status: status.as_u16(),
            url,
            message,
            code,
        },
    }
}

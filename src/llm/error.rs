//! Typed errors for completion calls
//!
//! Structured variants let callers distinguish failure modes (auth, quota,
//! transport) without string matching. This crate never retries; the
//! classification is informational and drives the message the user sees.

use thiserror::Error;

/// A completion call failed
///
/// Every variant is fatal to the current pipeline run: the runner aborts,
/// no later stage is attempted, and the error propagates to the caller.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// API key rejected or expired (HTTP 401/403)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Quota or rate limit exceeded (HTTP 429)
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Malformed request (HTTP 400); a bug in the adapter or its inputs
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Server-side error (HTTP 5xx)
    #[error("service error: {0}")]
    ServiceError(String),

    /// Connection failure or transport-level timeout
    #[error("network error: {0}")]
    Network(String),

    /// Stage deadline exceeded before the provider answered
    #[error("no response within {0} seconds")]
    Timeout(u64),

    /// Response arrived but did not contain usable generated text
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl CompletionError {
    /// Whether a fresh attempt could plausibly succeed (after a delay or a
    /// credential fix). The pipeline itself never acts on this.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CompletionError::RateLimited(_)
                | CompletionError::ServiceError(_)
                | CompletionError::Network(_)
                | CompletionError::Timeout(_)
        )
    }

    /// Convert an HTTP status code and error body into a typed error
    pub fn from_http_status(status: reqwest::StatusCode, error_text: String) -> Self {
        match status.as_u16() {
            401 | 403 => CompletionError::Unauthorized(error_text),
            429 => CompletionError::RateLimited(error_text),
            400 => CompletionError::BadRequest(error_text),
            500..=599 => CompletionError::ServiceError(error_text),
            _ => CompletionError::ServiceError(format!("HTTP {}: {}", status, error_text)),
        }
    }

    /// Convert reqwest transport errors into a typed error
    pub fn from_network_error(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            CompletionError::Network(format!("request timeout: {}", e))
        } else if e.is_connect() {
            CompletionError::Network(format!("connection failed: {}", e))
        } else if let Some(status) = e.status() {
            Self::from_http_status(status, e.to_string())
        } else {
            CompletionError::Network(e.to_string())
        }
    }
}

//! Fetch error types.

use thiserror::Error;

/// Error type for transport and session operations.
///
/// Remote failures keep their structure (HTTP status, remote `Code` and
/// `Message`) so callers can branch on kind instead of parsing text.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The underlying HTTP transport failed (network, TLS, timeout).
    /// Propagated as-is and never retried.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The method string could not be turned into an HTTP method.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// The service answered with a non-2xx status and a parseable error
    /// body carrying its own `Code` and `Message`.
    #[error("Request failed: {status} - Code: {code}, Message: {message}")]
    RemoteStatus {
        /// HTTP status code of the response.
        status: u16,
        /// Remote error code from the response body.
        code: i64,
        /// Remote error message from the response body.
        message: String,
    },

    /// The service answered with a non-2xx status and a body that is not
    /// JSON (or lacks the error envelope).
    #[error("Request failed: {status} - {body}")]
    RemoteStatusRaw {
        /// HTTP status code of the response.
        status: u16,
        /// Raw response body text.
        body: String,
    },

    /// A 2xx response carried a body that could not be parsed as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

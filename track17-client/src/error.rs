//! Workflow error types.

use thiserror::Error;
use track17_fetch::FetchError;

/// Error type for the workflow operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport or session failure underneath the workflow.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// HTTP succeeded but the service rejected the operation with a
    /// non-zero `Code` in its envelope.
    #[error("Non-zero status code in response: {code}")]
    Rejected {
        /// The service's error code.
        code: i64,
    },

    /// No package with this tracking number exists in the current list.
    #[error("Package not found by tracking number: {0}")]
    InvalidTrackingNumber(String),

    /// The package was found but the service never reported an internal
    /// id for it, so id-addressed operations cannot proceed.
    #[error("Package id is missing for tracking number: {0}")]
    MissingInternalId(String),

    /// A 2xx payload did not match the expected wire shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

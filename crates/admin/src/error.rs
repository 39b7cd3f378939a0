//! Unified error handling for the admin engine.

use thiserror::Error;

/// Errors from catalog management operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// A draft failed validation; blocked before any network call.
    #[error("{0}")]
    Validation(String),

    /// The backend refused the credential (401/403). The client's own role
    /// hint is irrelevant; this answer is authoritative.
    #[error("permission denied by the backend")]
    PermissionDenied,

    /// The product does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request could not be sent or the response body not read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Backend {
        /// HTTP status code.
        status: u16,
        /// Backend-provided message, or a generic one.
        message: String,
    },

    /// The response body was not the JSON shape we expect.
    #[error("failed to parse backend response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type alias for `AdminError`.
pub type Result<T> = std::result::Result<T, AdminError>;

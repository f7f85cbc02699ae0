//! Control-plane error types

use thiserror::Error;

/// Errors returned by a [`ControlPlane`](crate::ControlPlane) call
#[derive(Error, Debug)]
pub enum CloudError {
    /// Token rejected or lacks the permission for this call
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Resource already exists: {0}")]
    ResourceAlreadyExists(String),

    #[error("Rate limited by the control plane: {0}")]
    RateLimited(String),

    /// The control plane answered but refused the request
    #[error("API error: {0}")]
    ApiError(String),

    /// Transport failure; the request may or may not have been applied
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CloudError>;

// Central Error Type for the Application

use crate::port::{AuthError, ClientError};
use thiserror::Error;

/// Application-level error type
///
/// Remote failures are split by the operation that raised them so callers can
/// tell a failed fetch (nothing to show) from a failed patch (display is stale).
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Authentication failed: {0}")]
    Authentication(#[from] AuthError),

    #[error("Fetch failed: {0}")]
    Fetch(#[source] ClientError),

    #[error("Patch failed: {0}")]
    Patch(#[source] ClientError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

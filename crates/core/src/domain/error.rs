// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid session transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Duplicate media type in whitelist: {0}")]
    DuplicateMediaType(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;

//! Platform adapter error types

use queue_toggle_core::port::ClientError;
use reqwest::StatusCode;
use thiserror::Error;

use crate::types::ErrorBody;

/// Result type for adapter construction
pub type Result<T> = std::result::Result<T, PlatformError>;

/// Errors raised while setting up an adapter (not during remote calls)
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}

impl From<url::ParseError> for PlatformError {
    fn from(e: url::ParseError) -> Self {
        PlatformError::InvalidUrl(e.to_string())
    }
}

/// Map a reqwest failure to the port's error type
pub(crate) fn from_reqwest(e: reqwest::Error) -> ClientError {
    if e.is_decode() {
        ClientError::Decode(e.to_string())
    } else {
        ClientError::Transport(e.to_string())
    }
}

/// Map a non-success status (and its body, if any) to the port's error type
pub(crate) fn from_status(status: StatusCode, body: &str) -> ClientError {
    if status == StatusCode::UNAUTHORIZED {
        return ClientError::Unauthorized;
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        });

    ClientError::Status {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_maps_to_unauthorized() {
        assert_eq!(
            from_status(StatusCode::UNAUTHORIZED, ""),
            ClientError::Unauthorized
        );
    }

    #[test]
    fn test_status_uses_platform_message() {
        let body = r#"{"message":"Queue not found","code":"not.found","status":404}"#;
        assert_eq!(
            from_status(StatusCode::NOT_FOUND, body),
            ClientError::Status {
                status: 404,
                message: "Queue not found".to_string()
            }
        );
    }

    #[test]
    fn test_status_falls_back_to_reason() {
        assert_eq!(
            from_status(StatusCode::BAD_GATEWAY, "<html>"),
            ClientError::Status {
                status: 502,
                message: "Bad Gateway".to_string()
            }
        );
    }
}

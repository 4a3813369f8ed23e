// Authenticator Port (Interface)

use crate::domain::AccessToken;
use async_trait::async_trait;
use thiserror::Error;

/// Authentication errors (startup halts on any of these)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Login denied: {0}")]
    Denied(String),

    #[error("Login state mismatch (possible forged redirect)")]
    StateMismatch,

    #[error("No access token in login response")]
    MissingToken,

    #[error("Invalid login callback: {0}")]
    InvalidCallback(String),

    #[error("Access token expired")]
    Expired,

    #[error("Login aborted: {0}")]
    Aborted(String),
}

/// Obtains an authenticated session for the platform
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self) -> Result<AccessToken, AuthError>;
}

pub mod mocks {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a fixed outcome and counts attempts
    pub struct MockAuthenticator {
        outcome: Result<AccessToken, AuthError>,
        attempts: AtomicUsize,
    }

    impl MockAuthenticator {
        pub fn granting(secret: impl Into<String>) -> Self {
            Self {
                outcome: Ok(AccessToken::new(secret, None)),
                attempts: AtomicUsize::new(0),
            }
        }

        pub fn failing(err: AuthError) -> Self {
            Self {
                outcome: Err(err),
                attempts: AtomicUsize::new(0),
            }
        }

        pub fn attempts(&self) -> usize {
            self.attempts.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Authenticator for MockAuthenticator {
        async fn authenticate(&self) -> Result<AccessToken, AuthError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }
}

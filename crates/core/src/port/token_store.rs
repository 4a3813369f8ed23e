// Token Store Port (Interface)
// Keeps the login between launches

use crate::domain::AccessToken;
use crate::error::Result;
use async_trait::async_trait;

/// Persistence for the access token of the last successful login
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Stored token, `None` when nothing was saved
    async fn load(&self) -> Result<Option<AccessToken>>;

    /// Replace the stored token
    async fn save(&self, token: &AccessToken) -> Result<()>;

    /// Forget the stored token (no-op when nothing is stored)
    async fn clear(&self) -> Result<()>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// In-memory token store
    #[derive(Default)]
    pub struct MockTokenStore {
        token: Mutex<Option<AccessToken>>,
    }

    impl MockTokenStore {
        pub fn empty() -> Self {
            Self::default()
        }

        pub fn holding(token: AccessToken) -> Self {
            Self {
                token: Mutex::new(Some(token)),
            }
        }

        pub fn current(&self) -> Option<AccessToken> {
            self.token.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TokenStore for MockTokenStore {
        async fn load(&self) -> Result<Option<AccessToken>> {
            Ok(self.current())
        }

        async fn save(&self, token: &AccessToken) -> Result<()> {
            *self.token.lock().unwrap() = Some(token.clone());
            Ok(())
        }

        async fn clear(&self) -> Result<()> {
            *self.token.lock().unwrap() = None;
            Ok(())
        }
    }
}

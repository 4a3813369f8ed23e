//! File-backed login persistence
//!
//! The token is written as JSON next to the API base URL it was issued for,
//! so switching environments never replays a token against the wrong region.

use crate::environment::PlatformEnvironment;
use async_trait::async_trait;
use queue_toggle_core::domain::AccessToken;
use queue_toggle_core::port::TokenStore;
use queue_toggle_core::Result;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// On-disk shape of the stored login
#[derive(Debug, Serialize, Deserialize)]
struct StoredLogin {
    api_base: String,
    access_token: String,
    expires_at: Option<i64>,
}

/// Stores the access token in a JSON file
pub struct FileTokenStore {
    path: PathBuf,
    api_base: String,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>, env: &PlatformEnvironment) -> Self {
        Self {
            path: path.into(),
            api_base: env.api_base().to_string(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<AccessToken>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let stored: StoredLogin = serde_json::from_slice(&bytes)?;

        if stored.api_base != self.api_base {
            debug!(
                stored = %stored.api_base,
                current = %self.api_base,
                "Stored login belongs to another environment"
            );
            return Ok(None);
        }
        Ok(Some(AccessToken::new(stored.access_token, stored.expires_at)))
    }

    async fn save(&self, token: &AccessToken) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        let stored = StoredLogin {
            api_base: self.api_base.clone(),
            access_token: token.secret().to_string(),
            expires_at: token.expires_at,
        };
        let json = serde_json::to_vec_pretty(&stored)?;
        tokio::fs::write(&self.path, json).await?;
        restrict_to_owner(&self.path).await?;

        debug!(path = %self.path.display(), "Login stored");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(unix)]
async fn restrict_to_owner(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await
}

#[cfg(not(unix))]
async fn restrict_to_owner(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

//! Login redirect prompt for the implicit grant

use async_trait::async_trait;
use queue_toggle_core::port::AuthError;
use queue_toggle_infra_platform::RedirectReceiver;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use url::Url;

/// Asks the agent to open the login page and paste the redirect URL back
pub struct StdinRedirectReceiver;

#[async_trait]
impl RedirectReceiver for StdinRedirectReceiver {
    async fn receive(&self, authorize_url: &Url) -> Result<String, AuthError> {
        let mut stderr = tokio::io::stderr();
        let message = format!(
            "Open this URL in a browser and log in:\n\n  {}\n\nThen paste the URL you were redirected to:\n> ",
            authorize_url
        );
        stderr
            .write_all(message.as_bytes())
            .await
            .map_err(|e| AuthError::Aborted(e.to_string()))?;
        stderr
            .flush()
            .await
            .map_err(|e| AuthError::Aborted(e.to_string()))?;

        let mut line = String::new();
        let read = BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await
            .map_err(|e| AuthError::Aborted(e.to_string()))?;
        if read == 0 || line.trim().is_empty() {
            return Err(AuthError::Aborted("no redirect URL entered".to_string()));
        }
        Ok(line.trim().to_string())
    }
}

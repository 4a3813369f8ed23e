//! Authentication adapters
//!
//! The implicit grant sends the agent to the platform's login page; the
//! platform redirects back with the token in the URL fragment. How the
//! redirect reaches us is up to the front-end, see [`RedirectReceiver`].

use crate::environment::PlatformEnvironment;
use async_trait::async_trait;
use queue_toggle_core::domain::AccessToken;
use queue_toggle_core::port::{AuthError, Authenticator, IdProvider, TimeProvider};
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// OAuth client registered for the widget
pub const DEFAULT_CLIENT_ID: &str = "55b4d776-4dfa-4023-af31-2458954f910b";

/// Delivers the redirect URL (or its fragment) after the agent logged in
#[async_trait]
pub trait RedirectReceiver: Send + Sync {
    async fn receive(&self, authorize_url: &Url) -> Result<String, AuthError>;
}

/// OAuth implicit-grant login
pub struct ImplicitGrantAuthenticator {
    login_base: Url,
    client_id: String,
    redirect_uri: String,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
    receiver: Arc<dyn RedirectReceiver>,
}

impl ImplicitGrantAuthenticator {
    pub fn new(
        env: &PlatformEnvironment,
        client_id: impl Into<String>,
        redirect_uri: impl Into<String>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
        receiver: Arc<dyn RedirectReceiver>,
    ) -> Self {
        Self {
            login_base: env.login_base().clone(),
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
            id_provider,
            time_provider,
            receiver,
        }
    }

    /// Login page URL carrying `state` as the anti-forgery nonce
    pub fn authorize_url(&self, state: &str) -> Result<Url, AuthError> {
        let mut url = self
            .login_base
            .join("oauth/authorize")
            .map_err(|e| AuthError::InvalidCallback(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("response_type", "token")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("state", state);
        Ok(url)
    }
}

#[async_trait]
impl Authenticator for ImplicitGrantAuthenticator {
    async fn authenticate(&self) -> Result<AccessToken, AuthError> {
        let state = self.id_provider.generate_id();
        let url = self.authorize_url(&state)?;
        debug!(client_id = %self.client_id, "Starting implicit grant login");

        let callback = self.receiver.receive(&url).await?;
        let token = parse_redirect(&callback, &state, self.time_provider.now_millis())?;

        info!(expires_at = ?token.expires_at, "Login completed");
        Ok(token)
    }
}

/// Extract the access token from an implicit-grant redirect.
///
/// Accepts the full redirect URL or just its fragment
/// (`access_token=...&expires_in=...&state=...`). An `error` parameter is
/// reported as [`AuthError::Denied`].
pub fn parse_redirect(
    callback: &str,
    expected_state: &str,
    now_millis: i64,
) -> Result<AccessToken, AuthError> {
    let callback = callback.trim();
    let fragment = if callback.contains("://") {
        let url = Url::parse(callback).map_err(|e| AuthError::InvalidCallback(e.to_string()))?;
        url.fragment()
            .or_else(|| url.query())
            .unwrap_or_default()
            .to_string()
    } else {
        callback.trim_start_matches('#').to_string()
    };

    let mut access_token = None;
    let mut expires_in = None;
    let mut token_type = None;
    let mut state = None;
    let mut error = None;
    let mut error_description = None;

    for (key, value) in url::form_urlencoded::parse(fragment.as_bytes()) {
        let value = value.into_owned();
        match key.as_ref() {
            "access_token" => access_token = Some(value),
            "expires_in" => expires_in = Some(value),
            "token_type" => token_type = Some(value),
            "state" => state = Some(value),
            "error" => error = Some(value),
            "error_description" => error_description = Some(value),
            _ => {}
        }
    }

    if let Some(error) = error {
        return Err(AuthError::Denied(error_description.unwrap_or(error)));
    }
    if state.as_deref() != Some(expected_state) {
        return Err(AuthError::StateMismatch);
    }
    if let Some(token_type) = token_type {
        if !token_type.eq_ignore_ascii_case("bearer") {
            return Err(AuthError::InvalidCallback(format!(
                "unsupported token type {}",
                token_type
            )));
        }
    }

    let secret = access_token
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingToken)?;
    let expires_at = match expires_in {
        Some(raw) => {
            let bad = || AuthError::InvalidCallback(format!("bad expires_in {}", raw));
            let secs: i64 = raw.parse().map_err(|_| bad())?;
            if secs < 0 {
                return Err(bad());
            }
            let expires_at = secs
                .checked_mul(1000)
                .and_then(|ms| now_millis.checked_add(ms))
                .ok_or_else(bad)?;
            Some(expires_at)
        }
        None => None,
    };

    Ok(AccessToken::new(secret, expires_at))
}

/// Uses a token obtained outside this tool
pub struct StaticTokenAuthenticator {
    token: AccessToken,
}

impl StaticTokenAuthenticator {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(secret, None),
        }
    }
}

#[async_trait]
impl Authenticator for StaticTokenAuthenticator {
    async fn authenticate(&self) -> Result<AccessToken, AuthError> {
        if self.token.secret().trim().is_empty() {
            return Err(AuthError::MissingToken);
        }
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use queue_toggle_core::port::id_provider::FixedIdProvider;
    use queue_toggle_core::port::time_provider::FixedTimeProvider;
    use std::sync::Mutex;

    struct CannedRedirect {
        callback: String,
        seen: Mutex<Option<Url>>,
    }

    #[async_trait]
    impl RedirectReceiver for CannedRedirect {
        async fn receive(&self, authorize_url: &Url) -> Result<String, AuthError> {
            *self.seen.lock().unwrap() = Some(authorize_url.clone());
            Ok(self.callback.clone())
        }
    }

    fn authenticator(callback: &str) -> (ImplicitGrantAuthenticator, Arc<CannedRedirect>) {
        let env = PlatformEnvironment::from_host("mypurecloud.de").unwrap();
        let receiver = Arc::new(CannedRedirect {
            callback: callback.to_string(),
            seen: Mutex::new(None),
        });
        let auth = ImplicitGrantAuthenticator::new(
            &env,
            DEFAULT_CLIENT_ID,
            "http://localhost:8080/",
            Arc::new(FixedIdProvider("nonce-1".to_string())),
            Arc::new(FixedTimeProvider(10_000)),
            receiver.clone(),
        );
        (auth, receiver)
    }

    #[test]
    fn test_authorize_url() {
        let (auth, _) = authenticator("");
        let url = auth.authorize_url("abc").unwrap();
        assert_eq!(url.host_str(), Some("login.mypurecloud.de"));
        assert_eq!(url.path(), "/oauth/authorize");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("response_type".into(), "token".into())));
        assert!(pairs.contains(&("client_id".into(), DEFAULT_CLIENT_ID.into())));
        assert!(pairs.contains(&("redirect_uri".into(), "http://localhost:8080/".into())));
        assert!(pairs.contains(&("state".into(), "abc".into())));
    }

    #[tokio::test]
    async fn test_authenticate_round_trip() {
        let (auth, receiver) = authenticator(
            "http://localhost:8080/#access_token=tok&expires_in=60&token_type=bearer&state=nonce-1",
        );

        let token = auth.authenticate().await.unwrap();

        assert_eq!(token.secret(), "tok");
        assert_eq!(token.expires_at, Some(70_000));
        let seen = receiver.seen.lock().unwrap().clone().unwrap();
        assert!(seen.as_str().contains("state=nonce-1"));
    }

    #[test]
    fn test_parse_redirect_accepts_bare_fragment() {
        let token = parse_redirect("#access_token=abc&state=s", "s", 0).unwrap();
        assert_eq!(token.secret(), "abc");
        assert_eq!(token.expires_at, None);
    }

    #[test]
    fn test_parse_redirect_rejects_state_mismatch() {
        let err = parse_redirect("access_token=abc&state=other", "s", 0).unwrap_err();
        assert_eq!(err, AuthError::StateMismatch);

        let err = parse_redirect("access_token=abc", "s", 0).unwrap_err();
        assert_eq!(err, AuthError::StateMismatch);
    }

    #[test]
    fn test_parse_redirect_reports_denial() {
        let err = parse_redirect(
            "http://localhost/#error=access_denied&error_description=User+cancelled&state=s",
            "s",
            0,
        )
        .unwrap_err();
        assert_eq!(err, AuthError::Denied("User cancelled".to_string()));
    }

    #[test]
    fn test_parse_redirect_requires_token() {
        let err = parse_redirect("state=s&expires_in=10", "s", 0).unwrap_err();
        assert_eq!(err, AuthError::MissingToken);

        let err = parse_redirect("access_token=a&state=s&expires_in=soon", "s", 0).unwrap_err();
        assert!(matches!(err, AuthError::InvalidCallback(_)));
    }

    #[test]
    fn test_parse_redirect_rejects_out_of_range_lifetime() {
        let now = 1_700_000_000_000;
        for lifetime in ["9223372036854775", "9223372036854775807", "-60"] {
            let callback = format!("access_token=a&state=s&expires_in={}", lifetime);
            let err = parse_redirect(&callback, "s", now).unwrap_err();
            assert!(
                matches!(&err, AuthError::InvalidCallback(msg) if msg.contains("expires_in")),
                "{} -> {:?}",
                lifetime,
                err
            );
        }

        let token = parse_redirect("access_token=a&state=s&expires_in=86400", "s", now).unwrap();
        assert_eq!(token.expires_at, Some(now + 86_400_000));
    }

    #[test]
    fn test_static_token() {
        let token = tokio_test::block_on(StaticTokenAuthenticator::new("abc").authenticate());
        assert_eq!(token.unwrap().secret(), "abc");

        let err = tokio_test::block_on(StaticTokenAuthenticator::new("  ").authenticate());
        assert_eq!(err.unwrap_err(), AuthError::MissingToken);
    }
}

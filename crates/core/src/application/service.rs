// Queue Toggle Service - bootstrap, refresh and toggle use cases
//
// Each operation takes the session by value and returns it inside a
// `Transition`, whether the operation succeeded or not. Remote calls are
// awaited one after another; a patch is always followed (never preceded) by
// the re-fetch that updates the snapshot.

use super::media_filter::filter_relevant_media_types;
use super::toggle_delta::build_toggle_delta;
use crate::domain::{
    AccessToken, AgentId, AgentSession, MediaTypeWhitelist, Queue, SessionPhase,
};
use crate::error::{AppError, Result};
use crate::port::{
    AuthError, Authenticator, ClientError, PageRequest, QueueMembershipClient, TimeProvider,
    TokenStore,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Session after an operation, plus the operation's outcome
#[derive(Debug)]
pub struct Transition<T> {
    pub session: AgentSession,
    pub outcome: Result<T>,
}

impl<T> Transition<T> {
    /// Split into session and outcome
    pub fn into_parts(self) -> (AgentSession, Result<T>) {
        (self.session, self.outcome)
    }
}

/// What a toggle action did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleReport {
    pub media_type: String,
    pub desired_status: bool,
    /// Number of queues sent to the platform (0 = nothing matched, no call made)
    pub patched: usize,
}

/// Queue Toggle Service
pub struct QueueToggleService {
    authenticator: Arc<dyn Authenticator>,
    client: Arc<dyn QueueMembershipClient>,
    whitelist: MediaTypeWhitelist,
    time_provider: Arc<dyn TimeProvider>,
    token_store: Option<Arc<dyn TokenStore>>,
}

impl QueueToggleService {
    pub fn new(
        authenticator: Arc<dyn Authenticator>,
        client: Arc<dyn QueueMembershipClient>,
        whitelist: MediaTypeWhitelist,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            authenticator,
            client,
            whitelist,
            time_provider,
            token_store: None,
        }
    }

    /// Reuse the login of a previous run and remember new ones
    pub fn with_token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    pub fn whitelist(&self) -> &MediaTypeWhitelist {
        &self.whitelist
    }

    /// Authenticate, identify the agent and load the first queue page
    pub async fn bootstrap(&self, mut session: AgentSession) -> Transition<()> {
        let outcome = self.bootstrap_inner(&mut session).await;
        Transition { session, outcome }
    }

    /// Re-fetch the queue snapshot (session must be ready)
    pub async fn refresh(&self, mut session: AgentSession) -> Transition<()> {
        let outcome = self.refresh_inner(&mut session).await;
        Transition { session, outcome }
    }

    /// Set every queue of `media_type` to `desired_status`, then re-fetch
    pub async fn toggle(
        &self,
        mut session: AgentSession,
        media_type: &str,
        desired_status: bool,
    ) -> Transition<ToggleReport> {
        let outcome = self
            .toggle_inner(&mut session, media_type, desired_status)
            .await;
        Transition { session, outcome }
    }

    async fn bootstrap_inner(&self, session: &mut AgentSession) -> Result<()> {
        session.transition(SessionPhase::Authenticating)?;

        let (token, known_agent) = match self.resume_stored_login().await {
            Some((token, agent)) => (token, Some(agent)),
            None => match self.authenticator.authenticate().await {
                Ok(token) => {
                    self.remember_login(&token).await;
                    (token, None)
                }
                Err(e) => {
                    error!(error = %e, "Authentication failed");
                    session.transition(SessionPhase::AuthenticationFailed)?;
                    return Err(AppError::Authentication(e));
                }
            },
        };
        session.token = Some(token.clone());
        session.transition(SessionPhase::LoadingQueues)?;

        let loaded = self.load_agent_and_queues(&token, known_agent).await;
        let (agent, queues) = match loaded {
            Ok(loaded) => loaded,
            Err(e) => {
                error!(error = %e, "Failed to load agent queues");
                session.transition(SessionPhase::NotReady)?;
                return Err(AppError::Fetch(e));
            }
        };

        info!(agent_id = %agent, queue_count = queues.len(), "Agent queues loaded");
        session.agent = Some(agent);
        self.apply_snapshot(session, queues);
        session.transition(SessionPhase::Ready)?;
        Ok(())
    }

    /// Stored token the platform still accepts, with the agent it belongs to.
    ///
    /// Expired or rejected (401) tokens are removed from the store.
    async fn resume_stored_login(&self) -> Option<(AccessToken, AgentId)> {
        let store = self.token_store.as_ref()?;
        let token = match store.load().await {
            Ok(Some(token)) => token,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable stored login");
                return None;
            }
        };

        if token.is_expired(self.time_provider.now_millis()) {
            debug!(expires_at = ?token.expires_at, "Stored login expired");
            self.forget_login(store.as_ref()).await;
            return None;
        }

        match self.client.fetch_current_user(&token).await {
            Ok(agent) => {
                info!(agent_id = %agent, "Resumed stored login");
                Some((token, agent))
            }
            Err(ClientError::Unauthorized) => {
                info!("Stored login rejected by platform, logging in again");
                self.forget_login(store.as_ref()).await;
                None
            }
            Err(e) => {
                warn!(error = %e, "Could not verify stored login");
                None
            }
        }
    }

    async fn remember_login(&self, token: &AccessToken) {
        if let Some(store) = &self.token_store {
            if let Err(e) = store.save(token).await {
                warn!(error = %e, "Failed to store login");
            }
        }
    }

    async fn forget_login(&self, store: &dyn TokenStore) {
        if let Err(e) = store.clear().await {
            warn!(error = %e, "Failed to remove stored login");
        }
    }

    async fn load_agent_and_queues(
        &self,
        token: &AccessToken,
        known_agent: Option<AgentId>,
    ) -> std::result::Result<(AgentId, Vec<Queue>), ClientError> {
        let agent = match known_agent {
            Some(agent) => agent,
            None => self.client.fetch_current_user(token).await?,
        };
        let queues = self
            .client
            .fetch_queues(token, &agent, PageRequest::first())
            .await?;
        Ok((agent, queues))
    }

    async fn refresh_inner(&self, session: &mut AgentSession) -> Result<()> {
        let (token, agent) = self.credentials(session)?;

        match self
            .client
            .fetch_queues(&token, &agent, PageRequest::first())
            .await
        {
            Ok(queues) => {
                info!(agent_id = %agent, queue_count = queues.len(), "Queue snapshot refreshed");
                self.apply_snapshot(session, queues);
                Ok(())
            }
            Err(e) => {
                warn!(agent_id = %agent, error = %e, "Refresh failed, keeping previous snapshot");
                Err(AppError::Fetch(e))
            }
        }
    }

    async fn toggle_inner(
        &self,
        session: &mut AgentSession,
        media_type: &str,
        desired_status: bool,
    ) -> Result<ToggleReport> {
        let (token, agent) = self.credentials(session)?;
        let media_type = self
            .whitelist
            .resolve(media_type)
            .map_err(|e| AppError::Validation(e.to_string()))?
            .to_string();

        info!(
            media_type = %media_type,
            desired_status,
            "Updating queues to new status"
        );

        let deltas = build_toggle_delta(&session.queues, &media_type, desired_status);
        let mut report = ToggleReport {
            media_type,
            desired_status,
            patched: 0,
        };
        if deltas.is_empty() {
            info!(media_type = %report.media_type, "No queues match media type, nothing to patch");
            return Ok(report);
        }

        session.transition(SessionPhase::Patching)?;

        if let Err(e) = self.client.patch_queues(&token, &agent, &deltas).await {
            error!(
                media_type = %report.media_type,
                queue_count = deltas.len(),
                error = %e,
                "Queue patch failed, display left unchanged"
            );
            session.transition(SessionPhase::Ready)?;
            return Err(AppError::Patch(e));
        }
        report.patched = deltas.len();

        let refetched = self
            .client
            .fetch_queues(&token, &agent, PageRequest::first())
            .await;
        session.transition(SessionPhase::Ready)?;

        match refetched {
            Ok(queues) => {
                info!(
                    media_type = %report.media_type,
                    patched = report.patched,
                    "Queue membership updated"
                );
                self.apply_snapshot(session, queues);
                Ok(report)
            }
            Err(e) => {
                warn!(
                    media_type = %report.media_type,
                    error = %e,
                    "Patch applied but re-fetch failed, display is stale"
                );
                Err(AppError::Fetch(e))
            }
        }
    }

    /// Token and agent of a ready session, rejecting expired tokens
    fn credentials(&self, session: &AgentSession) -> Result<(AccessToken, AgentId)> {
        if !session.is_ready() {
            return Err(AppError::InvalidState(format!(
                "session is {}, expected READY",
                session.phase
            )));
        }
        let (Some(token), Some(agent)) = (&session.token, &session.agent) else {
            return Err(AppError::InvalidState(
                "ready session without credentials".to_string(),
            ));
        };
        if token.is_expired(self.time_provider.now_millis()) {
            return Err(AppError::Authentication(AuthError::Expired));
        }
        Ok((token.clone(), agent.clone()))
    }

    fn apply_snapshot(&self, session: &mut AgentSession, queues: Vec<Queue>) {
        let rows = filter_relevant_media_types(&queues, &self.whitelist);
        session.replace_snapshot(queues, rows);
    }
}

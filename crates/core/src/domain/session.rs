// Agent Session - explicit application state
//
// Replaces process-wide globals: every service operation takes the session
// by value and hands back the next one.

use super::error::{DomainError, Result};
use super::media_type::RelevantMediaTypeRow;
use super::queue::{AgentId, Queue};
use serde::{Deserialize, Serialize};

/// Bearer token obtained from the authentication collaborator
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    secret: String,
    /// Expiry in epoch ms, when the platform reported a lifetime
    pub expires_at: Option<i64>,
}

impl AccessToken {
    pub fn new(secret: impl Into<String>, expires_at: Option<i64>) -> Self {
        Self {
            secret: secret.into(),
            expires_at,
        }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// True once `now_millis` has passed the reported expiry
    pub fn is_expired(&self, now_millis: i64) -> bool {
        self.expires_at.is_some_and(|at| now_millis >= at)
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Session lifecycle
///
/// ```text
/// Idle -> Authenticating -> LoadingQueues -> Ready <-> Patching
///              |                  |
///              v                  v
///    AuthenticationFailed      NotReady
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionPhase {
    Idle,
    Authenticating,
    AuthenticationFailed,
    LoadingQueues,
    NotReady,
    Ready,
    Patching,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionPhase::Idle => write!(f, "IDLE"),
            SessionPhase::Authenticating => write!(f, "AUTHENTICATING"),
            SessionPhase::AuthenticationFailed => write!(f, "AUTHENTICATION_FAILED"),
            SessionPhase::LoadingQueues => write!(f, "LOADING_QUEUES"),
            SessionPhase::NotReady => write!(f, "NOT_READY"),
            SessionPhase::Ready => write!(f, "READY"),
            SessionPhase::Patching => write!(f, "PATCHING"),
        }
    }
}

impl SessionPhase {
    /// Whether `self -> next` is an allowed transition
    pub fn can_transition_to(self, next: SessionPhase) -> bool {
        use SessionPhase::*;
        matches!(
            (self, next),
            (Idle, Authenticating)
                | (Authenticating, AuthenticationFailed)
                | (Authenticating, LoadingQueues)
                | (LoadingQueues, Ready)
                | (LoadingQueues, NotReady)
                | (Ready, Patching)
                | (Patching, Ready)
        )
    }

    /// Terminal phases never leave without a fresh session
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionPhase::AuthenticationFailed | SessionPhase::NotReady
        )
    }
}

/// Snapshot of everything the presentation layer renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSession {
    pub phase: SessionPhase,
    pub token: Option<AccessToken>,
    pub agent: Option<AgentId>,
    /// Last queue list acknowledged by the platform (replaced wholesale)
    pub queues: Vec<Queue>,
    /// Derived from `queues`; recomputed whenever the snapshot changes
    pub rows: Vec<RelevantMediaTypeRow>,
}

impl Default for AgentSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentSession {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Idle,
            token: None,
            agent: None,
            queues: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Move to `next`, rejecting transitions the lifecycle does not allow
    pub fn transition(&mut self, next: SessionPhase) -> Result<()> {
        if !self.phase.can_transition_to(next) {
            return Err(DomainError::InvalidStateTransition {
                from: self.phase.to_string(),
                to: next.to_string(),
            });
        }
        self.phase = next;
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.phase == SessionPhase::Ready
    }

    /// Replace the queue snapshot together with its derived rows
    pub fn replace_snapshot(&mut self, queues: Vec<Queue>, rows: Vec<RelevantMediaTypeRow>) {
        self.queues = queues;
        self.rows = rows;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        let mut session = AgentSession::new();
        assert_eq!(session.phase, SessionPhase::Idle);

        session.transition(SessionPhase::Authenticating).unwrap();
        session.transition(SessionPhase::LoadingQueues).unwrap();
        session.transition(SessionPhase::Ready).unwrap();
        session.transition(SessionPhase::Patching).unwrap();
        session.transition(SessionPhase::Ready).unwrap();
        assert!(session.is_ready());
    }

    #[test]
    fn test_terminal_phases_reject_transitions() {
        let mut session = AgentSession::new();
        session.transition(SessionPhase::Authenticating).unwrap();
        session
            .transition(SessionPhase::AuthenticationFailed)
            .unwrap();
        assert!(session.phase.is_terminal());

        let err = session.transition(SessionPhase::LoadingQueues).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidStateTransition {
                from: "AUTHENTICATION_FAILED".to_string(),
                to: "LOADING_QUEUES".to_string(),
            }
        );
    }

    #[test]
    fn test_patching_requires_ready() {
        let mut session = AgentSession::new();
        assert!(session.transition(SessionPhase::Patching).is_err());
        assert_eq!(session.phase, SessionPhase::Idle);
    }

    #[test]
    fn test_token_expiry_and_redaction() {
        let token = AccessToken::new("s3cret", Some(5_000));
        assert!(!token.is_expired(4_999));
        assert!(token.is_expired(5_000));
        assert!(!AccessToken::new("x", None).is_expired(i64::MAX));

        let debug = format!("{:?}", token);
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("redacted"));
    }
}

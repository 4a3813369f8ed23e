// Queue Membership Client Port (Interface)
// Remote platform calls: current user, assigned queues, membership patch

use crate::domain::{AccessToken, AgentId, Queue, ToggleDelta};
use async_trait::async_trait;
use thiserror::Error;

/// Fixed page size for queue fetches (multi-page aggregation is not done)
pub const QUEUE_PAGE_SIZE: u32 = 100;

/// Page selector for queue fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_number: u32,
    pub page_size: u32,
}

impl PageRequest {
    /// First page with the fixed page size.
    ///
    /// Agents assigned to more than `QUEUE_PAGE_SIZE` queues only see the
    /// first page.
    pub fn first() -> Self {
        Self {
            page_number: 1,
            page_size: QUEUE_PAGE_SIZE,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// Remote call errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Unauthorized: token rejected by platform")]
    Unauthorized,

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

/// Queue membership client
///
/// Implementations:
/// - PlatformClient (infra-platform): REST API over HTTPS
/// - mocks::MockMembershipClient: in-memory, for tests
#[async_trait]
pub trait QueueMembershipClient: Send + Sync {
    /// Identify the authenticated agent
    async fn fetch_current_user(&self, token: &AccessToken) -> Result<AgentId, ClientError>;

    /// Fetch one page of the agent's queues, in platform order
    async fn fetch_queues(
        &self,
        token: &AccessToken,
        agent: &AgentId,
        page: PageRequest,
    ) -> Result<Vec<Queue>, ClientError>;

    /// Apply membership changes (overall success or failure only)
    async fn patch_queues(
        &self,
        token: &AccessToken,
        agent: &AgentId,
        deltas: &[ToggleDelta],
    ) -> Result<(), ClientError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// Recorded remote call, in invocation order
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum RecordedCall {
        FetchCurrentUser,
        FetchQueues { agent: AgentId, page: PageRequest },
        PatchQueues { agent: AgentId, deltas: Vec<ToggleDelta> },
    }

    #[derive(Default)]
    struct MockState {
        queues: Vec<Queue>,
        calls: Vec<RecordedCall>,
        fail_user: Option<ClientError>,
        fail_fetch: Option<ClientError>,
        fail_patch: Option<ClientError>,
        rejected_tokens: Vec<String>,
    }

    /// In-memory platform: patches are applied to the stored queue list so a
    /// subsequent fetch observes them.
    pub struct MockMembershipClient {
        agent: AgentId,
        state: Mutex<MockState>,
    }

    impl MockMembershipClient {
        pub fn new(agent: impl Into<String>, queues: Vec<Queue>) -> Self {
            Self {
                agent: agent.into(),
                state: Mutex::new(MockState {
                    queues,
                    ..Default::default()
                }),
            }
        }

        pub fn fail_current_user(&self, err: ClientError) {
            self.state.lock().unwrap().fail_user = Some(err);
        }

        /// Answer `Unauthorized` to any call made with this token
        pub fn reject_token(&self, secret: impl Into<String>) {
            self.state.lock().unwrap().rejected_tokens.push(secret.into());
        }

        pub fn fail_fetch(&self, err: Option<ClientError>) {
            self.state.lock().unwrap().fail_fetch = err;
        }

        pub fn fail_patch(&self, err: Option<ClientError>) {
            self.state.lock().unwrap().fail_patch = err;
        }

        pub fn set_queues(&self, queues: Vec<Queue>) {
            self.state.lock().unwrap().queues = queues;
        }

        pub fn queues(&self) -> Vec<Queue> {
            self.state.lock().unwrap().queues.clone()
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.state.lock().unwrap().calls.clone()
        }
    }

    #[async_trait]
    impl QueueMembershipClient for MockMembershipClient {
        async fn fetch_current_user(&self, token: &AccessToken) -> Result<AgentId, ClientError> {
            let mut state = self.state.lock().unwrap();
            state.calls.push(RecordedCall::FetchCurrentUser);
            if state.rejected_tokens.iter().any(|t| t == token.secret()) {
                return Err(ClientError::Unauthorized);
            }
            match &state.fail_user {
                Some(err) => Err(err.clone()),
                None => Ok(self.agent.clone()),
            }
        }

        async fn fetch_queues(
            &self,
            token: &AccessToken,
            agent: &AgentId,
            page: PageRequest,
        ) -> Result<Vec<Queue>, ClientError> {
            let mut state = self.state.lock().unwrap();
            state.calls.push(RecordedCall::FetchQueues {
                agent: agent.clone(),
                page,
            });
            if state.rejected_tokens.iter().any(|t| t == token.secret()) {
                return Err(ClientError::Unauthorized);
            }
            if let Some(err) = &state.fail_fetch {
                return Err(err.clone());
            }
            let skip = (page.page_number.saturating_sub(1) * page.page_size) as usize;
            Ok(state
                .queues
                .iter()
                .skip(skip)
                .take(page.page_size as usize)
                .cloned()
                .collect())
        }

        async fn patch_queues(
            &self,
            _token: &AccessToken,
            agent: &AgentId,
            deltas: &[ToggleDelta],
        ) -> Result<(), ClientError> {
            let mut state = self.state.lock().unwrap();
            state.calls.push(RecordedCall::PatchQueues {
                agent: agent.clone(),
                deltas: deltas.to_vec(),
            });
            if let Some(err) = &state.fail_patch {
                return Err(err.clone());
            }
            for delta in deltas {
                if let Some(queue) = state.queues.iter_mut().find(|q| q.id == delta.queue_id) {
                    queue.joined = delta.desired_status;
                }
            }
            Ok(())
        }
    }
}

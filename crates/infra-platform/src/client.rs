//! Platform REST client

use crate::environment::PlatformEnvironment;
use crate::error::{from_reqwest, from_status, PlatformError, Result};
use crate::types::{UserMe, UserQueueListing};
use async_trait::async_trait;
use queue_toggle_core::domain::{AccessToken, AgentId, Queue, ToggleDelta};
use queue_toggle_core::port::{ClientError, PageRequest, QueueMembershipClient};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Queue membership client for the platform REST API
///
/// # Example
///
/// ```no_run
/// # use queue_toggle_infra_platform::{PlatformClient, PlatformEnvironment};
/// # use std::time::Duration;
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let env = PlatformEnvironment::from_host("mypurecloud.de")?;
/// let client = PlatformClient::new(&env, Duration::from_secs(30))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PlatformClient {
    http: reqwest::Client,
    api_base: Url,
}

impl PlatformClient {
    /// Build a client for `env`
    ///
    /// # Arguments
    ///
    /// * `env` - Platform environment (API base URL)
    /// * `timeout` - Per-request timeout; the only timeout applied to remote calls
    pub fn new(env: &PlatformEnvironment, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("queue-toggle/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PlatformError::Client(e.to_string()))?;

        Ok(Self {
            http,
            api_base: env.api_base().clone(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> std::result::Result<Url, ClientError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Transport("API base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(request: RequestBuilder) -> std::result::Result<Response, ClientError> {
        let response = request.send().await.map_err(from_reqwest)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(from_status(status, &body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> std::result::Result<T, ClientError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl QueueMembershipClient for PlatformClient {
    async fn fetch_current_user(&self, token: &AccessToken) -> std::result::Result<AgentId, ClientError> {
        let url = self.endpoint(&["api", "v2", "users", "me"])?;
        debug!(url = %url, "Fetching current user");

        let response = Self::send(self.http.get(url).bearer_auth(token.secret())).await?;
        let me: UserMe = Self::decode(response).await?;
        Ok(me.id)
    }

    async fn fetch_queues(
        &self,
        token: &AccessToken,
        agent: &AgentId,
        page: PageRequest,
    ) -> std::result::Result<Vec<Queue>, ClientError> {
        let url = self.endpoint(&["api", "v2", "users", agent.as_str(), "queues"])?;
        debug!(
            url = %url,
            page_number = page.page_number,
            page_size = page.page_size,
            "Fetching agent queues"
        );

        let request = self
            .http
            .get(url)
            .bearer_auth(token.secret())
            .query(&[("pageSize", page.page_size), ("pageNumber", page.page_number)]);
        let response = Self::send(request).await?;
        let listing: UserQueueListing = Self::decode(response).await?;

        if let Some(total) = listing.total {
            if total > listing.entities.len() as u64 {
                debug!(
                    total,
                    returned = listing.entities.len(),
                    "Agent has more queues than one page holds; extra pages are not fetched"
                );
            }
        }

        Ok(listing.entities.into_iter().map(Queue::from).collect())
    }

    async fn patch_queues(
        &self,
        token: &AccessToken,
        agent: &AgentId,
        deltas: &[ToggleDelta],
    ) -> std::result::Result<(), ClientError> {
        let url = self.endpoint(&["api", "v2", "users", agent.as_str(), "queues"])?;
        debug!(url = %url, queue_count = deltas.len(), "Patching agent queues");

        let request = self
            .http
            .patch(url)
            .bearer_auth(token.secret())
            .json(deltas);
        Self::send(request).await?;
        Ok(())
    }
}

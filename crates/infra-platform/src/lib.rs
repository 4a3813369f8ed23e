//! Queue Toggle Infrastructure - Platform Adapters
//!
//! Implements the core ports against the contact-center platform:
//! - [`PlatformClient`]: `QueueMembershipClient` over the REST API
//! - [`ImplicitGrantAuthenticator`]: browser login via the OAuth implicit grant
//! - [`StaticTokenAuthenticator`]: a token obtained elsewhere
//! - [`FileTokenStore`]: keeps the login between runs
//!
//! # Example
//!
//! ```no_run
//! use queue_toggle_infra_platform::{PlatformClient, PlatformEnvironment};
//! use queue_toggle_core::domain::AccessToken;
//! use queue_toggle_core::port::{PageRequest, QueueMembershipClient};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let env = PlatformEnvironment::from_host("mypurecloud.de")?;
//!     let client = PlatformClient::new(&env, Duration::from_secs(30))?;
//!     let token = AccessToken::new("...", None);
//!
//!     let agent = client.fetch_current_user(&token).await?;
//!     let queues = client.fetch_queues(&token, &agent, PageRequest::first()).await?;
//!     println!("{} queues", queues.len());
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod environment;
mod error;
mod token_store;
mod types;

pub use auth::{
    parse_redirect, ImplicitGrantAuthenticator, RedirectReceiver, StaticTokenAuthenticator,
    DEFAULT_CLIENT_ID,
};
pub use client::PlatformClient;
pub use environment::{PlatformEnvironment, DEFAULT_ENVIRONMENT};
pub use error::{PlatformError, Result};
pub use token_store::FileTokenStore;
pub use types::{ErrorBody, UserMe, UserQueueEntity, UserQueueListing};

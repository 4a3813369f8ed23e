// Port Layer - Interfaces for external dependencies

pub mod authenticator;
pub mod id_provider; // For deterministic testing
pub mod membership_client;
pub mod time_provider;
pub mod token_store;

// Re-exports
pub use authenticator::{AuthError, Authenticator};
pub use id_provider::IdProvider;
pub use membership_client::{ClientError, PageRequest, QueueMembershipClient, QUEUE_PAGE_SIZE};
pub use time_provider::TimeProvider;
pub use token_store::TokenStore;

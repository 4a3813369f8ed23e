// Domain Layer - Pure business logic and entities

pub mod error;
pub mod media_type;
pub mod naming;
pub mod queue;
pub mod session;

// Re-exports
pub use error::DomainError;
pub use media_type::{MediaTypeWhitelist, RelevantMediaTypeRow};
pub use naming::{parse_queue_name, QueueNameParts};
pub use queue::{AgentId, Queue, QueueId, ToggleDelta};
pub use session::{AccessToken, AgentSession, SessionPhase};

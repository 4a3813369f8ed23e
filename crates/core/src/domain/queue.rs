// Queue Domain Model

use serde::{Deserialize, Serialize};

/// Queue identifier (opaque, assigned by the platform)
pub type QueueId = String;

/// Agent (platform user) identifier
pub type AgentId = String;

/// A queue the agent is assigned to, as last reported by the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Queue {
    pub id: QueueId,
    pub name: String,
    pub joined: bool,
}

impl Queue {
    pub fn new(id: impl Into<String>, name: impl Into<String>, joined: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            joined,
        }
    }
}

/// One membership change inside a toggle action.
///
/// Serializes to the platform's patch entry shape: `{"id": ..., "joined": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleDelta {
    #[serde(rename = "id")]
    pub queue_id: QueueId,
    #[serde(rename = "joined")]
    pub desired_status: bool,
}

impl ToggleDelta {
    pub fn new(queue_id: impl Into<String>, desired_status: bool) -> Self {
        Self {
            queue_id: queue_id.into(),
            desired_status,
        }
    }
}

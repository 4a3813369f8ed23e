//! Platform wire types
//!
//! Only the fields this tool reads are modelled; everything else in the
//! platform's responses is ignored.

use queue_toggle_core::domain::Queue;
use serde::Deserialize;

/// `GET /api/v2/users/me`
#[derive(Debug, Clone, Deserialize)]
pub struct UserMe {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// One entry of `GET /api/v2/users/{userId}/queues`
#[derive(Debug, Clone, Deserialize)]
pub struct UserQueueEntity {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub joined: bool,
}

impl From<UserQueueEntity> for Queue {
    fn from(entity: UserQueueEntity) -> Self {
        Queue::new(entity.id, entity.name, entity.joined)
    }
}

/// Paged listing of the agent's queues
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQueueListing {
    #[serde(default)]
    pub entities: Vec<UserQueueEntity>,
    pub page_size: Option<u32>,
    pub page_number: Option<u32>,
    pub total: Option<u64>,
    pub page_count: Option<u32>,
}

/// Error body returned by the platform on non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
    pub code: Option<String>,
    pub status: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listing_tolerates_missing_fields() {
        let listing: UserQueueListing = serde_json::from_value(json!({
            "entities": [
                {"id": "q1", "name": "US_chat_Billing", "joined": true, "memberCount": 12},
                {"id": "q2", "name": "US_voice_Sales"}
            ],
            "pageSize": 100,
            "pageNumber": 1
        }))
        .unwrap();

        let queues: Vec<Queue> = listing.entities.into_iter().map(Queue::from).collect();
        assert_eq!(queues[0], Queue::new("q1", "US_chat_Billing", true));
        assert_eq!(queues[1], Queue::new("q2", "US_voice_Sales", false));
        assert_eq!(listing.total, None);
    }

    #[test]
    fn test_listing_without_entities_is_empty() {
        let listing: UserQueueListing = serde_json::from_value(json!({})).unwrap();
        assert!(listing.entities.is_empty());
    }
}

//! Shared wiring for end-to-end tests

use queue_toggle_core::application::QueueToggleService;
use queue_toggle_core::domain::MediaTypeWhitelist;
use queue_toggle_core::port::time_provider::SystemTimeProvider;
use queue_toggle_infra_platform::{PlatformClient, PlatformEnvironment, StaticTokenAuthenticator};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const AGENT_ID: &str = "agent-42";
pub const QUEUES_PATH: &str = "/api/v2/users/agent-42/queues";

/// Service wired to the real HTTP adapter, pointed at `server`
pub fn service_for(server: &MockServer) -> QueueToggleService {
    let env = PlatformEnvironment::with_bases(&server.uri(), &server.uri()).unwrap();
    let client = PlatformClient::new(&env, Duration::from_secs(5)).unwrap();

    QueueToggleService::new(
        Arc::new(StaticTokenAuthenticator::new("e2e-token")),
        Arc::new(client),
        MediaTypeWhitelist::default(),
        Arc::new(SystemTimeProvider),
    )
}

pub fn listing(entities: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "entities": entities,
        "pageSize": 100,
        "pageNumber": 1
    }))
}

pub fn initial_queues() -> Value {
    json!([
        {"id": "q1", "name": "US_chat_Billing", "joined": true},
        {"id": "q2", "name": "DE_chat_Support", "joined": false},
        {"id": "q3", "name": "US_voice_Sales", "joined": true},
        {"id": "q4", "name": "US_sms_Alerts", "joined": true}
    ])
}

pub async fn mount_current_user(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v2/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": AGENT_ID})))
        .mount(server)
        .await;
}

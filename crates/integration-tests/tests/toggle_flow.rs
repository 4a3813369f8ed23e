//! End-to-end toggle flow: bootstrap -> toggle -> patch -> re-fetch

mod common;

use common::*;
use pretty_assertions::assert_eq;
use queue_toggle_core::domain::{AgentSession, RelevantMediaTypeRow, SessionPhase};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_bootstrap_derives_rows_from_platform_queues() {
    let server = MockServer::start().await;
    mount_current_user(&server).await;
    Mock::given(method("GET"))
        .and(path(QUEUES_PATH))
        .and(query_param("pageSize", "100"))
        .and(header("authorization", "Bearer e2e-token"))
        .respond_with(listing(initial_queues()))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let (session, outcome) = service.bootstrap(AgentSession::new()).await.into_parts();

    outcome.unwrap();
    assert_eq!(session.phase, SessionPhase::Ready);
    assert_eq!(session.queues.len(), 4);
    // sms is not a supported media type; chat row comes from the first chat queue
    assert_eq!(
        session.rows,
        vec![
            RelevantMediaTypeRow::new("chat", true),
            RelevantMediaTypeRow::new("voice", true),
        ]
    );
}

#[tokio::test]
async fn test_toggle_patches_media_type_then_refetches() {
    let server = MockServer::start().await;
    mount_current_user(&server).await;
    Mock::given(method("GET"))
        .and(path(QUEUES_PATH))
        .respond_with(listing(initial_queues()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(QUEUES_PATH))
        .and(body_json(json!([
            {"id": "q1", "joined": false},
            {"id": "q2", "joined": false}
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"entities": []})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(QUEUES_PATH))
        .respond_with(listing(json!([
            {"id": "q1", "name": "US_chat_Billing", "joined": false},
            {"id": "q2", "name": "DE_chat_Support", "joined": false},
            {"id": "q3", "name": "US_voice_Sales", "joined": true},
            {"id": "q4", "name": "US_sms_Alerts", "joined": true}
        ])))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let (session, outcome) = service.bootstrap(AgentSession::new()).await.into_parts();
    outcome.unwrap();

    let (session, outcome) = service.toggle(session, "chat", false).await.into_parts();
    let report = outcome.unwrap();

    assert_eq!(report.patched, 2);
    assert_eq!(session.phase, SessionPhase::Ready);
    assert_eq!(session.rows[0], RelevantMediaTypeRow::new("chat", false));
    assert!(session.queues.iter().filter(|q| q.id != "q3" && q.id != "q4").all(|q| !q.joined));

    let requests = server.received_requests().await.unwrap();
    let methods: Vec<String> = requests.iter().map(|r| r.method.to_string()).collect();
    assert_eq!(methods, vec!["GET", "GET", "PATCH", "GET"]);
}

#[tokio::test]
async fn test_toggle_without_matching_queues_makes_no_patch() {
    let server = MockServer::start().await;
    mount_current_user(&server).await;
    Mock::given(method("GET"))
        .and(path(QUEUES_PATH))
        .respond_with(listing(initial_queues()))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let (session, outcome) = service.bootstrap(AgentSession::new()).await.into_parts();
    outcome.unwrap();

    let (_, outcome) = service.toggle(session, "email", true).await.into_parts();
    assert_eq!(outcome.unwrap().patched, 0);
}

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use agentnet::client_wrapper::{ClientWrapper, Message, Role, SendError};
use agentnet::{create_router, AgentRoster, AppState};

struct StubClient {
    vendor: String,
    response: String,
}

#[async_trait]
impl ClientWrapper for StubClient {
    fn vendor_name(&self) -> &str {
        &self.vendor
    }

    fn model_name(&self) -> &str {
        "stub"
    }

    async fn send_message(&self, _messages: &[Message]) -> Result<Message, SendError> {
        Ok(Message {
            role: Role::Assistant,
            content: self.response.clone(),
        })
    }
}

fn stub(vendor: &str, response: &str) -> Option<Arc<dyn ClientWrapper>> {
    Some(Arc::new(StubClient {
        vendor: vendor.to_string(),
        response: response.to_string(),
    }))
}

fn setup_server() -> TestServer {
    let roster = AgentRoster {
        gemini: stub("Gemini", "gemini output"),
        deepseek: stub("DeepSeek", "deepseek output"),
        groq: stub("Groq", "groq output"),
    };

    TestServer::new(create_router(AppState::new(roster))).expect("failed to build test server")
}

async fn create_session(server: &TestServer) -> String {
    let response = server
        .post("/api/start-task")
        .json(&json!({
            "task": "build a landing page",
            "roles": {
                "agent1": "manager",
                "agent2": "researcher",
                "agent3": "designer"
            }
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);

    body["session_id"]
        .as_str()
        .expect("session_id should be a string")
        .to_string()
}

#[tokio::test]
async fn health_reports_ok() {
    let server = setup_server();

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn start_task_creates_a_session() {
    let server = setup_server();

    let session_id = create_session(&server).await;
    assert!(!session_id.is_empty());
}

#[tokio::test]
async fn start_task_rejects_a_blank_task() {
    let server = setup_server();

    let response = server
        .post("/api/start-task")
        .json(&json!({ "task": "   " }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn streaming_an_unknown_session_is_not_found() {
    let server = setup_server();

    let response = server.get("/api/stream-task/no-such-session").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn streaming_relays_the_full_event_sequence() {
    let server = setup_server();
    let session_id = create_session(&server).await;

    let response = server
        .get(&format!("/api/stream-task/{}", session_id))
        .await;
    response.assert_status_ok();

    let text = response.text();
    // 3 slots x 4 per-agent phases
    assert_eq!(text.matches(r#""event":"agent_result""#).count(), 12);
    assert_eq!(text.matches(r#""event":"phase_start""#).count(), 5);
    assert_eq!(text.matches(r#""event":"phase_complete""#).count(), 5);
    assert_eq!(text.matches(r#""event":"final_output""#).count(), 1);
    assert!(text.contains(r#""event":"end""#));
    assert!(text.contains("gemini output"));
}

#[tokio::test]
async fn completed_sessions_can_be_streamed_again() {
    let server = setup_server();
    let session_id = create_session(&server).await;

    let first = server
        .get(&format!("/api/stream-task/{}", session_id))
        .await;
    first.assert_status_ok();

    // Re-streaming re-runs the workflow deterministically.
    let second = server
        .get(&format!("/api/stream-task/{}", session_id))
        .await;
    second.assert_status_ok();

    let text = second.text();
    assert_eq!(text.matches(r#""event":"final_output""#).count(), 1);
    assert!(text.contains(r#""event":"end""#));
}

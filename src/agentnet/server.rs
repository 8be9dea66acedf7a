//! HTTP transport: task creation, SSE streaming, health.
//!
//! The transport is a thin relay. `POST /api/start-task` registers a session;
//! `GET /api/stream-task/{session_id}` runs the collaboration workflow and
//! forwards each [`WorkflowEvent`] to the client as one SSE message the
//! moment it is produced.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures_util::stream::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::agentnet::agent::AgentRoster;
use crate::agentnet::collaboration::Collaboration;
use crate::agentnet::event::WorkflowEvent;
use crate::agentnet::session::{SessionStatus, SessionStore};

const SSE_KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SessionStore>,
    pub roster: Arc<AgentRoster>,
}

impl AppState {
    pub fn new(roster: AgentRoster) -> Self {
        AppState {
            store: Arc::new(SessionStore::new()),
            roster: Arc::new(roster),
        }
    }
}

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/start-task", post(start_task))
        .route("/api/stream-task/{session_id}", get(stream_task))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct StartTaskRequest {
    pub task: String,
    /// Role overrides keyed by slot id; absent slots keep their defaults.
    #[serde(default)]
    pub roles: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct StartTaskResponse {
    pub success: bool,
    pub session_id: String,
    pub message: String,
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

async fn start_task(
    State(state): State<AppState>,
    Json(request): Json<StartTaskRequest>,
) -> Result<Json<StartTaskResponse>, (StatusCode, Json<Value>)> {
    if request.task.trim().is_empty() {
        log::error!("start-task rejected: empty task");
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": "task must not be empty" })),
        ));
    }

    let agents = state.roster.bind(&request.roles);
    let session = state.store.create(request.task, agents);
    log::info!("session {} created", session.id);

    Ok(Json(StartTaskResponse {
        success: true,
        session_id: session.id,
        message: "Task initialized".to_string(),
    }))
}

async fn stream_task(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, (StatusCode, Json<Value>)> {
    let session = state.store.get(&session_id).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "error": "Session not found" })),
        )
    })?;

    log::info!("streaming session {}", session_id);
    state.store.set_status(&session_id, SessionStatus::Running);

    let store = state.store.clone();
    let events = Collaboration::new(session.task, session.agents).stream();

    let stream = events.map(move |event| {
        // The end sentinel doubles as the completion signal for the store.
        if matches!(event, WorkflowEvent::End) {
            store.set_status(&session_id, SessionStatus::Complete);
        }
        Ok(encode_event(&event))
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::new().interval(SSE_KEEP_ALIVE_INTERVAL)))
}

/// Serialize one workflow event into an SSE message.
fn encode_event(event: &WorkflowEvent) -> Event {
    match serde_json::to_string(event) {
        Ok(data) => Event::default().data(data),
        Err(err) => {
            log::error!("failed to encode event: {}", err);
            Event::default().data(
                json!({ "event": "error", "message": err.to_string() }).to_string(),
            )
        }
    }
}

//! # agentnet
//!
//! agentnet coordinates a small "team" of LLM agents: three vendor chat
//! clients (Google Gemini, DeepSeek, Groq) bound to roles and driven through
//! a fixed five-phase collaboration workflow (analysis, discussion,
//! execution, review, final compilation), with progress streamed to the
//! caller over Server-Sent Events.
//!
//! The crate provides layered abstractions for:
//!
//! * **Provider Flexibility**: the [`ClientWrapper`] trait with three
//!   configuration-driven vendor implementations in [`clients`]; every vendor
//!   shares one OpenAI-compatible transport and differs only in base URL,
//!   request path and model identifier
//! * **Role-Bound Agents**: [`AgentBinding`] and [`AgentRoster`] pair vendor
//!   clients with role labels; a vendor whose API key is missing at startup
//!   is disabled, not fatal
//! * **Collaboration Workflow**: [`Collaboration`] drives the five phases
//!   sequentially and emits a [`WorkflowEvent`] for every phase boundary and
//!   per-agent result as it is produced
//! * **Session Bookkeeping**: [`SessionStore`], an in-memory map from UUID
//!   session identifiers to task/binding records
//! * **HTTP Transport**: an axum router ([`create_router`]) exposing task
//!   creation, SSE streaming and a health check
//!
//! ## Getting Started
//!
//! ```rust,no_run
//! use agentnet::{create_router, AgentRoster, AppState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     agentnet::init_logger();
//!
//!     let roster = AgentRoster::from_env();
//!     let app = create_router(AppState::new(roster));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialise the global [`env_logger`] subscriber exactly once.
///
/// Applications embedding agentnet can opt in to simple `RUST_LOG` driven
/// diagnostics without choosing a logging backend upfront.
pub fn init_logger() {
    INIT_LOGGER.call_once(|| {
        env_logger::init();
    });
}

// Import the top-level `agentnet` module.
pub mod agentnet;

// Re-exporting key items for easier external access.
pub use agentnet::agent::{AgentBinding, AgentRoster, AGENT_UNAVAILABLE, SLOTS};
pub use agentnet::client_wrapper;
pub use agentnet::client_wrapper::{
    ClientError, ClientWrapper, Message, Role, SendError, TokenUsage, SYSTEM_PREAMBLE,
};
pub use agentnet::clients;
pub use agentnet::collaboration;
pub use agentnet::collaboration::{Collaboration, Phase, PhaseResult, WorkflowError};
pub use agentnet::config::ServerConfig;
pub use agentnet::event::WorkflowEvent;
pub use agentnet::server::{create_router, AppState, StartTaskRequest, StartTaskResponse};
pub use agentnet::session::{Session, SessionStatus, SessionStore};

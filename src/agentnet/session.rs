//! In-memory session bookkeeping.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::agentnet::agent::AgentBinding;

/// Lifecycle of one task submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Initialized,
    Running,
    Complete,
}

/// Server-side record of one task submission and its agent-role bindings.
///
/// A session is re-enterable: streaming it again re-runs the workflow from
/// the stored task and bindings.
#[derive(Clone)]
pub struct Session {
    pub id: String,
    pub task: String,
    /// Bindings in fixed slot order; immutable for the session's lifetime.
    pub agents: Vec<AgentBinding>,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
}

/// In-memory session map.
///
/// Identifiers are UUID v4, so concurrent creations can never collide.
/// Sessions live for the process lifetime.
// TODO: evict sessions after a TTL; under sustained traffic the map grows
// without bound.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        SessionStore {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create and register a session for `task` with the given bindings.
    pub fn create(&self, task: impl Into<String>, agents: Vec<AgentBinding>) -> Session {
        let session = Session {
            id: Uuid::new_v4().to_string(),
            task: task.into(),
            agents,
            status: SessionStatus::Initialized,
            created_at: Utc::now(),
        };

        self.sessions
            .write()
            .unwrap()
            .insert(session.id.clone(), session.clone());
        session
    }

    pub fn get(&self, id: &str) -> Option<Session> {
        self.sessions.read().unwrap().get(id).cloned()
    }

    pub fn set_status(&self, id: &str, status: SessionStatus) {
        if let Some(session) = self.sessions.write().unwrap().get_mut(id) {
            session.status = status;
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_then_get_round_trips() {
        let store = SessionStore::new();
        let session = store.create("write docs", Vec::new());

        let fetched = store.get(&session.id).expect("session should exist");
        assert_eq!(fetched.task, "write docs");
        assert_eq!(fetched.status, SessionStatus::Initialized);
        assert!(fetched.created_at <= Utc::now());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn identifiers_are_unique() {
        let store = SessionStore::new();
        let a = store.create("t", Vec::new());
        let b = store.create("t", Vec::new());
        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn status_transitions_are_persisted() {
        let store = SessionStore::new();
        let session = store.create("t", Vec::new());

        store.set_status(&session.id, SessionStatus::Running);
        assert_eq!(
            store.get(&session.id).unwrap().status,
            SessionStatus::Running
        );

        store.set_status(&session.id, SessionStatus::Complete);
        assert_eq!(
            store.get(&session.id).unwrap().status,
            SessionStatus::Complete
        );
    }

    #[test]
    fn unknown_id_is_not_found() {
        let store = SessionStore::new();
        assert!(store.get("missing").is_none());
        store.set_status("missing", SessionStatus::Running); // no-op
        assert!(store.is_empty());
    }
}

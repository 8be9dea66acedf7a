//! Role-bound agents and the startup roster.
//!
//! An [`AgentBinding`] pairs one vendor client with a role label for the
//! lifetime of a session. The [`AgentRoster`] owns the three vendor clients,
//! built once at startup; a vendor whose API key is missing is logged and
//! left unavailable rather than failing the process.

use std::collections::HashMap;
use std::sync::Arc;

use crate::agentnet::client_wrapper::{ClientError, ClientWrapper};
use crate::agentnet::clients::deepseek::DeepSeekClient;
use crate::agentnet::clients::gemini::GeminiClient;
use crate::agentnet::clients::groq::GroqClient;

/// Output substituted for every phase of an agent whose vendor client could
/// not be built at startup.
pub const AGENT_UNAVAILABLE: &str = "⚠️ Agent unavailable.";

/// Fixed slot layout: (slot id, default role, display color).
pub const SLOTS: [(&str, &str, &str); 3] = [
    ("agent1", "manager", "red"),
    ("agent2", "researcher", "blue"),
    ("agent3", "designer", "green"),
];

/// A vendor client bound to a role for the lifetime of one session.
#[derive(Clone)]
pub struct AgentBinding {
    /// Slot identifier (`agent1` .. `agent3`).
    pub id: String,
    /// Role label (e.g. "manager", "researcher", "designer").
    pub role: String,
    /// Cosmetic display color forwarded to the client UI.
    pub color: String,
    /// `None` when the vendor failed construction at startup; the slot still
    /// occupies its place in the workflow and yields [`AGENT_UNAVAILABLE`].
    pub client: Option<Arc<dyn ClientWrapper>>,
}

/// The three vendor clients, constructed once at process startup.
pub struct AgentRoster {
    pub gemini: Option<Arc<dyn ClientWrapper>>,
    pub deepseek: Option<Arc<dyn ClientWrapper>>,
    pub groq: Option<Arc<dyn ClientWrapper>>,
}

impl AgentRoster {
    /// Build every vendor client from its environment key.
    ///
    /// A missing key disables that vendor's slot for the process lifetime;
    /// the server keeps running with whatever subset is available.
    pub fn from_env() -> Self {
        AgentRoster {
            gemini: safe_init("Gemini Agent", GeminiClient::from_env),
            deepseek: safe_init("DeepSeek Agent", DeepSeekClient::from_env),
            groq: safe_init("Groq Agent", GroqClient::from_env),
        }
    }

    /// Bind the fixed slots to roles.
    ///
    /// Caller-supplied role overrides are keyed by slot id; absent entries
    /// fall back to the slot defaults in [`SLOTS`].
    pub fn bind(&self, roles: &HashMap<String, String>) -> Vec<AgentBinding> {
        let clients = [self.gemini.clone(), self.deepseek.clone(), self.groq.clone()];

        SLOTS
            .iter()
            .zip(clients)
            .map(|((slot, default_role, color), client)| AgentBinding {
                id: (*slot).to_string(),
                role: roles
                    .get(*slot)
                    .cloned()
                    .unwrap_or_else(|| (*default_role).to_string()),
                color: (*color).to_string(),
                client,
            })
            .collect()
    }
}

fn safe_init<C, F>(name: &str, build: F) -> Option<Arc<dyn ClientWrapper>>
where
    C: ClientWrapper + 'static,
    F: FnOnce() -> Result<C, ClientError>,
{
    match build() {
        Ok(client) => {
            log::info!("{} initialized", name);
            Some(Arc::new(client))
        }
        Err(err) => {
            log::warn!("{} failed: {}", name, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_applies_defaults_and_overrides() {
        let roster = AgentRoster {
            gemini: None,
            deepseek: None,
            groq: None,
        };

        let mut roles = HashMap::new();
        roles.insert("agent2".to_string(), "writer".to_string());

        let bindings = roster.bind(&roles);
        assert_eq!(bindings.len(), 3);

        assert_eq!(bindings[0].id, "agent1");
        assert_eq!(bindings[0].role, "manager");
        assert_eq!(bindings[0].color, "red");

        assert_eq!(bindings[1].role, "writer");
        assert_eq!(bindings[2].role, "designer");
        assert!(bindings.iter().all(|b| b.client.is_none()));
    }

    #[test]
    fn from_env_without_keys_disables_every_slot() {
        std::env::remove_var(crate::agentnet::clients::gemini::API_KEY_VAR);
        std::env::remove_var(crate::agentnet::clients::deepseek::API_KEY_VAR);
        std::env::remove_var(crate::agentnet::clients::groq::API_KEY_VAR);

        let roster = AgentRoster::from_env();
        assert!(roster.gemini.is_none());
        assert!(roster.deepseek.is_none());
        assert!(roster.groq.is_none());
    }
}

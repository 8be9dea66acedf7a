//! Uniform contract over the vendor chat clients.
//!
//! A [`ClientWrapper`] hides one vendor's chat-completion API behind a common
//! interface. It keeps no conversation state; the collaboration workflow
//! builds a fresh prompt for every call and the wrapper only ships it to the
//! vendor and hands back the reply.
//!
//! The vendors differ only in configuration (base URL, request path, model
//! identifier, display label); see [`crate::agentnet::clients`] for the three
//! concrete implementations.

use std::error::Error;
use std::fmt;

use async_trait::async_trait;
use tokio::sync::Mutex;

/// System preamble prepended to every request; only the user prompt varies.
pub const SYSTEM_PREAMBLE: &str = "You are a helpful AI agent collaborating with a team.";

/// Represents the possible roles for a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Role {
    System,
    // a message sent by the workflow on behalf of the user
    User,
    Assistant,
}

/// How many tokens were spent on prompt vs. completion.
#[derive(Clone, Debug)]
pub struct TokenUsage {
    pub input_tokens: usize,
    pub output_tokens: usize,
    pub total_tokens: usize,
}

/// Represents a generic message to be sent to an LLM.
#[derive(Clone, Debug)]
pub struct Message {
    /// The role associated with the message.
    pub role: Role,
    /// The actual content of the message.
    pub content: String,
}

/// Type alias for a Send-able error box.
pub type SendError = Box<dyn Error + Send + Sync>;

/// Construction-time failures, distinct from runtime generation failures.
///
/// A client that cannot be built stays unavailable for the process lifetime;
/// a client that was built but whose calls fail reports those failures as
/// output text (see [`ClientWrapper::generate`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The named API key environment variable is not set.
    MissingApiKey(&'static str),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::MissingApiKey(var) => {
                write!(f, "{} not found in environment variables", var)
            }
        }
    }
}

impl Error for ClientError {}

/// Trait defining the interface to interact with the vendor LLM services.
#[async_trait]
pub trait ClientWrapper: Send + Sync {
    /// Human-readable vendor label used in error outputs (e.g. "Gemini").
    fn vendor_name(&self) -> &str;

    /// Model identifier injected into each request.
    fn model_name(&self) -> &str;

    /// Send a message sequence to the LLM and get a response.
    async fn send_message(&self, messages: &[Message]) -> Result<Message, SendError>;

    /// Wrappers that track token usage return their slot by overriding this.
    fn usage_slot(&self) -> Option<&Mutex<Option<TokenUsage>>> {
        None
    }

    /// Usage from the last `send_message` call, if the wrapper tracks it.
    async fn get_last_usage(&self) -> Option<TokenUsage> {
        match self.usage_slot() {
            Some(slot) => slot.lock().await.clone(),
            None => None,
        }
    }

    /// Generate a reply for a single prompt.
    ///
    /// The fixed [`SYSTEM_PREAMBLE`] is prepended; only `prompt` varies per
    /// call. This method never fails past its boundary: any transport or
    /// vendor error is rendered into the returned string, prefixed with the
    /// vendor name so the failing agent is identifiable in workflow output.
    async fn generate(&self, prompt: &str) -> String {
        let messages = [
            Message {
                role: Role::System,
                content: SYSTEM_PREAMBLE.to_string(),
            },
            Message {
                role: Role::User,
                content: prompt.to_string(),
            },
        ];

        match self.send_message(&messages).await {
            Ok(reply) => {
                if let Some(usage) = self.get_last_usage().await {
                    log::debug!(
                        "{} ({}) replied, {} tokens total",
                        self.vendor_name(),
                        self.model_name(),
                        usage.total_tokens
                    );
                }
                reply.content
            }
            Err(err) => format!("Error from {} Agent: {}", self.vendor_name(), err),
        }
    }

    /// Blocking form of [`generate`](ClientWrapper::generate) for non-async
    /// callers. Spins up a one-off runtime; must not be called from inside a
    /// tokio runtime.
    fn generate_blocking(&self, prompt: &str) -> String {
        match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(self.generate(prompt)),
            Err(err) => format!("Error from {} Agent: {}", self.vendor_name(), err),
        }
    }
}

//! Generic client for OpenAI-compatible chat-completion endpoints.
//!
//! Gemini, DeepSeek and Groq all expose the same request/response shape
//! behind different hosts, so the vendor modules are thin configuration
//! wrappers around this one client: base URL, request path, model identifier
//! and display label are the only things that vary.

use async_trait::async_trait;
use openai_rust2 as openai_rust;
use tokio::sync::Mutex;

use crate::agentnet::client_wrapper::{ClientWrapper, Message, Role, SendError, TokenUsage};
use crate::agentnet::clients::common::{format_messages, send_and_track};
use crate::agentnet::clients::http_pool::get_shared_http_client;

/// Client wrapper for any OpenAI-compatible chat-completion endpoint.
///
/// Maintains the selected model identifier plus an internal [`TokenUsage`]
/// slot so callers can inspect how many tokens each request consumed. HTTP
/// transport goes through the shared client configured in
/// [`crate::agentnet::clients::http_pool`].
pub struct OpenAICompatClient {
    /// Underlying SDK client pointing at the vendor's REST endpoint.
    client: openai_rust::Client,
    /// Display label used in error outputs (e.g. "DeepSeek").
    vendor: String,
    /// Model name that will be injected into each request.
    model: String,
    /// Path of the chat-completion resource on the vendor host.
    url_path: String,
    /// Storage for the token usage returned by the most recent request.
    token_usage: Mutex<Option<TokenUsage>>,
}

impl OpenAICompatClient {
    /// Construct a client for the given vendor configuration.
    pub fn new(
        vendor: impl Into<String>,
        secret_key: &str,
        model_name: impl Into<String>,
        base_url: &str,
        url_path: impl Into<String>,
    ) -> Self {
        OpenAICompatClient {
            client: openai_rust::Client::new_with_client_and_base_url(
                secret_key,
                get_shared_http_client(),
                base_url,
            ),
            vendor: vendor.into(),
            model: model_name.into(),
            url_path: url_path.into(),
            token_usage: Mutex::new(None),
        }
    }
}

#[async_trait]
impl ClientWrapper for OpenAICompatClient {
    fn vendor_name(&self) -> &str {
        &self.vendor
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn send_message(&self, messages: &[Message]) -> Result<Message, SendError> {
        let formatted_messages = format_messages(messages);

        let content = send_and_track(
            &self.client,
            &self.model,
            formatted_messages,
            Some(self.url_path.clone()),
            &self.token_usage,
        )
        .await?;

        Ok(Message {
            role: Role::Assistant,
            content,
        })
    }

    fn usage_slot(&self) -> Option<&Mutex<Option<TokenUsage>>> {
        Some(&self.token_usage)
    }
}

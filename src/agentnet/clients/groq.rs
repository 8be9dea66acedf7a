//! Groq wrapper. Reads `GROQ_API_KEY` at construction time.

use std::env;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::agentnet::client_wrapper::{
    ClientError, ClientWrapper, Message, SendError, TokenUsage,
};
use crate::agentnet::clients::openai_compat::OpenAICompatClient;

/// Environment variable holding the Groq API key.
pub const API_KEY_VAR: &str = "GROQ_API_KEY";

const VENDOR: &str = "Groq";
const BASE_URL: &str = "https://api.groq.com/openai/v1";
const URL_PATH: &str = "/openai/v1/chat/completions";

pub enum Model {
    Llama3370bVersatile,
    Llama318bInstant,
    Gemma29bIt,
}

pub fn model_to_string(model: Model) -> String {
    match model {
        Model::Llama3370bVersatile => "llama-3.3-70b-versatile".to_string(),
        Model::Llama318bInstant => "llama-3.1-8b-instant".to_string(),
        Model::Gemma29bIt => "gemma2-9b-it".to_string(),
    }
}

pub struct GroqClient {
    client: OpenAICompatClient,
}

impl GroqClient {
    /// Build from [`API_KEY_VAR`] with the default model.
    pub fn from_env() -> Result<Self, ClientError> {
        let secret_key =
            env::var(API_KEY_VAR).map_err(|_| ClientError::MissingApiKey(API_KEY_VAR))?;
        Ok(Self::new_with_model_enum(
            &secret_key,
            Model::Llama3370bVersatile,
        ))
    }

    pub fn new_with_model_enum(secret_key: &str, model: Model) -> Self {
        Self::new_with_model_string(secret_key, &model_to_string(model))
    }

    pub fn new_with_model_string(secret_key: &str, model_name: &str) -> Self {
        GroqClient {
            client: OpenAICompatClient::new(VENDOR, secret_key, model_name, BASE_URL, URL_PATH),
        }
    }
}

#[async_trait]
impl ClientWrapper for GroqClient {
    fn vendor_name(&self) -> &str {
        self.client.vendor_name()
    }

    fn model_name(&self) -> &str {
        self.client.model_name()
    }

    async fn send_message(&self, messages: &[Message]) -> Result<Message, SendError> {
        self.client.send_message(messages).await
    }

    fn usage_slot(&self) -> Option<&Mutex<Option<TokenUsage>>> {
        self.client.usage_slot()
    }
}

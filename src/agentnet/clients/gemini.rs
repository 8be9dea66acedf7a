//! Google Gemini wrapper.
//!
//! Talks to the OpenAI-compatible surface of the Generative Language API.
//! The API key is read from `GEMINI_API_KEY` at construction time.

use std::env;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::agentnet::client_wrapper::{
    ClientError, ClientWrapper, Message, SendError, TokenUsage,
};
use crate::agentnet::clients::openai_compat::OpenAICompatClient;

/// Environment variable holding the Gemini API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

const VENDOR: &str = "Gemini";
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";
const URL_PATH: &str = "/v1beta/chat/completions";

/// Gemini chat models reachable through the OpenAI-compatible endpoint.
pub enum Model {
    Gemini20FlashExp,
    Gemini20Flash,
    Gemini25Flash,
    Gemini25Pro,
}

pub fn model_to_string(model: Model) -> String {
    match model {
        Model::Gemini20FlashExp => "gemini-2.0-flash-exp".to_string(),
        Model::Gemini20Flash => "gemini-2.0-flash".to_string(),
        Model::Gemini25Flash => "gemini-2.5-flash".to_string(),
        Model::Gemini25Pro => "gemini-2.5-pro".to_string(),
    }
}

pub struct GeminiClient {
    client: OpenAICompatClient,
}

impl GeminiClient {
    /// Build from [`API_KEY_VAR`] with the default model.
    ///
    /// A missing key is a construction-time error; the vendor slot then stays
    /// unavailable for the process lifetime, which is distinct from a runtime
    /// generation failure.
    pub fn from_env() -> Result<Self, ClientError> {
        let secret_key =
            env::var(API_KEY_VAR).map_err(|_| ClientError::MissingApiKey(API_KEY_VAR))?;
        Ok(Self::new_with_model_enum(
            &secret_key,
            Model::Gemini20FlashExp,
        ))
    }

    pub fn new_with_model_enum(secret_key: &str, model: Model) -> Self {
        Self::new_with_model_string(secret_key, &model_to_string(model))
    }

    pub fn new_with_model_string(secret_key: &str, model_name: &str) -> Self {
        GeminiClient {
            client: OpenAICompatClient::new(VENDOR, secret_key, model_name, BASE_URL, URL_PATH),
        }
    }
}

#[async_trait]
impl ClientWrapper for GeminiClient {
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

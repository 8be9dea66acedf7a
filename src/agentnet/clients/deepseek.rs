//! DeepSeek wrapper. Reads `DEEPSEEK_API_KEY` at construction time.

use std::env;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::agentnet::client_wrapper::{
    ClientError, ClientWrapper, Message, SendError, TokenUsage,
};
use crate::agentnet::clients::openai_compat::OpenAICompatClient;

/// Environment variable holding the DeepSeek API key.
pub const API_KEY_VAR: &str = "DEEPSEEK_API_KEY";

const VENDOR: &str = "DeepSeek";
const BASE_URL: &str = "https://api.deepseek.com";
const URL_PATH: &str = "/chat/completions";

pub enum Model {
    DeepSeekChat,
    DeepSeekReasoner,
}

pub fn model_to_string(model: Model) -> String {
    match model {
        Model::DeepSeekChat => "deepseek-chat".to_string(),
        Model::DeepSeekReasoner => "deepseek-reasoner".to_string(),
    }
}

pub struct DeepSeekClient {
    client: OpenAICompatClient,
}

impl DeepSeekClient {
    /// Build from [`API_KEY_VAR`] with the default model.
    pub fn from_env() -> Result<Self, ClientError> {
        let secret_key =
            env::var(API_KEY_VAR).map_err(|_| ClientError::MissingApiKey(API_KEY_VAR))?;
        Ok(Self::new_with_model_enum(&secret_key, Model::DeepSeekChat))
    }

    pub fn new_with_model_enum(secret_key: &str, model: Model) -> Self {
        Self::new_with_model_string(secret_key, &model_to_string(model))
    }

    pub fn new_with_model_string(secret_key: &str, model_name: &str) -> Self {
        DeepSeekClient {
            client: OpenAICompatClient::new(VENDOR, secret_key, model_name, BASE_URL, URL_PATH),
        }
    }
}

#[async_trait]
impl ClientWrapper for DeepSeekClient {
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

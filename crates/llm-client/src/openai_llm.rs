//! LlmClient backed by openai-client; works against any OpenAI-compatible base URL.

use async_trait::async_trait;
use openai_client::{ChatOptions, OpenAIClient};
use tracing::{instrument, warn};

use super::{user_message, Completion, CompletionError, GenerationParams, LlmClient};
use crate::config::LlmConfig;

pub const DEFAULT_MODEL: &str = "llama3-groq-70b-8192-tool-use-preview";

#[derive(Clone)]
pub struct OpenAILlmClient {
    client: OpenAIClient,
    model: String,
}

impl OpenAILlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: OpenAIClient::new(api_key),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: OpenAIClient::with_base_url(api_key, base_url),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn from_config(config: &dyn LlmConfig) -> Self {
        Self::with_base_url(config.api_key().to_string(), config.base_url().to_string())
            .with_model(config.model().to_string())
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn complete(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<Completion, CompletionError> {
        let messages = vec![user_message(prompt)?];
        let options = ChatOptions {
            temperature: Some(params.temperature),
            max_tokens: Some(params.max_tokens),
        };

        let reply = self
            .client
            .chat_completion(&self.model, messages, &options)
            .await?;

        let tokens_used = match reply.total_tokens {
            Some(total) => u64::from(total),
            None => {
                warn!("Completion response carried no usage block, counting 0 tokens");
                0
            }
        };

        Ok(Completion {
            text: reply.content,
            tokens_used,
        })
    }

    fn model(&self) -> &str {
        &self.model
    }
}

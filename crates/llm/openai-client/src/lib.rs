//! # OpenAI API client
//!
//! Thin wrapper around [async-openai] for non-streaming chat completion against any
//! OpenAI-compatible endpoint (OpenAI, Groq, local proxies). Returns the reply text together with
//! the reported token usage, and provides token masking for safe logging.

use async_openai::{error::OpenAIError, types::CreateChatCompletionRequestArgs, Client};
use std::sync::Arc;
use thiserror::Error;

pub use async_openai::types::{ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs};

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_char_boundary(7) || !token.is_char_boundary(len - 4) {
        return "***".to_string();
    }
    format!("{}***{}", &token[..7], &token[len - 4..])
}

/// Why a chat completion call failed.
#[derive(Debug, Error)]
pub enum ChatClientError {
    /// Could not build the request or reach the endpoint.
    #[error("request failed: {0}")]
    Request(String),
    /// The endpoint answered with an error body (bad key, unknown model, rate limit, …).
    #[error("API error: {0}")]
    Api(String),
    /// The endpoint answered 2xx but the body is not a usable completion.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<OpenAIError> for ChatClientError {
    fn from(e: OpenAIError) -> Self {
        match e {
            OpenAIError::ApiError(api) => ChatClientError::Api(api.to_string()),
            OpenAIError::JSONDeserialize(err) => ChatClientError::Malformed(err.to_string()),
            other => ChatClientError::Request(other.to_string()),
        }
    }
}

/// Sampling options applied to one request. `None` leaves the server default.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChatOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// Assistant reply plus the usage block, if the server sent one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatCompletion {
    pub content: String,
    pub total_tokens: Option<u32>,
}

/// OpenAI chat client. Wraps async-openai client; holds the API key only for masked logging.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Arc<Client<async_openai::config::OpenAIConfig>>,
    api_key_for_logging: String,
}

impl OpenAIClient {
    /// Builds a client using the given API key and default API base URL.
    pub fn new(api_key: String) -> Self {
        let config = async_openai::config::OpenAIConfig::new().with_api_key(api_key.clone());
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging: api_key,
        }
    }

    /// Builds a client with a custom base URL (e.g. `https://api.groq.com/openai/v1`).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let config = async_openai::config::OpenAIConfig::new()
            .with_api_key(api_key.clone())
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging: api_key,
        }
    }

    /// Sends a chat completion request and returns the first choice and the usage block.
    ///
    /// Logs the masked API key, the request JSON at debug level, and token usage.
    #[allow(deprecated)]
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
        options: &ChatOptions,
    ) -> Result<ChatCompletion, ChatClientError> {
        tracing::info!(
            model = %model,
            message_count = messages.len(),
            api_key = %mask_token(&self.api_key_for_logging),
            "OpenAI chat_completion request"
        );

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(model).messages(messages);
        if let Some(temperature) = options.temperature {
            args.temperature(temperature);
        }
        if let Some(max_tokens) = options.max_tokens {
            args.max_tokens(max_tokens);
        }
        let request = args.build()?;

        if let Ok(json) = serde_json::to_string_pretty(&request) {
            tracing::debug!(request_json = %json, "OpenAI chat_completion request JSON");
        }

        let response = self.client.chat().create(request).await?;

        let total_tokens = response.usage.as_ref().map(|u| {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "OpenAI chat_completion usage"
            );
            u.total_tokens
        });

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ChatClientError::Malformed("response has no choices".to_string()))?;
        let content = choice
            .message
            .content
            .ok_or_else(|| ChatClientError::Malformed("first choice has no content".to_string()))?;

        Ok(ChatCompletion {
            content,
            total_tokens,
        })
    }
}

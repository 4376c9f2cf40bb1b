//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait (one prompt in, reply text plus token cost out) and an
//! OpenAI-compatible implementation. Transport-agnostic; used by the telegram-bot ask pipeline.

use async_trait::async_trait;
use openai_client::{
    ChatClientError, ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
};
use std::time::Duration;
use thiserror::Error;

mod config;
mod openai_llm;

pub use config::{EnvLlmConfig, LlmConfig};
pub use openai_llm::OpenAILlmClient;

/// Fixed sampling parameters for every ask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1000,
        }
    }
}

/// Model reply and the total tokens the backend billed for it (0 when not reported).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub tokens_used: u64,
}

/// Completion failures. All are recoverable at the message level.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Request(String),
    #[error("completion API error: {0}")]
    Api(String),
    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
    #[error("completion timed out after {0:?}")]
    Timeout(Duration),
}

impl From<ChatClientError> for CompletionError {
    fn from(e: ChatClientError) -> Self {
        match e {
            ChatClientError::Request(msg) => CompletionError::Request(msg),
            ChatClientError::Api(msg) => CompletionError::Api(msg),
            ChatClientError::Malformed(msg) => CompletionError::MalformedResponse(msg),
        }
    }
}

/// Completion backend interface.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends `prompt` as a single user message and returns the reply with its token cost.
    async fn complete(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<Completion, CompletionError>;

    /// Model identifier, shown in the config view.
    fn model(&self) -> &str;
}

/// Wraps the composed prompt as the single user message of a chat request.
fn user_message(prompt: &str) -> Result<ChatCompletionRequestMessage, CompletionError> {
    ChatCompletionRequestUserMessageArgs::default()
        .content(prompt)
        .build()
        .map(Into::into)
        .map_err(|e| CompletionError::Request(e.to_string()))
}

//! LLM configuration: trait and env-based implementation.

use anyhow::{bail, Context, Result};
use std::env;

use crate::openai_llm::DEFAULT_MODEL;
use crate::GenerationParams;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// LLM configuration interface for OpenAI-compatible APIs.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
    fn generation_params(&self) -> GenerationParams;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.api_key
    }
    fn base_url(&self) -> &str {
        &self.base_url
    }
    fn model(&self) -> &str {
        &self.model
    }
    fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

impl EnvLlmConfig {
    /// Load from environment variables.
    ///
    /// `GROQ_API_KEY` (or `OPENAI_API_KEY`) is required; `LLM_BASE_URL` (or `OPENAI_BASE_URL`),
    /// `MODEL`, `LLM_TEMPERATURE` and `LLM_MAX_TOKENS` have defaults. A set but unparsable number is
    /// an error rather than a silent default.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("GROQ_API_KEY")
            .or_else(|_| env::var("OPENAI_API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty())
            .context("GROQ_API_KEY (or OPENAI_API_KEY) not set")?;
        let base_url = env::var("LLM_BASE_URL")
            .or_else(|_| env::var("OPENAI_BASE_URL"))
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = env::var("MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let defaults = GenerationParams::default();
        let temperature = match env::var("LLM_TEMPERATURE") {
            Ok(raw) => raw
                .trim()
                .parse::<f32>()
                .with_context(|| format!("LLM_TEMPERATURE is not a number: {}", raw))?,
            Err(_) => defaults.temperature,
        };
        let max_tokens = match env::var("LLM_MAX_TOKENS") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("LLM_MAX_TOKENS is not a positive integer: {}", raw))?,
            Err(_) => defaults.max_tokens,
        };

        let config = Self {
            api_key,
            base_url,
            model,
            temperature,
            max_tokens,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            bail!("LLM_TEMPERATURE must be between 0.0 and 2.0, got {}", self.temperature);
        }
        if self.max_tokens == 0 {
            bail!("LLM_MAX_TOKENS must be at least 1");
        }
        Ok(())
    }
}

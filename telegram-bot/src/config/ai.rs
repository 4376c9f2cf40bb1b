//! AI config: completion backend (from llm-client), translation backend, languages, timeouts.

use anyhow::{bail, Context, Result};
use llm_client::EnvLlmConfig;
use std::env;
use std::time::Duration;

/// Completion + translation settings.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub llm: EnvLlmConfig,
    /// RESPONSE_LANGUAGE: language answers are delivered in (LanguageProfile code)
    pub response_language: String,
    /// WORKING_LANGUAGE: language questions are translated to before prompting
    pub working_language: String,
    pub translate_base_url: String,
    /// EXTERNAL_TIMEOUT_SECS: bound on each translation or completion call
    pub external_timeout_secs: u64,
}

impl AiConfig {
    pub fn from_env() -> Result<Self> {
        let llm = EnvLlmConfig::from_env()?;
        let response_language = env::var("RESPONSE_LANGUAGE")
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_else(|_| "id".to_string());
        let working_language = env::var("WORKING_LANGUAGE")
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_else(|_| "en".to_string());
        let translate_base_url = env::var("TRANSLATE_BASE_URL")
            .unwrap_or_else(|_| translate::DEFAULT_BASE_URL.to_string());
        let external_timeout_secs = match env::var("EXTERNAL_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("EXTERNAL_TIMEOUT_SECS is not a number: {}", raw))?,
            Err(_) => 60,
        };

        Ok(Self {
            llm,
            response_language,
            working_language,
            translate_base_url,
            external_timeout_secs,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.llm.validate()?;
        if reqwest::Url::parse(&self.llm.base_url).is_err() {
            bail!("LLM_BASE_URL is not a valid URL: {}", self.llm.base_url);
        }
        if reqwest::Url::parse(&self.translate_base_url).is_err() {
            bail!("TRANSLATE_BASE_URL is not a valid URL: {}", self.translate_base_url);
        }
        if self.response_language.is_empty() || self.working_language.is_empty() {
            bail!("RESPONSE_LANGUAGE and WORKING_LANGUAGE must not be empty");
        }
        if self.external_timeout_secs == 0 {
            bail!("EXTERNAL_TIMEOUT_SECS must be at least 1");
        }
        Ok(())
    }

    pub fn external_timeout(&self) -> Duration {
        Duration::from_secs(self.external_timeout_secs)
    }
}

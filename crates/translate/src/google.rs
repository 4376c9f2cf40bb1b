//! Google Translate over the `client=gtx` JSON endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::chunk::{chunk_lines, join_chunks, MAX_CHUNK_CHARS};
use crate::{Language, TranslationError, Translator};

pub const DEFAULT_BASE_URL: &str = "https://translate.googleapis.com";

const TRANSLATE_PATH: &str = "/translate_a/single";

#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: Client,
    base_url: String,
}

impl GoogleTranslator {
    /// `base_url` without a trailing path, e.g. `https://translate.googleapis.com` (tests point it at a mock server).
    pub fn new(base_url: impl Into<String>) -> Result<Self, TranslationError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn translate_chunk(
        &self,
        chunk: &str,
        source: &Language,
        target: &str,
    ) -> Result<String, TranslationError> {
        let url = format!("{}{}", self.base_url, TRANSLATE_PATH);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", source.as_str()),
                ("tl", target),
                ("dt", "t"),
                ("q", chunk),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let raw = response.text().await?;
        let value: Value = serde_json::from_str(&raw)
            .map_err(|e| TranslationError::Malformed(format!("invalid JSON: {}", e)))?;
        extract_translation(&value)
    }
}

/// The body is `[[["translated", "original", …], …], …]`; the answer is every segment's first
/// element concatenated.
fn extract_translation(value: &Value) -> Result<String, TranslationError> {
    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslationError::Malformed("missing segment list".to_string()))?;

    let mut out = String::new();
    for segment in segments {
        if let Some(text) = segment.get(0).and_then(Value::as_str) {
            out.push_str(text);
        }
    }
    if out.is_empty() {
        return Err(TranslationError::Malformed("no translated segments".to_string()));
    }
    Ok(out)
}

#[async_trait]
impl Translator for GoogleTranslator {
    #[instrument(skip(self, text, source, target), fields(source = %source, dest = %target, text_len = text.len()))]
    async fn translate(
        &self,
        text: &str,
        source: &Language,
        target: &str,
    ) -> Result<String, TranslationError> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let chunks = chunk_lines(text, MAX_CHUNK_CHARS);
        debug!(chunks = chunks.len(), "step: translate request");

        let mut translated = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            if chunk.text.trim().is_empty() {
                translated.push(chunk.text.clone());
                continue;
            }
            translated.push(self.translate_chunk(&chunk.text, source, target).await?);
        }

        info!(chunks = chunks.len(), "step: translate done");
        Ok(join_chunks(&chunks, &translated))
    }
}

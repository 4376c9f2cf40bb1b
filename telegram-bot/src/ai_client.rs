//! Ask pipeline: translate the question, compose the prompt from the chat's session, call the
//! completion backend, record the exchange and usage, then normalize the answer's language.
//!
//! **External interactions:** translation backend (twice at most), completion backend (once),
//! ConversationStore (snapshot + commit), UsageStore (counters + usage file).

use llm_client::{CompletionError, GenerationParams, LlmClient};
use memory::ConversationStore;
use prompt::{looks_foreign, LanguageProfile, PromptComposer};
use std::sync::Arc;
use std::time::Duration;
use storage::UsageStore;
use tracing::{debug, error, info, instrument, warn};
use translate::{Language, TranslationError, Translator};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Answers free-form questions for a chat. Failures never escape `ask`: the user gets the
/// profile's apology instead and no state changes.
#[derive(Clone)]
pub struct AiClient {
    llm: Arc<dyn LlmClient>,
    translator: Arc<dyn Translator>,
    conversations: Arc<ConversationStore>,
    usage: Arc<UsageStore>,
    composer: PromptComposer,
    params: GenerationParams,
    working_language: String,
    timeout: Duration,
}

impl AiClient {
    // ---------- Construction ----------

    /// Indonesian responses, English working language, default generation params, 60 s timeout.
    pub fn new(
        llm: Arc<dyn LlmClient>,
        translator: Arc<dyn Translator>,
        conversations: Arc<ConversationStore>,
        usage: Arc<UsageStore>,
    ) -> Self {
        Self {
            llm,
            translator,
            conversations,
            usage,
            composer: PromptComposer::default(),
            params: GenerationParams::default(),
            working_language: "en".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_profile(mut self, profile: LanguageProfile) -> Self {
        self.composer = PromptComposer::new(profile);
        self
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_working_language(mut self, code: impl Into<String>) -> Self {
        self.working_language = code.into();
        self
    }

    /// Bound applied to each translation and completion call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        self.llm.model()
    }

    pub fn profile(&self) -> &LanguageProfile {
        self.composer.profile()
    }

    // ---------- Pipeline ----------

    /// Returns the answer to `raw` for `chat_id`, or the apology if the completion failed.
    #[instrument(skip(self, raw), fields(chat_id = chat_id, input_len = raw.len()))]
    pub async fn ask(&self, chat_id: i64, raw: &str) -> String {
        let question = self
            .translate_or_keep(raw, &Language::Auto, &self.working_language)
            .await;
        debug!(chat_id = chat_id, question = %question, "step: question translated");

        let session = self.conversations.get(chat_id);
        let prompt = self.composer.compose(&session, &question);

        let completion = match self.complete(&prompt).await {
            Ok(c) => c,
            Err(e) => {
                error!(chat_id = chat_id, error = %e, "AI response error");
                return self.profile().apology.clone();
            }
        };
        info!(
            chat_id = chat_id,
            tokens = completion.tokens_used,
            "step: completion received"
        );

        if !self.conversations.commit_exchange(
            chat_id,
            session.generation,
            question.as_str(),
            completion.text.as_str(),
        ) {
            info!(chat_id = chat_id, "Conversation was reset mid-flight, exchange not recorded");
        }

        if let Err(e) = self.usage.record_usage(chat_id, completion.tokens_used).await {
            warn!(chat_id = chat_id, error = %e, "Usage updated in memory but not persisted");
        }

        let profile = self.profile();
        if looks_foreign(&completion.text, profile) {
            debug!(chat_id = chat_id, "step: answer looks foreign, translating");
            let code = profile.code.clone();
            return self
                .translate_or_keep(&completion.text, &Language::Auto, &code)
                .await;
        }
        completion.text
    }

    // ---------- Backends ----------

    async fn complete(&self, prompt: &str) -> Result<llm_client::Completion, CompletionError> {
        let completion = tokio::time::timeout(self.timeout, self.llm.complete(prompt, &self.params))
            .await
            .map_err(|_| CompletionError::Timeout(self.timeout))??;

        if completion.text.trim().is_empty() {
            return Err(CompletionError::MalformedResponse(
                "completion text is empty".to_string(),
            ));
        }
        Ok(completion)
    }

    /// Translates `text` to `target`; any failure (including timeout) returns `text` unchanged.
    async fn translate_or_keep(&self, text: &str, source: &Language, target: &str) -> String {
        let result = tokio::time::timeout(
            self.timeout,
            self.translator.translate(text, source, target),
        )
        .await
        .unwrap_or_else(|_| Err(TranslationError::Timeout(self.timeout)));

        match result {
            Ok(translated) => translated,
            Err(e) => {
                warn!(error = %e, dest = %target, "Translation error, using original text");
                text.to_string()
            }
        }
    }
}

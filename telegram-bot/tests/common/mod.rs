//! Test doubles for the ask pipeline and router: scripted completion backend, translation
//! backend, and a Bot that records what it sends.

#![allow(dead_code)]

use async_trait::async_trait;
use kiwai_core::{Bot, Chat};
use llm_client::{Completion, CompletionError, GenerationParams, LlmClient};
use memory::ConversationStore;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use storage::UsageStore;
use tempfile::TempDir;
use telegram_bot::{AiClient, BotComponents, KiwaiBot};
use translate::{Language, TranslationError, Translator};

pub const ADMIN_CHAT_ID: i64 = 999;
pub const MODEL: &str = "mock-model";

/// What the mock completion backend does on every call.
#[derive(Clone)]
pub enum LlmBehavior {
    Reply { text: String, tokens: u64 },
    Fail,
    Hang,
    /// Resets the given chat, then replies.
    ResetThenReply {
        store: Arc<ConversationStore>,
        chat_id: i64,
        text: String,
    },
}

pub struct MockLlm {
    behavior: Mutex<LlmBehavior>,
    pub prompts: Mutex<Vec<String>>,
}

impl MockLlm {
    pub fn new(behavior: LlmBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior: Mutex::new(behavior),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(text: &str, tokens: u64) -> Arc<Self> {
        Self::new(LlmBehavior::Reply {
            text: text.to_string(),
            tokens,
        })
    }

    pub fn set_behavior(&self, behavior: LlmBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<Completion, CompletionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let behavior = self.behavior.lock().unwrap().clone();
        match behavior {
            LlmBehavior::Reply { text, tokens } => Ok(Completion {
                text,
                tokens_used: tokens,
            }),
            LlmBehavior::Fail => Err(CompletionError::Api("upstream unavailable".to_string())),
            LlmBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(CompletionError::Request("unreachable".to_string()))
            }
            LlmBehavior::ResetThenReply {
                store,
                chat_id,
                text,
            } => {
                store.reset(chat_id);
                Ok(Completion {
                    text,
                    tokens_used: 5,
                })
            }
        }
    }

    fn model(&self) -> &str {
        MODEL
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum TranslatorBehavior {
    /// Returns the input unchanged.
    Identity,
    /// Returns `[<target>] <input>`.
    Tag,
    Fail,
    Hang,
}

pub struct MockTranslator {
    behavior: TranslatorBehavior,
    /// (text, source, target) per call.
    pub calls: Mutex<Vec<(String, String, String)>>,
}

impl MockTranslator {
    pub fn new(behavior: TranslatorBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn targets(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, _, target)| target.clone())
            .collect()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &Language,
        target: &str,
    ) -> Result<String, TranslationError> {
        self.calls.lock().unwrap().push((
            text.to_string(),
            source.as_str().to_string(),
            target.to_string(),
        ));
        match self.behavior {
            TranslatorBehavior::Identity => Ok(text.to_string()),
            TranslatorBehavior::Tag => Ok(format!("[{}] {}", target, text)),
            TranslatorBehavior::Fail => Err(TranslationError::Status {
                status: 503,
                body: "unavailable".to_string(),
            }),
            TranslatorBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(text.to_string())
            }
        }
    }
}

/// Records every (chat id, text) it is asked to send.
#[derive(Default)]
pub struct RecordingBot {
    pub sent: Mutex<Vec<(i64, String)>>,
}

impl RecordingBot {
    pub fn texts(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|(_, t)| t.clone()).collect()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> kiwai_core::Result<()> {
        self.sent.lock().unwrap().push((chat.id, text.to_string()));
        Ok(())
    }
}

/// Stores, ask pipeline and mocks over a fresh usage file in a temp dir.
pub struct Harness {
    pub conversations: Arc<ConversationStore>,
    pub usage: Arc<UsageStore>,
    pub ai: Arc<AiClient>,
    pub llm: Arc<MockLlm>,
    pub translator: Arc<MockTranslator>,
    pub bot: Arc<RecordingBot>,
    pub dir: TempDir,
}

impl Harness {
    pub async fn new(llm: Arc<MockLlm>, translator: Arc<MockTranslator>) -> Self {
        Self::with_timeout(llm, translator, Duration::from_secs(5)).await
    }

    pub async fn with_timeout(
        llm: Arc<MockLlm>,
        translator: Arc<MockTranslator>,
        timeout: Duration,
    ) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let usage = Arc::new(UsageStore::load(dir.path().join("usage_data.json")).await.unwrap());
        let conversations = Arc::new(ConversationStore::new());
        let ai = Arc::new(
            AiClient::new(
                llm.clone(),
                translator.clone(),
                conversations.clone(),
                usage.clone(),
            )
            .with_timeout(timeout),
        );
        Self {
            conversations,
            usage,
            ai,
            llm,
            translator,
            bot: Arc::new(RecordingBot::default()),
            dir,
        }
    }

    pub fn kiwai_bot(&self) -> KiwaiBot {
        KiwaiBot::new(BotComponents {
            bot: self.bot.clone(),
            conversations: self.conversations.clone(),
            usage: self.usage.clone(),
            ai_client: self.ai.clone(),
            command_prefix: '.',
            admin_chat_id: ADMIN_CHAT_ID,
        })
    }
}

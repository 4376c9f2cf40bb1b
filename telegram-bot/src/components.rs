//! Component factory: builds BotComponents from config. Isolates assembly logic from runner.

use anyhow::Result;
use handler_chain::HandlerChain;
use kiwai_core::Bot as CoreBot;
use llm_client::{LlmClient, LlmConfig, OpenAILlmClient};
use memory::ConversationStore;
use openai_client::mask_token;
use prompt::LanguageProfile;
use std::sync::Arc;
use storage::UsageStore;
use teloxide::prelude::*;
use tracing::{error, info, instrument};
use translate::{GoogleTranslator, Translator};

use crate::ai_client::AiClient;
use crate::config::BotConfig;
use crate::handlers::{CommandHandler, LoggingHandler, ReplyHandler};
use crate::telegram::TelegramBotAdapter;

/// Shared state and collaborators for one running bot.
#[derive(Clone)]
pub struct BotComponents {
    pub bot: Arc<dyn CoreBot>,
    pub conversations: Arc<ConversationStore>,
    pub usage: Arc<UsageStore>,
    pub ai_client: Arc<AiClient>,
    pub command_prefix: char,
    pub admin_chat_id: i64,
}

impl BotComponents {
    /// Wires stores and the ask pipeline around the given backends. Loads the usage file; a
    /// malformed file is an error.
    #[instrument(skip(config, bot, llm, translator))]
    pub async fn assemble(
        config: &BotConfig,
        bot: Arc<dyn CoreBot>,
        llm: Arc<dyn LlmClient>,
        translator: Arc<dyn Translator>,
    ) -> Result<Self> {
        let usage = Arc::new(UsageStore::load(config.usage_file()).await.map_err(|e| {
            error!(error = %e, path = %config.usage_file(), "Failed to load usage data");
            anyhow::anyhow!("Failed to load usage data from {}: {}", config.usage_file(), e)
        })?);
        let conversations = Arc::new(ConversationStore::with_capacity(config.max_history()));

        let ai = config.ai();
        let ai_client = Arc::new(
            AiClient::new(llm, translator, conversations.clone(), usage.clone())
                .with_profile(LanguageProfile::from_code(&ai.response_language))
                .with_params(ai.llm.generation_params())
                .with_working_language(ai.working_language.clone())
                .with_timeout(config.external_timeout()),
        );

        Ok(Self {
            bot,
            conversations,
            usage,
            ai_client,
            command_prefix: config.command_prefix(),
            admin_chat_id: config.admin_chat_id(),
        })
    }
}

/// teloxide Bot with the custom API URL applied when configured.
pub fn build_teloxide_bot(config: &BotConfig) -> Bot {
    let bot = Bot::new(config.bot_token());
    match config.telegram_api_url() {
        Some(url_str) => match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        },
        None => bot,
    }
}

/// Builds BotComponents with the real backends (Telegram, OpenAI-compatible completion, Google Translate).
#[instrument(skip(config, teloxide_bot))]
pub async fn build_bot_components(config: &BotConfig, teloxide_bot: Bot) -> Result<BotComponents> {
    let llm_config = &config.ai().llm;
    info!(
        base_url = %llm_config.base_url(),
        model = %llm_config.model(),
        api_key = %mask_token(llm_config.api_key()),
        "Using completion backend"
    );
    let llm: Arc<dyn LlmClient> = Arc::new(OpenAILlmClient::from_config(llm_config));

    let translator: Arc<dyn Translator> = Arc::new(
        GoogleTranslator::new(config.ai().translate_base_url.clone()).map_err(|e| {
            error!(error = %e, "Failed to build translation client");
            anyhow::anyhow!("Failed to build translation client: {}", e)
        })?,
    );

    let bot: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(teloxide_bot));
    BotComponents::assemble(config, bot, llm, translator).await
}

/// Builds the handler chain (logging → reply → command). `after` runs in reverse, so the reply
/// is sent before the outcome is logged.
pub fn build_handler_chain(components: &BotComponents) -> HandlerChain {
    let command_handler = Arc::new(CommandHandler::new(
        components.command_prefix,
        components.admin_chat_id,
        components.conversations.clone(),
        components.usage.clone(),
        components.ai_client.clone(),
    ));
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(ReplyHandler::new(components.bot.clone())))
        .add_handler(command_handler)
}

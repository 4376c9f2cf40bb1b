use anyhow::Result;
use handler_chain::HandlerChain;
use kiwai_core::{init_tracing, HandlerResponse, Message as CoreMessage};
use std::sync::Arc;
use tracing::{error, info, instrument};

use super::components::{build_bot_components, build_handler_chain, build_teloxide_bot, BotComponents};
use super::config::BotConfig;
use super::dispatcher::ChatDispatcher;
use super::telegram::run_repl;

/// KiwaiBot: components plus the handler chain built from them.
pub struct KiwaiBot {
    pub components: BotComponents,
    pub handler_chain: HandlerChain,
}

impl KiwaiBot {
    pub fn new(components: BotComponents) -> Self {
        let handler_chain = build_handler_chain(&components);
        Self {
            components,
            handler_chain,
        }
    }

    /// Drive handler chain with core Message (for integration tests). Returns the final response.
    #[doc(hidden)]
    pub async fn handle_core_message(&self, message: &CoreMessage) -> Result<HandlerResponse> {
        info!(
            user_id = message.user.id,
            message_content = %message.content,
            "Handling core message"
        );
        match self.handler_chain.handle(message).await {
            Ok(response) => Ok(response),
            Err(e) => {
                error!(error = %e, user_id = message.user.id, "Handler chain failed");
                Err(e.into())
            }
        }
    }
}

/// Main entry: validate config, init logging, build components, then run the REPL.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        usage_file = %config.usage_file(),
        admin_chat_id = config.admin_chat_id(),
        prefix = %config.command_prefix(),
        max_history = config.max_history(),
        "Initializing bot"
    );

    let teloxide_bot = build_teloxide_bot(&config);
    let components = build_bot_components(&config, teloxide_bot.clone()).await?;
    let bot = KiwaiBot::new(components);
    let dispatcher = Arc::new(ChatDispatcher::new(bot.handler_chain));

    info!("Bot started successfully");

    run_repl(teloxide_bot, dispatcher).await?;

    if let Err(e) = bot.components.usage.flush().await {
        error!(error = %e, "Failed to flush usage data on shutdown");
    }
    Ok(())
}

//! # KiwAI Telegram bot
//!
//! Wires kiwai-core, handler-chain, memory, storage, prompt, llm-client and translate into the
//! KiwAI chat bot. Loads config from env and runs the REPL; each chat is processed serially by
//! its own worker (see [`dispatcher`]).

pub mod ai_client;
pub mod cli;
pub mod components;
pub mod config;
pub mod dispatcher;
pub mod handlers;
pub mod runner;
pub mod telegram;

pub use cli::{load_config, usage_file_path, Cli, Commands};

pub use kiwai_core::{
    init_tracing, Bot, Chat, Handler, HandlerError, HandlerResponse, KiwaiError, Message, Result,
    User,
};

pub use ai_client::AiClient;
pub use components::{build_bot_components, build_handler_chain, build_teloxide_bot, BotComponents};
pub use config::{AiConfig, BaseConfig, BotConfig};
pub use dispatcher::ChatDispatcher;
pub use handlers::{parse_command, Command, CommandHandler, LoggingHandler, ReplyHandler};
pub use runner::{run_bot, KiwaiBot};
pub use telegram::{run_repl, TelegramBotAdapter, TelegramMessageWrapper, TelegramUserWrapper};

//! Bot configuration: BaseConfig (Telegram, admin, log, data paths) + AiConfig (completion, translation, languages).

mod ai;
mod base;
mod bot_config;

#[cfg(test)]
mod tests;

pub use ai::AiConfig;
pub use base::BaseConfig;
pub use bot_config::BotConfig;

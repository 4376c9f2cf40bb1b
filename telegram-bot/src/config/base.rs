//! Base config: Telegram connection, admin identity, logging, data paths, command surface. Loaded from env.

use anyhow::{bail, Context, Result};
use std::env;

/// Base config: everything that is not about the AI backends.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN or TELEGRAM_BOT_TOKEN
    pub bot_token: String,
    /// ADMIN_CHAT_ID; this chat sees global stats and may reset usage
    pub admin_chat_id: i64,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    pub log_file: String,
    /// Durable usage counters (JSON)
    pub usage_file: String,
    pub command_prefix: char,
    /// Exchanges kept per chat
    pub max_history: usize,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN")
                .or_else(|_| env::var("TELEGRAM_BOT_TOKEN"))
                .context("BOT_TOKEN (or TELEGRAM_BOT_TOKEN) not set")?,
        };
        let admin_raw = env::var("ADMIN_CHAT_ID").context("ADMIN_CHAT_ID not set")?;
        let admin_chat_id = admin_raw
            .trim()
            .parse::<i64>()
            .with_context(|| format!("ADMIN_CHAT_ID is not an integer: {}", admin_raw))?;
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/kiwai.log".to_string());
        let usage_file = env::var("USAGE_FILE").unwrap_or_else(|_| "usage_data.json".to_string());
        let command_prefix = match env::var("COMMAND_PREFIX") {
            Ok(raw) => parse_prefix(&raw)?,
            Err(_) => '.',
        };
        let max_history = match env::var("MAX_HISTORY") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("MAX_HISTORY is not a number: {}", raw))?,
            Err(_) => memory::DEFAULT_HISTORY_CAPACITY,
        };

        Ok(Self {
            bot_token,
            admin_chat_id,
            telegram_api_url,
            log_file,
            usage_file,
            command_prefix,
            max_history,
        })
    }

    /// Validate config (e.g. telegram_api_url must be valid URL if set).
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            bail!("BOT_TOKEN is empty");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if self.max_history == 0 {
            bail!("MAX_HISTORY must be at least 1");
        }
        Ok(())
    }
}

fn parse_prefix(raw: &str) -> Result<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_whitespace() => Ok(c),
        _ => bail!("COMMAND_PREFIX must be a single non-whitespace character, got {:?}", raw),
    }
}

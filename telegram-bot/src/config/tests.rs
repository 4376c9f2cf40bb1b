//! Config tests.

use crate::config::BotConfig;
use serial_test::serial;
use std::env;
use std::time::Duration;

const ALL_VARS: &[&str] = &[
    "BOT_TOKEN",
    "TELEGRAM_BOT_TOKEN",
    "ADMIN_CHAT_ID",
    "TELEGRAM_API_URL",
    "TELOXIDE_API_URL",
    "LOG_FILE",
    "USAGE_FILE",
    "COMMAND_PREFIX",
    "MAX_HISTORY",
    "GROQ_API_KEY",
    "OPENAI_API_KEY",
    "LLM_BASE_URL",
    "OPENAI_BASE_URL",
    "MODEL",
    "LLM_TEMPERATURE",
    "LLM_MAX_TOKENS",
    "RESPONSE_LANGUAGE",
    "WORKING_LANGUAGE",
    "TRANSLATE_BASE_URL",
    "EXTERNAL_TIMEOUT_SECS",
];

fn clear_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

fn set_required() {
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("ADMIN_CHAT_ID", "12345");
    env::set_var("GROQ_API_KEY", "gsk_test");
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    clear_env();
    set_required();

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.bot_token(), "test_token");
    assert_eq!(config.admin_chat_id(), 12345);
    assert!(config.telegram_api_url().is_none());
    assert_eq!(config.log_file(), "logs/kiwai.log");
    assert_eq!(config.usage_file(), "usage_data.json");
    assert_eq!(config.command_prefix(), '.');
    assert_eq!(config.max_history(), 5);
    assert_eq!(config.ai().llm.base_url, "https://api.groq.com/openai/v1");
    assert_eq!(config.ai().llm.model, "llama3-groq-70b-8192-tool-use-preview");
    assert_eq!(config.ai().response_language, "id");
    assert_eq!(config.ai().working_language, "en");
    assert_eq!(config.ai().translate_base_url, "https://translate.googleapis.com");
    assert_eq!(config.external_timeout(), Duration::from_secs(60));
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    clear_env();
    set_required();
    env::set_var("COMMAND_PREFIX", "!");
    env::set_var("MAX_HISTORY", "8");
    env::set_var("USAGE_FILE", "/tmp/usage.json");
    env::set_var("RESPONSE_LANGUAGE", "EN");
    env::set_var("EXTERNAL_TIMEOUT_SECS", "15");
    env::set_var("TELOXIDE_API_URL", "http://127.0.0.1:8081");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.command_prefix(), '!');
    assert_eq!(config.max_history(), 8);
    assert_eq!(config.usage_file(), "/tmp/usage.json");
    assert_eq!(config.ai().response_language, "en");
    assert_eq!(config.external_timeout(), Duration::from_secs(15));
    assert_eq!(config.telegram_api_url(), Some("http://127.0.0.1:8081"));
    assert!(config.validate().is_ok());
    clear_env();
}

#[test]
#[serial]
fn test_token_override_wins() {
    clear_env();
    set_required();

    let config = BotConfig::load(Some("cli_token".to_string())).unwrap();
    assert_eq!(config.bot_token(), "cli_token");
    clear_env();
}

#[test]
#[serial]
fn test_missing_required_values_fail() {
    clear_env();
    env::set_var("ADMIN_CHAT_ID", "1");
    env::set_var("GROQ_API_KEY", "gsk_test");
    assert!(BotConfig::load(None).is_err(), "missing token");

    clear_env();
    env::set_var("BOT_TOKEN", "t");
    env::set_var("GROQ_API_KEY", "gsk_test");
    assert!(BotConfig::load(None).is_err(), "missing admin id");

    clear_env();
    env::set_var("BOT_TOKEN", "t");
    env::set_var("ADMIN_CHAT_ID", "1");
    assert!(BotConfig::load(None).is_err(), "missing completion key");
    clear_env();
}

#[test]
#[serial]
fn test_malformed_values_fail() {
    clear_env();
    set_required();
    env::set_var("ADMIN_CHAT_ID", "not-a-number");
    assert!(BotConfig::load(None).is_err());

    env::set_var("ADMIN_CHAT_ID", "1");
    env::set_var("COMMAND_PREFIX", "..");
    assert!(BotConfig::load(None).is_err());

    env::remove_var("COMMAND_PREFIX");
    env::set_var("MAX_HISTORY", "five");
    assert!(BotConfig::load(None).is_err());
    clear_env();
}

#[test]
#[serial]
fn test_validate_rejects_bad_values() {
    clear_env();
    set_required();
    env::set_var("TELEGRAM_API_URL", "not a url");
    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());

    env::remove_var("TELEGRAM_API_URL");
    env::set_var("MAX_HISTORY", "0");
    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());

    env::remove_var("MAX_HISTORY");
    env::set_var("EXTERNAL_TIMEOUT_SECS", "0");
    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());
    clear_env();
}

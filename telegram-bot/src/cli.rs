//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::BotConfig;

#[derive(Parser)]
#[command(name = "kiwai")]
#[command(about = "KiwAI Telegram chat bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },

    /// Print the usage counters stored in the usage file.
    Usage {
        /// Usage file. If omitted, USAGE_FILE from env (default usage_data.json).
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Load BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}

/// Usage file for the `usage` command: `--file`, else USAGE_FILE, else the default.
pub fn usage_file_path(file: Option<PathBuf>) -> PathBuf {
    file.or_else(|| std::env::var("USAGE_FILE").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("usage_data.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_token() {
        let cli = Cli::try_parse_from(["kiwai", "run", "--token", "abc"]).unwrap();
        match cli.command {
            Commands::Run { token } => assert_eq!(token.as_deref(), Some("abc")),
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_usage_with_file() {
        let cli = Cli::try_parse_from(["kiwai", "usage", "-f", "/tmp/u.json"]).unwrap();
        match cli.command {
            Commands::Usage { file } => {
                assert_eq!(usage_file_path(file), PathBuf::from("/tmp/u.json"))
            }
            _ => panic!("expected usage"),
        }
    }
}

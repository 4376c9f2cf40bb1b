//! KiwAI binary: `run` starts the bot, `usage` prints the stored usage counters.

use anyhow::Result;
use clap::Parser;
use storage::UsageStore;
use telegram_bot::{load_config, run_bot, usage_file_path, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::Usage { file } => {
            let path = usage_file_path(file);
            let store = UsageStore::load(&path).await?;
            let record = store.snapshot().await;

            println!("Usage file: {}", path.display());
            println!("Total users: {}", record.user_count());
            println!("Total messages: {}", record.total_messages);
            println!("Total tokens: {}", record.total_tokens);
            println!("Last reset: {}", record.last_reset.to_rfc3339());
            for (chat_id, user) in &record.users {
                println!(
                    "  {}: {} messages, {} tokens, first seen {}",
                    chat_id,
                    user.messages,
                    user.tokens,
                    user.first_interaction.to_rfc3339()
                );
            }
            Ok(())
        }
    }
}

//! Command router: classifies prefixed input and turns it into a reply.
//!
//! | input (after prefix) | reply |
//! |---|---|
//! | empty | hint to type something after the prefix |
//! | `help` | help text |
//! | `reset` | resets the chat's session |
//! | `config` | per-chat config view |
//! | `info` | usage view, plus global stats for the admin chat |
//! | `context <text>` | sets the persona, or shows the usage example when `<text>` is empty |
//! | `resetusage` | admin only: zeroes all usage counters |
//! | anything else | question for [`AiClient::ask`] |
//!
//! Unprefixed messages are ignored except `/start` (and `/start@botname`).

use async_trait::async_trait;
use kiwai_core::{Handler, HandlerResponse, Message, Result};
use memory::ConversationStore;
use std::sync::Arc;
use storage::UsageStore;
use tracing::{info, instrument, warn};

use super::texts;
use crate::ai_client::AiClient;

/// A classified input. Payloads keep the user's original casing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Empty,
    Help,
    Reset,
    Config,
    Info,
    /// Persona text, trimmed; empty when the user gave none.
    Context(String),
    ResetUsage,
    Ask(String),
}

/// Classifies `text`. Returns `None` for messages the bot must ignore.
pub fn parse_command(text: &str, prefix: char) -> Option<Command> {
    if let Some(first) = text.split_whitespace().next() {
        if first == "/start" || first.starts_with("/start@") {
            return Some(Command::Start);
        }
    }

    let body = text.strip_prefix(prefix)?.trim();
    if body.is_empty() {
        return Some(Command::Empty);
    }

    let (head, rest) = match body.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (body, ""),
    };
    let command = match head.to_lowercase().as_str() {
        "context" => Command::Context(rest.to_string()),
        "help" if rest.is_empty() => Command::Help,
        "reset" if rest.is_empty() => Command::Reset,
        "config" if rest.is_empty() => Command::Config,
        "info" if rest.is_empty() => Command::Info,
        "resetusage" if rest.is_empty() => Command::ResetUsage,
        _ => Command::Ask(body.to_string()),
    };
    Some(command)
}

/// Handles every prefixed message; unprefixed ones pass through with Continue.
pub struct CommandHandler {
    prefix: char,
    admin_chat_id: i64,
    conversations: Arc<ConversationStore>,
    usage: Arc<UsageStore>,
    ai: Arc<AiClient>,
}

impl CommandHandler {
    pub fn new(
        prefix: char,
        admin_chat_id: i64,
        conversations: Arc<ConversationStore>,
        usage: Arc<UsageStore>,
        ai: Arc<AiClient>,
    ) -> Self {
        Self {
            prefix,
            admin_chat_id,
            conversations,
            usage,
            ai,
        }
    }

    fn is_admin(&self, chat_id: i64) -> bool {
        chat_id == self.admin_chat_id
    }

    /// Runs `command` for `chat_id` and returns the reply text.
    pub async fn execute(&self, chat_id: i64, command: Command) -> String {
        match command {
            Command::Start => texts::welcome(self.prefix),
            Command::Empty => texts::empty_input(self.prefix),
            Command::Help => texts::help(
                self.prefix,
                self.conversations.capacity(),
                &self.ai.profile().display_name,
            ),
            Command::Reset => {
                if self.conversations.reset(chat_id) {
                    info!(chat_id = chat_id, "Conversation reset");
                    texts::RESET_DONE.to_string()
                } else {
                    texts::NOTHING_TO_RESET.to_string()
                }
            }
            Command::Config => {
                let usage = self.usage.user(chat_id).await;
                let session = self.conversations.get(chat_id);
                texts::config_view(
                    chat_id,
                    usage.as_ref(),
                    &session,
                    self.ai.model(),
                    self.ai.profile(),
                )
            }
            Command::Info => {
                let usage = self.usage.user(chat_id).await;
                let session = self.conversations.get(chat_id);
                let global = if self.is_admin(chat_id) {
                    Some(self.usage.snapshot().await)
                } else {
                    None
                };
                texts::info_view(usage.as_ref(), &session, self.ai.profile(), global.as_ref())
            }
            Command::Context(context) if context.is_empty() => texts::context_usage(self.prefix),
            Command::Context(context) => {
                self.conversations.set_context(chat_id, context.as_str());
                info!(chat_id = chat_id, context = %context, "Context set");
                texts::context_set(&context)
            }
            Command::ResetUsage => {
                if !self.is_admin(chat_id) {
                    warn!(chat_id = chat_id, "Non-admin attempted resetusage");
                    return texts::ADMIN_ONLY.to_string();
                }
                if let Err(e) = self.usage.reset_all().await {
                    warn!(error = %e, "Usage reset but not persisted");
                }
                texts::USAGE_RESET_DONE.to_string()
            }
            Command::Ask(question) => self.ai.ask(chat_id, &question).await,
        }
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(command) = parse_command(&message.content, self.prefix) else {
            return Ok(HandlerResponse::Continue);
        };
        info!(chat_id = message.chat.id, command = ?command, "step: command parsed");
        let reply = self.execute(message.chat.id, command).await;
        Ok(HandlerResponse::Reply(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unprefixed_text_is_ignored() {
        assert_eq!(parse_command("halo", '.'), None);
        assert_eq!(parse_command(" .help", '.'), None);
    }

    #[test]
    fn test_start_with_and_without_bot_name() {
        assert_eq!(parse_command("/start", '.'), Some(Command::Start));
        assert_eq!(parse_command("/start@kiwai_bot", '.'), Some(Command::Start));
        assert_eq!(parse_command("/startx", '.'), None);
    }

    #[test]
    fn test_commands_are_case_insensitive() {
        assert_eq!(parse_command(".HELP", '.'), Some(Command::Help));
        assert_eq!(parse_command(". reset ", '.'), Some(Command::Reset));
        assert_eq!(parse_command(".Config", '.'), Some(Command::Config));
        assert_eq!(parse_command(".info", '.'), Some(Command::Info));
        assert_eq!(parse_command(".resetUsage", '.'), Some(Command::ResetUsage));
    }

    #[test]
    fn test_empty_after_prefix() {
        assert_eq!(parse_command(".", '.'), Some(Command::Empty));
        assert_eq!(parse_command(".   ", '.'), Some(Command::Empty));
    }

    #[test]
    fn test_context_keeps_payload_casing() {
        assert_eq!(
            parse_command(".Context Guru Matematika", '.'),
            Some(Command::Context("Guru Matematika".to_string()))
        );
        assert_eq!(parse_command(".context ", '.'), Some(Command::Context(String::new())));
        assert_eq!(parse_command(".context", '.'), Some(Command::Context(String::new())));
    }

    #[test]
    fn test_other_input_is_a_question() {
        assert_eq!(
            parse_command(".Apa itu Python?", '.'),
            Some(Command::Ask("Apa itu Python?".to_string()))
        );
        assert_eq!(
            parse_command(".help me with rust", '.'),
            Some(Command::Ask("help me with rust".to_string()))
        );
        assert_eq!(
            parse_command(".contextual question", '.'),
            Some(Command::Ask("contextual question".to_string()))
        );
    }

    #[test]
    fn test_custom_prefix() {
        assert_eq!(parse_command("!info", '!'), Some(Command::Info));
        assert_eq!(parse_command(".info", '!'), None);
    }
}

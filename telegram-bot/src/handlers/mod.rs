//! Handler implementations: logging, command routing, reply sending.

mod command;
mod logging;
mod reply;
pub mod texts;

pub use command::{parse_command, Command, CommandHandler};
pub use logging::LoggingHandler;
pub use reply::ReplyHandler;

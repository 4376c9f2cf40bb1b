//! Handler chain result type.

/// Handler result for the chain. `Reply(text)` carries the reply body so the reply handler can send it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; nothing to send.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach reply text.
    Reply(String),
}

impl HandlerResponse {
    /// Reply text, if any.
    pub fn reply_text(&self) -> Option<&str> {
        match self {
            HandlerResponse::Reply(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

//! PromptComposer: session snapshot + new input → one prompt string.

use memory::{ChatSession, Exchange};

use crate::language::LanguageProfile;

/// Builds prompts in one response language.
#[derive(Debug, Clone, Default)]
pub struct PromptComposer {
    profile: LanguageProfile,
}

impl PromptComposer {
    pub fn new(profile: LanguageProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &LanguageProfile {
        &self.profile
    }

    /// Renders history oldest first, the persona line (never omitted), the new input and the
    /// response-language instruction. With no history the block under the history label is empty.
    pub fn compose(&self, session: &ChatSession, input: &str) -> String {
        let p = &self.profile;
        let history = render_history(session.history.iter());
        let context = session
            .context
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(&p.no_context_marker);

        format!(
            "{}\n{}\n\n{} {}\n\n{}\n{}\n\n{}",
            p.history_label,
            history,
            p.context_label,
            context,
            p.request_label,
            input,
            p.response_instruction
        )
    }
}

fn render_history<'a>(entries: impl Iterator<Item = &'a Exchange>) -> String {
    entries
        .map(|e| format!("User: {}\nAI: {}", e.user, e.ai))
        .collect::<Vec<_>>()
        .join("\n")
}

//! # Prompt
//!
//! Builds the single prompt string sent to the completion backend, and decides whether an answer
//! needs to go back through translation.
//!
//! ## Format
//!
//! ```text
//! {history label}
//! User: …
//! AI: …
//!
//! {context label} {persona | "no special context" marker}
//!
//! {latest request label}
//! {input}
//!
//! {response-language instruction}
//! ```
//!
//! Labels, markers, the allow-list used by [`looks_foreign`], and the apology text all come from a
//! [`LanguageProfile`].
//!
//! ## External interactions
//!
//! - **AI models**: output is sent as one user message to an OpenAI-compatible chat API.

mod classifier;
mod composer;
mod language;

pub use classifier::looks_foreign;
pub use composer::PromptComposer;
pub use language::LanguageProfile;

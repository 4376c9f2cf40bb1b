//! # Translation
//!
//! The [`Translator`] interface used by the ask pipeline, and [`GoogleTranslator`], which talks to
//! the public Google Translate `translate_a/single?client=gtx` JSON endpoint.
//!
//! ## Example
//!
//! ```rust,no_run
//! use translate::{GoogleTranslator, Language, Translator};
//!
//! async fn example() -> Result<(), translate::TranslationError> {
//!     let translator = GoogleTranslator::new(translate::DEFAULT_BASE_URL)?;
//!     let english = translator.translate("apa itu python", &Language::Auto, "en").await?;
//!     println!("{}", english);
//!     Ok(())
//! }
//! ```
//!
//! ## External interactions
//!
//! - **Google Translate**: one GET per chunk of at most [`MAX_CHUNK_CHARS`] characters.

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

mod chunk;
mod google;

pub use chunk::{chunk_lines, join_chunks, Chunk, MAX_CHUNK_CHARS};
pub use google::{GoogleTranslator, DEFAULT_BASE_URL};

/// Source language of a translation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Language {
    /// Let the backend detect the language.
    Auto,
    /// Explicit language code (`en`, `id`, …).
    Code(String),
}

impl Language {
    pub fn code(code: impl Into<String>) -> Self {
        Language::Code(code.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Language::Auto => "auto",
            Language::Code(code) => code.as_str(),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Translation failures. Callers fall back to the untranslated text.
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("translation HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("translation backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed translation response: {0}")]
    Malformed(String),
    #[error("translation timed out after {0:?}")]
    Timeout(Duration),
}

/// Translation backend interface.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translates `text` from `source` into the language `target` (a code, never auto).
    async fn translate(
        &self,
        text: &str,
        source: &Language,
        target: &str,
    ) -> Result<String, TranslationError>;
}

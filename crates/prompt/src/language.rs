//! Response-language profiles.

use serde::{Deserialize, Serialize};

/// Everything that depends on the language answers are delivered in.
///
/// The Indonesian profile reproduces the deployed bot word for word; English is provided for
/// deployments that answer in English. Any other code gets [`LanguageProfile::generic`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageProfile {
    /// Translation backend code (`id`, `en`, …).
    pub code: String,
    /// Shown to users as the response language.
    pub display_name: String,
    pub history_label: String,
    pub context_label: String,
    /// Placed after `context_label` when no persona is set.
    pub no_context_marker: String,
    pub request_label: String,
    /// Closing instruction telling the model which language to answer in.
    pub response_instruction: String,
    /// Answers starting with one of these are kept as-is (see [`crate::looks_foreign`]).
    pub allowed_openings: Vec<String>,
    /// Fixed reply when an ask fails.
    pub apology: String,
    /// Rendered for an unset persona in the config view.
    pub not_set_marker: String,
    /// Rendered for an unset persona in the info view.
    pub none_marker: String,
}

impl LanguageProfile {
    pub fn indonesian() -> Self {
        Self {
            code: "id".to_string(),
            display_name: "Indonesia".to_string(),
            history_label: "Konteks percakapan sebelumnya:".to_string(),
            context_label: "Konteks tugas/peran saat ini:".to_string(),
            no_context_marker: "Belum ada konteks khusus".to_string(),
            request_label: "Pertanyaan/perintah terbaru:".to_string(),
            response_instruction: "Berikan respons dalam Bahasa Indonesia yang natural dan sesuai \
                                   dengan konteks percakapan sebelumnya."
                .to_string(),
            allowed_openings: words(&[
                "Maaf", "Hai", "Halo", "Baik", "Terima", "Saya", "Untuk", "Berikut", "Ini",
            ]),
            apology: "Maaf, terjadi kesalahan dalam memproses permintaan Anda.".to_string(),
            not_set_marker: "Belum diatur".to_string(),
            none_marker: "Tidak ada".to_string(),
        }
    }

    pub fn english() -> Self {
        Self {
            code: "en".to_string(),
            display_name: "English".to_string(),
            history_label: "Previous conversation context:".to_string(),
            context_label: "Current task/role context:".to_string(),
            no_context_marker: "No specific context yet".to_string(),
            request_label: "Latest question/instruction:".to_string(),
            response_instruction: "Respond in natural English that fits the previous conversation."
                .to_string(),
            allowed_openings: words(&[
                "Sorry", "Hi", "Hello", "Sure", "Thank", "I", "For", "Here", "This", "The", "Yes",
            ]),
            apology: "Sorry, an error occurred while processing your request.".to_string(),
            not_set_marker: "Not set".to_string(),
            none_marker: "None".to_string(),
        }
    }

    /// English labels asking for an answer in `code`. The allow-list is empty, so every answer is
    /// passed through translation to `code`.
    pub fn generic(code: &str) -> Self {
        let code = code.trim().to_lowercase();
        Self {
            display_name: code.clone(),
            response_instruction: format!(
                "Respond naturally in the language with code '{}', consistent with the previous conversation.",
                code
            ),
            allowed_openings: Vec::new(),
            code,
            ..Self::english()
        }
    }

    /// Built-in profile for `code` (case-insensitive), or a generic one.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "id" | "in" => Self::indonesian(),
            "en" => Self::english(),
            other => Self::generic(other),
        }
    }
}

impl Default for LanguageProfile {
    fn default() -> Self {
        Self::indonesian()
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

//! Output-language heuristic.

use crate::language::LanguageProfile;

/// Returns true when `text` is probably not in the profile's language and should be translated.
///
/// The trimmed answer is kept when it starts with one of `profile.allowed_openings` (plain prefix
/// match, case-sensitive). Empty answers are never sent to translation. This is a best-effort
/// normalization: an answer in the right language that opens differently is translated anyway,
/// which the translation backend leaves mostly unchanged.
pub fn looks_foreign(text: &str, profile: &LanguageProfile) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }
    !profile
        .allowed_openings
        .iter()
        .any(|opening| trimmed.starts_with(opening.as_str()))
}

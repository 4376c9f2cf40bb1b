//! Tests for [`prompt::PromptComposer`].
//!
//! Verifies section order, history rendering, context precedence across set_context/reset, and the
//! exact Indonesian layout.
//! External interactions: none (pure function tests).

use memory::ConversationStore;
use prompt::{LanguageProfile, PromptComposer};

/// **Test: With no history and no persona, the prompt matches the deployed Indonesian layout exactly.**
#[test]
fn compose_empty_session_exact_layout() {
    let composer = PromptComposer::default();
    let store = ConversationStore::new();

    let out = composer.compose(&store.get(1), "what is python");

    assert_eq!(
        out,
        "Konteks percakapan sebelumnya:\n\n\n\
         Konteks tugas/peran saat ini: Belum ada konteks khusus\n\n\
         Pertanyaan/perintah terbaru:\nwhat is python\n\n\
         Berikan respons dalam Bahasa Indonesia yang natural dan sesuai dengan konteks percakapan sebelumnya."
    );
}

/// **Test: History renders oldest first as "User: …\nAI: …" lines before the context line.**
#[test]
fn compose_renders_history_in_order() {
    let composer = PromptComposer::new(LanguageProfile::english());
    let store = ConversationStore::new();
    store.append_exchange(5, "first question", "first answer");
    store.append_exchange(5, "second question", "second answer");

    let out = composer.compose(&store.get(5), "third question");

    let expected_history =
        "User: first question\nAI: first answer\nUser: second question\nAI: second answer";
    assert!(out.starts_with(&format!("Previous conversation context:\n{}\n\n", expected_history)));
    let first = out.find("first question").unwrap();
    let second = out.find("second question").unwrap();
    let context = out.find("Current task/role context:").unwrap();
    let latest = out.find("third question").unwrap();
    assert!(first < second && second < context && context < latest);
    assert!(out.ends_with("Respond in natural English that fits the previous conversation."));
}

/// **Test: After set_context the persona is in the next prompt; after reset it is gone.**
#[test]
fn compose_context_precedence() {
    let composer = PromptComposer::default();
    let store = ConversationStore::new();

    store.set_context(3, "math teacher");
    let with_context = composer.compose(&store.get(3), "2+2?");
    assert!(with_context.contains("Konteks tugas/peran saat ini: math teacher"));

    store.reset(3);
    let after_reset = composer.compose(&store.get(3), "2+2?");
    assert!(!after_reset.contains("math teacher"));
    assert!(after_reset.contains("Konteks tugas/peran saat ini: Belum ada konteks khusus"));
}

/// **Test: Chat 42 with persona "chef" embeds both the persona and the question.**
#[test]
fn compose_chef_scenario() {
    let composer = PromptComposer::default();
    let store = ConversationStore::new();
    store.set_context(42, "chef");

    let out = composer.compose(&store.get(42), "halo apa kabar");

    assert!(out.contains("chef"));
    assert!(out.contains("Pertanyaan/perintah terbaru:\nhalo apa kabar"));
}

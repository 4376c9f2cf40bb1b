//! Command routing through the full handler chain (logging → reply → command) with mock backends.

mod common;

use common::{Harness, MockLlm, MockTranslator, TranslatorBehavior, ADMIN_CHAT_ID, MODEL};
use kiwai_core::{HandlerResponse, Message};
use telegram_bot::handlers::texts;

async fn harness() -> Harness {
    Harness::new(
        MockLlm::replying("Halo! Ada yang bisa saya bantu?", 42),
        MockTranslator::new(TranslatorBehavior::Identity),
    )
    .await
}

/// **Test: unprefixed input gets no reply and changes nothing.**
#[tokio::test]
async fn test_unprefixed_message_is_ignored() {
    let h = harness().await;
    let bot = h.kiwai_bot();

    let response = bot
        .handle_core_message(&Message::incoming_text(1, "halo apa kabar"))
        .await
        .unwrap();

    assert_eq!(response, HandlerResponse::Continue);
    assert!(h.bot.texts().is_empty());
    assert!(!h.conversations.contains(1));
    assert_eq!(h.llm.calls(), 0);
    assert_eq!(h.usage.snapshot().await.total_messages, 0);
}

/// **Test: /start and /start@botname answer with the welcome text.**
#[tokio::test]
async fn test_start_replies_with_welcome() {
    let h = harness().await;
    let bot = h.kiwai_bot();

    bot.handle_core_message(&Message::incoming_text(1, "/start"))
        .await
        .unwrap();
    bot.handle_core_message(&Message::incoming_text(1, "/start@kiwai_bot"))
        .await
        .unwrap();

    assert_eq!(h.bot.texts(), vec![texts::welcome('.'), texts::welcome('.')]);
}

/// **Test: a bare prefix asks the user to type something.**
#[tokio::test]
async fn test_empty_command_hint() {
    let h = harness().await;
    let bot = h.kiwai_bot();

    bot.handle_core_message(&Message::incoming_text(1, ".  "))
        .await
        .unwrap();

    assert_eq!(h.bot.texts(), vec![texts::empty_input('.')]);
    assert_eq!(h.llm.calls(), 0);
}

/// **Test: .reset clears history and context and confirms; a second reset is the same as one.**
#[tokio::test]
async fn test_reset_clears_session() {
    let h = harness().await;
    let bot = h.kiwai_bot();
    h.conversations.set_context(5, "guru matematika");
    h.conversations.append_exchange(5, "q", "a");

    bot.handle_core_message(&Message::incoming_text(5, ".reset"))
        .await
        .unwrap();
    let after_first = h.conversations.get(5);
    bot.handle_core_message(&Message::incoming_text(5, ".RESET"))
        .await
        .unwrap();
    let after_second = h.conversations.get(5);

    assert!(after_first.context.is_none());
    assert!(after_first.history.is_empty());
    assert_eq!(after_first.history, after_second.history);
    assert_eq!(after_first.context, after_second.context);
    assert_eq!(h.bot.texts()[0], texts::RESET_DONE);
}

/// **Test: .reset on a chat that never talked reports nothing to reset.**
#[tokio::test]
async fn test_reset_without_session() {
    let h = harness().await;
    let bot = h.kiwai_bot();

    bot.handle_core_message(&Message::incoming_text(77, ".reset"))
        .await
        .unwrap();

    assert_eq!(h.bot.texts(), vec![texts::NOTHING_TO_RESET.to_string()]);
}

/// **Test: ".context " without a persona shows the usage example and sets nothing.**
#[tokio::test]
async fn test_context_without_text_shows_usage() {
    let h = harness().await;
    let bot = h.kiwai_bot();

    bot.handle_core_message(&Message::incoming_text(3, ".context "))
        .await
        .unwrap();

    assert_eq!(h.bot.texts(), vec![texts::context_usage('.')]);
    assert!(h.conversations.get(3).context.is_none());
    assert_eq!(h.llm.calls(), 0);
}

/// **Test: .context keeps the persona's casing and confirms it.**
#[tokio::test]
async fn test_context_sets_persona() {
    let h = harness().await;
    let bot = h.kiwai_bot();

    bot.handle_core_message(&Message::incoming_text(3, ".context Chef Profesional"))
        .await
        .unwrap();

    assert_eq!(
        h.conversations.get(3).context.as_deref(),
        Some("Chef Profesional")
    );
    assert_eq!(h.bot.texts(), vec![texts::context_set("Chef Profesional")]);
}

/// **Test: chat 42 sets "chef", then asks; the prompt embeds both and history holds one exchange.**
#[tokio::test]
async fn test_context_then_question_scenario() {
    let h = harness().await;
    let bot = h.kiwai_bot();

    bot.handle_core_message(&Message::incoming_text(42, ".context chef"))
        .await
        .unwrap();
    bot.handle_core_message(&Message::incoming_text(42, ".halo apa kabar"))
        .await
        .unwrap();

    let prompt = h.llm.last_prompt().unwrap();
    assert!(prompt.contains("chef"));
    assert!(prompt.contains("halo apa kabar"));

    let session = h.conversations.get(42);
    assert_eq!(session.history.len(), 1);
    let exchange = session.history.iter().next().unwrap();
    assert_eq!(exchange.user, "halo apa kabar");
    assert_eq!(exchange.ai, "Halo! Ada yang bisa saya bantu?");

    assert_eq!(
        h.bot.texts().last().map(String::as_str),
        Some("Halo! Ada yang bisa saya bantu?")
    );
}

/// **Test: .help renders the configured history size.**
#[tokio::test]
async fn test_help_text() {
    let h = harness().await;
    let bot = h.kiwai_bot();

    bot.handle_core_message(&Message::incoming_text(1, ".help"))
        .await
        .unwrap();

    let texts = h.bot.texts();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("Mengingat 5 percakapan terakhir"));
}

/// **Test: .config shows counters, history fill, persona, model and response language.**
#[tokio::test]
async fn test_config_view() {
    let h = harness().await;
    let bot = h.kiwai_bot();

    bot.handle_core_message(&Message::incoming_text(8, ".apa itu rust"))
        .await
        .unwrap();
    h.bot.clear();
    bot.handle_core_message(&Message::incoming_text(8, ".config"))
        .await
        .unwrap();

    let text = &h.bot.texts()[0];
    assert!(text.contains("Konfigurasi Chat ID: 8"));
    assert!(text.contains("- Total Pesan: 1"));
    assert!(text.contains("- Total Token: 42"));
    assert!(text.contains("- Pesan dalam History: 1/5"));
    assert!(text.contains("- Konteks Saat Ini: Belum diatur"));
    assert!(text.contains(&format!("- Mode AI: {}", MODEL)));
    assert!(text.contains("- Bahasa Respons: Indonesia"));
}

/// **Test: .info shows global stats only to the admin chat.**
#[tokio::test]
async fn test_info_global_stats_for_admin_only() {
    let h = harness().await;
    let bot = h.kiwai_bot();

    bot.handle_core_message(&Message::incoming_text(8, ".apa itu rust"))
        .await
        .unwrap();
    h.bot.clear();

    bot.handle_core_message(&Message::incoming_text(8, ".info"))
        .await
        .unwrap();
    bot.handle_core_message(&Message::incoming_text(ADMIN_CHAT_ID, ".info"))
        .await
        .unwrap();

    let texts = h.bot.texts();
    assert!(texts[0].contains("- Total Token: 42"));
    assert!(!texts[0].contains("Statistik Global"));
    assert!(texts[1].contains("Statistik Global:"));
    assert!(texts[1].contains("- Total Pengguna: 1"));
    assert!(texts[1].contains("- Total Pesan: 1"));
}

/// **Test: .resetusage is refused for non-admins and zeroes counters for the admin.**
#[tokio::test]
async fn test_reset_usage_is_admin_only() {
    let h = harness().await;
    let bot = h.kiwai_bot();

    bot.handle_core_message(&Message::incoming_text(8, ".apa itu rust"))
        .await
        .unwrap();
    h.bot.clear();

    bot.handle_core_message(&Message::incoming_text(8, ".resetusage"))
        .await
        .unwrap();
    assert_eq!(h.bot.texts(), vec![texts::ADMIN_ONLY.to_string()]);
    assert_eq!(h.usage.snapshot().await.total_messages, 1);

    bot.handle_core_message(&Message::incoming_text(ADMIN_CHAT_ID, ".resetusage"))
        .await
        .unwrap();
    let record = h.usage.snapshot().await;
    assert_eq!(record.total_messages, 0);
    assert_eq!(record.total_tokens, 0);
    assert!(record.users.is_empty());
    assert_eq!(h.bot.texts()[1], texts::USAGE_RESET_DONE);
}

/// **Test: replies longer than one Telegram message are sent in pieces.**
#[tokio::test]
async fn test_long_reply_is_split() {
    let long = format!("Berikut jawabannya:\n{}", "x".repeat(5000));
    let h = Harness::new(
        MockLlm::replying(&long, 1),
        MockTranslator::new(TranslatorBehavior::Identity),
    )
    .await;
    let bot = h.kiwai_bot();

    bot.handle_core_message(&Message::incoming_text(1, ".tulis panjang"))
        .await
        .unwrap();

    let texts = h.bot.texts();
    assert!(texts.len() >= 2);
    assert!(texts
        .iter()
        .all(|t| kiwai_core::utf16_len(t) <= kiwai_core::MAX_REPLY_UNITS));
    assert_eq!(texts.concat(), long);
}

/// **Test: the chain runs under a plain blocking test via tokio_test::block_on.**
#[test]
fn test_help_from_blocking_context() {
    tokio_test::block_on(async {
        let h = harness().await;
        let bot = h.kiwai_bot();
        let response = bot
            .handle_core_message(&Message::incoming_text(1, ".help"))
            .await
            .unwrap();
        assert!(response.reply_text().unwrap().starts_with("KiwAI Bot - Panduan Penggunaan:"));
    });
}

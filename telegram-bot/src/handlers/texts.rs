//! User-facing texts (Indonesian). Rendered with the configured command prefix.

use chrono::{DateTime, Local, Utc};
use memory::ChatSession;
use prompt::LanguageProfile;
use storage::{UsageRecord, UserUsage};

pub const RESET_DONE: &str = "✅ Konteks dan history percakapan Anda telah direset!";
pub const NOTHING_TO_RESET: &str = "Tidak ada konteks percakapan yang perlu direset.";
pub const USAGE_RESET_DONE: &str = "✅ Statistik penggunaan telah direset.";
pub const ADMIN_ONLY: &str = "Perintah ini hanya untuk admin.";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn welcome(prefix: char) -> String {
    format!(
        "Halo! Saya KiwAI, asisten AI yang siap membantu Anda.\n\
         \n\
         Untuk berinteraksi dengan saya, gunakan prefix '{p}' di awal pesan Anda.\n\
         Contoh: {p}apa itu python\n\
         \n\
         Perintah yang tersedia:\n\
         /start - Memulai bot\n\
         {p}help - Menampilkan panduan lengkap\n\
         {p}reset - Mereset percakapan (khusus chat ID Anda)\n\
         {p}config - Melihat konfigurasi (khusus chat ID Anda)\n\
         {p}info - Melihat statistik penggunaan\n\
         {p}context [peran] - Mengatur konteks/peran AI (contoh: {p}context guru matematika)\n\
         \n\
         Silakan mulai chat dengan mengetik pesan yang diawali dengan '{p}'!",
        p = prefix
    )
}

pub fn help(prefix: char, max_history: usize, response_language: &str) -> String {
    format!(
        "KiwAI Bot - Panduan Penggunaan:\n\
         \n\
         Cara Menggunakan Bot:\n\
         1. Selalu awali pesan Anda dengan '{p}'\n\
         2. Ketik pertanyaan atau perintah setelah tanda '{p}'\n\
         \x20  Contoh: {p}jelaskan tentang AI\n\
         \n\
         Perintah Tersedia:\n\
         {p}help - Menampilkan panduan ini\n\
         {p}reset - Mereset konteks percakapan Anda\n\
         {p}config - Melihat konfigurasi Anda\n\
         {p}info - Melihat statistik penggunaan Anda\n\
         {p}context [peran] - Mengatur konteks/peran AI\n\
         \x20 Contoh:\n\
         \x20 - {p}context guru matematika\n\
         \x20 - {p}context chef profesional\n\
         \x20 - {p}context konsultan bisnis\n\
         \n\
         Fitur:\n\
         - Mendukung berbagai bahasa input\n\
         - Selalu merespons dalam Bahasa {lang}\n\
         - Respons cerdas dengan AI\n\
         - Mengingat {n} percakapan terakhir\n\
         - Konteks percakapan yang dapat disesuaikan\n\
         - Pelacakan penggunaan\n\
         \n\
         Tips:\n\
         - Gunakan {p}context untuk mengatur peran AI sesuai kebutuhan\n\
         - Bot akan mengingat {n} percakapan terakhir Anda\n\
         - Gunakan {p}reset jika ingin memulai percakapan baru\n\
         - Bot hanya akan merespons pesan yang diawali dengan '{p}'",
        p = prefix,
        n = max_history,
        lang = response_language
    )
}

pub fn empty_input(prefix: char) -> String {
    format!("Silakan ketik pertanyaan atau perintah setelah tanda '{}'", prefix)
}

pub fn context_set(context: &str) -> String {
    format!("✅ Konteks percakapan diatur sebagai: {}", context)
}

pub fn context_usage(prefix: char) -> String {
    format!(
        "Mohon tentukan konteks/peran untuk AI. Contoh: {}context guru matematika",
        prefix
    )
}

/// Per-chat config view: usage counters, session state, model and response language.
pub fn config_view(
    chat_id: i64,
    usage: Option<&UserUsage>,
    session: &ChatSession,
    model: &str,
    profile: &LanguageProfile,
) -> String {
    let (messages, tokens) = counters(usage);
    let first = usage
        .map(|u| local_time(&u.first_interaction))
        .unwrap_or_else(|| profile.none_marker.clone());
    let context = session
        .context
        .as_deref()
        .unwrap_or(profile.not_set_marker.as_str());

    format!(
        "📊 Konfigurasi Chat ID: {chat_id}\n\
         \n\
         Statistik Penggunaan Anda:\n\
         - Total Pesan: {messages}\n\
         - Total Token: {tokens}\n\
         - Pertama Kali Menggunakan: {first}\n\
         \n\
         Status Percakapan:\n\
         - Pesan dalam History: {len}/{cap}\n\
         - Konteks Saat Ini: {context}\n\
         - Mode AI: {model}\n\
         - Bahasa Respons: {lang}",
        len = session.history.len(),
        cap = session.history.capacity(),
        lang = profile.display_name,
    )
}

/// Usage view. `global` is only passed for the admin chat.
pub fn info_view(
    usage: Option<&UserUsage>,
    session: &ChatSession,
    profile: &LanguageProfile,
    global: Option<&UsageRecord>,
) -> String {
    let (messages, tokens) = counters(usage);
    let context = session
        .context
        .as_deref()
        .unwrap_or(profile.none_marker.as_str());

    let mut text = format!(
        "📈 Statistik Penggunaan:\n\
         \n\
         Penggunaan Pribadi Anda:\n\
         - Total Pesan: {messages}\n\
         - Total Token: {tokens}\n\
         - Pesan dalam History: {len}/{cap}\n\
         - Konteks Aktif: {context}",
        len = session.history.len(),
        cap = session.history.capacity(),
    );

    if let Some(record) = global {
        text.push_str(&format!(
            "\n\n\
             Statistik Global:\n\
             - Total Pengguna: {users}\n\
             - Total Pesan: {messages}\n\
             - Total Token: {tokens}\n\
             - Terakhir Reset: {reset}",
            users = record.user_count(),
            messages = record.total_messages,
            tokens = record.total_tokens,
            reset = local_time(&record.last_reset),
        ));
    }
    text
}

fn counters(usage: Option<&UserUsage>) -> (u64, u64) {
    usage.map(|u| (u.messages, u.tokens)).unwrap_or((0, 0))
}

fn local_time(t: &DateTime<Utc>) -> String {
    t.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string()
}

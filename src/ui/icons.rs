//! Shared UI icons and emojis.
//!
//! Each icon carries a plain-text fallback for terminals without emoji support.

use console::Emoji;

// Status indicators
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR]");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!]");

// Domain indicators
pub static FOLDER: Emoji<'_, '_> = Emoji("📁 ", "");
pub static HIVE: Emoji<'_, '_> = Emoji("🐝 ", "[H]");
pub static CHAT: Emoji<'_, '_> = Emoji("💬 ", "[C]");
pub static REPORT: Emoji<'_, '_> = Emoji("📊 ", "[R]");
pub static HEAL: Emoji<'_, '_> = Emoji("🩹 ", "[+]");

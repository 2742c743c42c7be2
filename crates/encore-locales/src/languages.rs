//! Display metadata for language codes.
//!
//! The table covers the most widely used Discord community languages;
//! everything else still gets a usable label through the fallback.

use crate::catalog::{CANONICAL_CODE, PROTECTED_CODE};

/// Static metadata for one known language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
    pub emoji: &'static str,
}

/// Languages with curated names and flags.
pub const KNOWN_LANGUAGES: &[LanguageInfo] = &[
    LanguageInfo { code: "en", name: "English", native_name: "English", emoji: "🇬🇧" },
    LanguageInfo { code: "de", name: "German", native_name: "Deutsch", emoji: "🇩🇪" },
    LanguageInfo { code: "es", name: "Spanish", native_name: "Español", emoji: "🇪🇸" },
    LanguageInfo { code: "fr", name: "French", native_name: "Français", emoji: "🇫🇷" },
    LanguageInfo { code: "it", name: "Italian", native_name: "Italiano", emoji: "🇮🇹" },
    LanguageInfo { code: "nl", name: "Dutch", native_name: "Nederlands", emoji: "🇳🇱" },
    LanguageInfo { code: "pl", name: "Polish", native_name: "Polski", emoji: "🇵🇱" },
    LanguageInfo { code: "pt", name: "Portuguese", native_name: "Português", emoji: "🇵🇹" },
    LanguageInfo { code: "pt-BR", name: "Portuguese (Brazil)", native_name: "Português (Brasil)", emoji: "🇧🇷" },
    LanguageInfo { code: "tr", name: "Turkish", native_name: "Türkçe", emoji: "🇹🇷" },
    LanguageInfo { code: "ru", name: "Russian", native_name: "Русский", emoji: "🇷🇺" },
    LanguageInfo { code: "uk", name: "Ukrainian", native_name: "Українська", emoji: "🇺🇦" },
    LanguageInfo { code: "ar", name: "Arabic", native_name: "العربية", emoji: "🇸🇦" },
    LanguageInfo { code: "hi", name: "Hindi", native_name: "हिन्दी", emoji: "🇮🇳" },
    LanguageInfo { code: "bn", name: "Bengali", native_name: "বাংলা", emoji: "🇧🇩" },
    LanguageInfo { code: "ur", name: "Urdu", native_name: "اردو", emoji: "🇵🇰" },
    LanguageInfo { code: "fa", name: "Persian", native_name: "فارسی", emoji: "🇮🇷" },
    LanguageInfo { code: "id", name: "Indonesian", native_name: "Bahasa Indonesia", emoji: "🇮🇩" },
    LanguageInfo { code: "ms", name: "Malay", native_name: "Bahasa Melayu", emoji: "🇲🇾" },
    LanguageInfo { code: "vi", name: "Vietnamese", native_name: "Tiếng Việt", emoji: "🇻🇳" },
    LanguageInfo { code: "th", name: "Thai", native_name: "ไทย", emoji: "🇹🇭" },
    LanguageInfo { code: "ja", name: "Japanese", native_name: "日本語", emoji: "🇯🇵" },
    LanguageInfo { code: "ko", name: "Korean", native_name: "한국어", emoji: "🇰🇷" },
    LanguageInfo { code: "zh-CN", name: "Chinese (Simplified)", native_name: "简体中文", emoji: "🇨🇳" },
    LanguageInfo { code: "zh-TW", name: "Chinese (Traditional)", native_name: "繁體中文", emoji: "🇹🇼" },
];

/// Presentation label for a language code, owned so unknown codes can
/// be labelled too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageLabel {
    pub code: String,
    pub name: String,
    pub native_name: String,
    pub emoji: String,
}

impl LanguageLabel {
    /// "English" where name and native name agree, otherwise
    /// "German (Deutsch)".
    pub fn display_name(&self) -> String {
        if self.native_name == self.name {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.native_name)
        }
    }
}

/// Label for any code. Codes outside the curated table fall back to
/// the code itself with a globe emoji.
pub fn label_for(code: &str) -> LanguageLabel {
    match KNOWN_LANGUAGES.iter().find(|info| info.code == code) {
        Some(info) => LanguageLabel {
            code: info.code.to_string(),
            name: info.name.to_string(),
            native_name: info.native_name.to_string(),
            emoji: info.emoji.to_string(),
        },
        None => LanguageLabel {
            code: code.to_string(),
            name: code.to_string(),
            native_name: code.to_string(),
            emoji: "🌐".to_string(),
        },
    }
}

/// Labels for a set of codes, canonical and protected languages
/// pinned to the front, the rest alphabetical by English name.
pub fn list_labels(codes: &[&str]) -> Vec<LanguageLabel> {
    let mut labels: Vec<LanguageLabel> = codes.iter().map(|code| label_for(code)).collect();
    labels.sort_by(|a, b| {
        pin_rank(&a.code)
            .cmp(&pin_rank(&b.code))
            .then_with(|| a.name.cmp(&b.name))
    });
    labels
}

fn pin_rank(code: &str) -> u8 {
    match code {
        CANONICAL_CODE => 0,
        PROTECTED_CODE => 1,
        _ => 2,
    }
}

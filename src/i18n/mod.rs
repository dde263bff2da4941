// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Strings live in embedded Fluent resources (`assets/i18n/<code>.ftl`). A
//! dotted key such as `upload.title` addresses the `title` attribute of the
//! `upload` message. The active language is held by a single
//! [`store::LanguageStore`] and every [`fluent::Translator`] observes it.
//!
//! # Features
//!
//! - Fixed set of four UI languages, see [`Language`]
//! - Language picked from CLI, then config, then English
//! - Runtime language switching, persisted to `settings.toml`
//! - Missing keys render as the raw key, never as another language

pub mod fluent;
pub mod store;

pub use fluent::{Catalog, Translator};
pub use store::LanguageStore;

/// Supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Ko,
    Zh,
    Ar,
}

/// Layout direction for a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl Language {
    /// All languages, in language-selector order.
    pub const ALL: [Language; 4] = [Language::En, Language::Ko, Language::Zh, Language::Ar];

    /// Persisted code for this language.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ko => "ko",
            Language::Zh => "zh",
            Language::Ar => "ar",
        }
    }

    /// Parses one of the four supported codes. Matching is exact.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    /// Name of the language written in that language.
    #[must_use]
    pub fn native_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ko => "한국어",
            Language::Zh => "繁體中文",
            Language::Ar => "العربية",
        }
    }

    /// Right-to-left only for Arabic.
    #[must_use]
    pub fn direction(self) -> TextDirection {
        match self {
            Language::Ar => TextDirection::Rtl,
            Language::En | Language::Ko | Language::Zh => TextDirection::Ltr,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.native_name())
    }
}

/// Picks the startup language: a valid CLI code wins, then a valid
/// configured code, then English.
#[must_use]
pub fn resolve_language(cli_lang: Option<&str>, configured: Option<&str>) -> Language {
    cli_lang
        .and_then(Language::from_code)
        .or_else(|| configured.and_then(Language::from_code))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
    }

    #[test]
    fn unknown_codes_are_rejected() {
        for code in ["fr", "EN", "en-US", "", "ko "] {
            assert_eq!(Language::from_code(code), None, "{code:?}");
        }
    }

    #[test]
    fn only_arabic_is_rtl() {
        assert_eq!(Language::Ar.direction(), TextDirection::Rtl);
        for lang in [Language::En, Language::Ko, Language::Zh] {
            assert_eq!(lang.direction(), TextDirection::Ltr);
        }
    }

    #[test]
    fn resolve_language_prefers_cli_then_config() {
        assert_eq!(resolve_language(Some("zh"), Some("ko")), Language::Zh);
        assert_eq!(resolve_language(Some("xx"), Some("ko")), Language::Ko);
        assert_eq!(resolve_language(None, Some("nope")), Language::En);
        assert_eq!(resolve_language(None, None), Language::En);
    }
}

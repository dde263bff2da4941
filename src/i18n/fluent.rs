// SPDX-License-Identifier: MPL-2.0
//! Fluent-backed string catalog and the translator handle views use.

use super::{Language, TextDirection};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

/// Parsed Fluent bundles for every supported language.
pub struct Catalog {
    bundles: HashMap<Language, FluentBundle<FluentResource>>,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("languages", &self.bundles.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Catalog {
    /// Builds the catalog from the `.ftl` files compiled into the binary.
    #[must_use]
    pub fn embedded() -> Self {
        let sources = Language::ALL.into_iter().filter_map(|lang| {
            let file = format!("{}.ftl", lang.code());
            match Asset::get(&file) {
                Some(content) => Some((
                    lang,
                    String::from_utf8_lossy(content.data.as_ref()).into_owned(),
                )),
                None => {
                    tracing::warn!(file, "translation file missing from bundle");
                    None
                }
            }
        });
        Self::from_sources(sources)
    }

    /// Builds a catalog from raw Fluent sources.
    ///
    /// Syntax errors are logged; the entries that did parse are kept.
    pub fn from_sources(sources: impl IntoIterator<Item = (Language, String)>) -> Self {
        let bundles = sources
            .into_iter()
            .filter_map(|(lang, source)| build_bundle(lang, source).map(|bundle| (lang, bundle)))
            .collect();
        Self { bundles }
    }

    #[must_use]
    pub fn has_language(&self, language: Language) -> bool {
        self.bundles.contains_key(&language)
    }

    /// Resolves `key` for `language`, returning the raw key when anything is
    /// missing.
    #[must_use]
    pub fn resolve(&self, language: Language, key: &str, args: Option<&FluentArgs<'_>>) -> String {
        self.lookup(language, key, args)
            .unwrap_or_else(|| key.to_string())
    }

    fn lookup(&self, language: Language, key: &str, args: Option<&FluentArgs<'_>>) -> Option<String> {
        let bundle = self.bundles.get(&language)?;

        let mut segments = key.split('.');
        let id = segments.next()?;
        let attribute = segments.next();
        if segments.next().is_some() {
            return None;
        }

        let message = bundle.get_message(id)?;
        let pattern = match attribute {
            Some(name) => message.get_attribute(name)?.value(),
            None => message.value()?,
        };

        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            tracing::debug!(key, ?errors, "failed to format translation");
            return None;
        }

        let value = value.into_owned();
        (!value.is_empty()).then_some(value)
    }
}

fn build_bundle(language: Language, source: String) -> Option<FluentBundle<FluentResource>> {
    let locale: LanguageIdentifier = match language.code().parse() {
        Ok(locale) => locale,
        Err(err) => {
            tracing::warn!(code = language.code(), %err, "invalid locale identifier");
            return None;
        }
    };

    let resource = FluentResource::try_new(source).unwrap_or_else(|(partial, errors)| {
        tracing::warn!(code = language.code(), count = errors.len(), "syntax errors in translation file");
        partial
    });

    let mut bundle = FluentBundle::new_concurrent(vec![locale]);
    // Bidi isolation marks show up as stray glyphs in iced text widgets.
    bundle.set_use_isolating(false);
    if let Err(errors) = bundle.add_resource(resource) {
        tracing::warn!(code = language.code(), ?errors, "conflicting translation entries");
    }
    Some(bundle)
}

fn to_fluent_args<'a>(args: &'a [(&'a str, &'a str)]) -> FluentArgs<'a> {
    let mut fluent_args = FluentArgs::new();
    for (name, value) in args {
        // Numbers go in as numbers so plural selectors work.
        match value.parse::<i64>() {
            Ok(number) => fluent_args.set(*name, FluentValue::from(number)),
            Err(_) => fluent_args.set(*name, FluentValue::from(*value)),
        }
    }
    fluent_args
}

/// A cheap, clonable view of the catalog that follows the active language.
///
/// Every translator built from the same [`super::LanguageStore`] observes the
/// same value, so a language switch through any handle is picked up by all of
/// them on their next `resolve`.
#[derive(Debug, Clone)]
pub struct Translator {
    catalog: Arc<Catalog>,
    language: watch::Receiver<Language>,
}

impl Translator {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, language: watch::Receiver<Language>) -> Self {
        Self { catalog, language }
    }

    #[must_use]
    pub fn language(&self) -> Language {
        *self.language.borrow()
    }

    #[must_use]
    pub fn direction(&self) -> TextDirection {
        self.language().direction()
    }

    #[must_use]
    pub fn is_rtl(&self) -> bool {
        self.direction() == TextDirection::Rtl
    }

    /// Resolves a dotted key such as `results.title`.
    #[must_use]
    pub fn resolve(&self, key: &str) -> String {
        self.catalog.resolve(self.language(), key, None)
    }

    /// Resolves a key with `{ $name }` placeables filled from `args`.
    #[must_use]
    pub fn resolve_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let fluent_args = to_fluent_args(args);
        self.catalog.resolve(self.language(), key, Some(&fluent_args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EN: &str = r#"
greeting = Hello
upload =
    .title = Upload patient data
    .empty = { "" }
count = { $count ->
    [one] One patient
   *[other] { $count } patients
}
"#;

    const KO: &str = r#"
upload =
    .title = 환자 데이터 업로드
"#;

    fn translator(language: Language) -> (Translator, watch::Sender<Language>) {
        let catalog = Arc::new(Catalog::from_sources([
            (Language::En, EN.to_string()),
            (Language::Ko, KO.to_string()),
        ]));
        let (tx, rx) = watch::channel(language);
        (Translator::new(catalog, rx), tx)
    }

    #[test]
    fn single_segment_resolves_message_value() {
        let (tr, _tx) = translator(Language::En);
        assert_eq!(tr.resolve("greeting"), "Hello");
    }

    #[test]
    fn two_segments_resolve_attribute() {
        let (tr, _tx) = translator(Language::En);
        assert_eq!(tr.resolve("upload.title"), "Upload patient data");
    }

    #[test]
    fn missing_segments_return_raw_key() {
        let (tr, _tx) = translator(Language::En);
        assert_eq!(tr.resolve("upload.nope"), "upload.nope");
        assert_eq!(tr.resolve("nope"), "nope");
        assert_eq!(tr.resolve("upload"), "upload");
        assert_eq!(tr.resolve("upload.title.extra"), "upload.title.extra");
        assert_eq!(tr.resolve(""), "");
    }

    #[test]
    fn empty_translation_returns_raw_key() {
        let (tr, _tx) = translator(Language::En);
        assert_eq!(tr.resolve("upload.empty"), "upload.empty");
    }

    #[test]
    fn no_fallback_to_other_language() {
        let (tr, _tx) = translator(Language::Ko);
        assert_eq!(tr.resolve("upload.title"), "환자 데이터 업로드");
        assert_eq!(tr.resolve("greeting"), "greeting");
    }

    #[test]
    fn language_without_bundle_returns_raw_key() {
        let (tr, _tx) = translator(Language::Zh);
        assert_eq!(tr.resolve("greeting"), "greeting");
    }

    #[test]
    fn args_select_plural_variant() {
        let (tr, _tx) = translator(Language::En);
        assert_eq!(tr.resolve_with_args("count", &[("count", "1")]), "One patient");
        assert_eq!(tr.resolve_with_args("count", &[("count", "4")]), "4 patients");
    }

    #[test]
    fn translator_follows_channel_updates() {
        let (tr, tx) = translator(Language::En);
        assert_eq!(tr.resolve("upload.title"), "Upload patient data");
        tx.send_replace(Language::Ko);
        assert_eq!(tr.resolve("upload.title"), "환자 데이터 업로드");
    }

    #[test]
    fn embedded_catalog_has_all_languages() {
        let catalog = Catalog::embedded();
        for lang in Language::ALL {
            assert!(catalog.has_language(lang), "{lang:?} missing");
        }
    }
}

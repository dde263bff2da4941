// SPDX-License-Identifier: MPL-2.0
//! Process-wide observable language preference.

use super::fluent::{Catalog, Translator};
use super::Language;
use crate::app::config;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;

/// Single source of truth for the active UI language.
///
/// Cloning the store yields another handle on the same channel. Translators
/// built with [`LanguageStore::translator`] subscribe to it.
#[derive(Debug, Clone)]
pub struct LanguageStore {
    sender: Arc<watch::Sender<Language>>,
    /// Directory holding `settings.toml`; `None` uses the standard resolution.
    config_dir: Option<PathBuf>,
}

impl LanguageStore {
    #[must_use]
    pub fn new(initial: Language) -> Self {
        Self::with_config_dir(initial, None)
    }

    #[must_use]
    pub fn with_config_dir(initial: Language, config_dir: Option<PathBuf>) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
            config_dir,
        }
    }

    #[must_use]
    pub fn current(&self) -> Language {
        *self.sender.borrow()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Language> {
        self.sender.subscribe()
    }

    #[must_use]
    pub fn translator(&self, catalog: Arc<Catalog>) -> Translator {
        Translator::new(catalog, self.subscribe())
    }

    /// Switches the active language.
    ///
    /// Unsupported codes are ignored and `false` is returned. A supported code
    /// is written to `settings.toml`, then published to every subscriber.
    pub fn set_language(&self, code: &str) -> bool {
        let Some(language) = Language::from_code(code) else {
            tracing::debug!(code, "ignoring unsupported language code");
            return false;
        };

        self.persist(language);
        let previous = self.sender.send_replace(language);
        if previous != language {
            tracing::info!(from = previous.code(), to = language.code(), "language changed");
        }
        true
    }

    fn persist(&self, language: Language) {
        let (mut cfg, warning) = config::load_with_override(self.config_dir.clone());
        if warning.is_some() {
            // The unreadable file is left for the user to repair.
            tracing::warn!(
                language = language.code(),
                "settings file unreadable, language preference not saved"
            );
            return;
        }
        cfg.general.language = Some(language.code().to_string());
        if let Err(err) = config::save_with_override(&cfg, self.config_dir.clone()) {
            tracing::warn!(error = %err, "failed to persist language preference");
        }
    }
}

// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - UI language
//! - `[server]` - Analysis backend address
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `ONCOCROSS_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use oncocross::app::config;
//!
//! let (mut config, _warning) = config::load();
//! config.general.language = Some("ko".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneralConfig {
    /// UI language code (`en`, `ko`, `zh` or `ar`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Analysis backend settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Base URL such as `http://localhost:8000`, without the `/api` suffix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Application configuration with logical sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Resolves the backend base URL.
    ///
    /// Priority: `cli` argument, then `ONCOCROSS_SERVER_URL`, then
    /// `[server] base_url`, then [`DEFAULT_SERVER_URL`]. Blank values are
    /// skipped at every level.
    #[must_use]
    pub fn resolve_server_url(&self, cli: Option<&str>) -> String {
        let env = std::env::var(ENV_SERVER_URL).ok();
        // Bound to a local so the iterator temporary drops before `env`.
        let url = [cli, env.as_deref(), self.server.base_url.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|value| !value.is_empty())
            .unwrap_or(DEFAULT_SERVER_URL)
            .to_string();
        url
    }
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning to display.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "failed to load config");
                    return (
                        Config::default(),
                        Some("notification.configLoadError".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                language: Some("ko".to_string()),
            },
            server: ServerConfig {
                base_url: Some("http://10.0.0.5:8000".to_string()),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn saved_config_uses_sectioned_format() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config = Config {
            general: GeneralConfig {
                language: Some("ar".to_string()),
            },
            ..Config::default()
        };

        save_with_override(&config, Some(temp_dir.path().to_path_buf()))
            .expect("failed to save config");
        let content = fs::read_to_string(temp_dir.path().join(CONFIG_FILE))
            .expect("failed to read config");

        assert!(content.contains("[general]"));
        assert!(content.contains("language = \"ar\""));
    }

    #[test]
    fn load_with_override_from_empty_directory_returns_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn load_with_override_from_corrupted_file_returns_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[general\nlanguage = ")
            .expect("failed to write corrupted config");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification.configLoadError"));
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "[server]\nbase_url = \"http://backend:9000\"\n")
            .expect("failed to write config");

        let config = load_from_path(&path).expect("failed to load config");
        assert!(config.general.language.is_none());
        assert_eq!(
            config.server.base_url.as_deref(),
            Some("http://backend:9000")
        );
    }

    #[test]
    fn server_url_resolution_order() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::remove_var(ENV_SERVER_URL);

        let mut config = Config::default();
        assert_eq!(config.resolve_server_url(None), DEFAULT_SERVER_URL);

        config.server.base_url = Some("http://from-config:8000".to_string());
        assert_eq!(config.resolve_server_url(None), "http://from-config:8000");

        std::env::set_var(ENV_SERVER_URL, "http://from-env:8000");
        assert_eq!(config.resolve_server_url(None), "http://from-env:8000");

        assert_eq!(
            config.resolve_server_url(Some("http://from-cli:8000")),
            "http://from-cli:8000"
        );
        assert_eq!(config.resolve_server_url(Some("  ")), "http://from-env:8000");

        std::env::remove_var(ENV_SERVER_URL);
    }
}

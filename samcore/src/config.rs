//! Shell configuration
//!
//! Read once at startup from `config.json` in the platform config directory
//! (`~/.config/samos/` on Linux). Every field has a default, so a missing or
//! partial file is fine. A few chat settings can also come from the
//! environment, which wins over the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

pub const ENV_CHAT_URL: &str = "SAMOS_CHAT_URL";
pub const ENV_CHAT_KEY: &str = "SAMOS_CHAT_KEY";
pub const ENV_CHAT_MODEL: &str = "SAMOS_CHAT_MODEL";

/// Window placement rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Viewports this wide or narrower use the mobile layout.
    pub narrow_breakpoint: f32,
    /// Per-open-window stagger on narrow viewports.
    pub cascade_step: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { narrow_breakpoint: 768.0, cascade_step: 20.0 }
    }
}

/// Chat completion backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChatConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            model: "openai/gpt-4o".to_string(),
            temperature: 0.7,
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShellConfig {
    pub layout: LayoutConfig,
    pub chat: ChatConfig,
    /// Starting value of the menu-bar volume, 0–100.
    pub initial_volume: f32,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            chat: ChatConfig::default(),
            initial_volume: 70.0,
        }
    }
}

/// Directory holding samOS configuration.
pub fn config_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "samos")
        .map(|p| p.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/samos"))
}

impl ShellConfig {
    pub fn default_path() -> PathBuf {
        config_dir().join("config.json")
    }

    /// Parse a config file. A missing file is an error here; see
    /// [`load_or_default`](Self::load_or_default) for the forgiving version.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: ShellConfig = serde_json::from_str(&contents)?;
        config.initial_volume = crate::geometry::clamp_percent(config.initial_volume);
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Load from `path`, falling back to defaults, then apply environment
    /// overrides.
    pub fn load_or_default(path: &Path) -> Self {
        let mut config = if path.exists() {
            match Self::load(path) {
                Ok(c) => {
                    log::info!("loaded config from {}", path.display());
                    c
                }
                Err(e) => {
                    log::warn!("ignoring config {}: {}", path.display(), e);
                    Self::default()
                }
            }
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Apply overrides from a variable lookup (the real environment in
    /// production, a map in tests).
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = non_empty(ENV_CHAT_URL) {
            self.chat.base_url = Some(url);
        }
        if let Some(key) = non_empty(ENV_CHAT_KEY) {
            self.chat.api_key = Some(key);
        }
        if let Some(model) = non_empty(ENV_CHAT_MODEL) {
            self.chat.model = model;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let c = ShellConfig::default();
        assert_eq!(c.layout.narrow_breakpoint, 768.0);
        assert_eq!(c.layout.cascade_step, 20.0);
        assert_eq!(c.initial_volume, 70.0);
        assert!(c.chat.base_url.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "initial_volume": 150, "layout": { "cascade_step": 32 } }"#).unwrap();
        let c = ShellConfig::load(&path).unwrap();
        assert_eq!(c.initial_volume, 100.0);
        assert_eq!(c.layout.cascade_step, 32.0);
        assert_eq!(c.layout.narrow_breakpoint, 768.0);
        assert_eq!(c.chat.model, "openai/gpt-4o");
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(ShellConfig::load(&path), Err(ConfigError::Json(_))));
        let c = ShellConfig::load_or_default(&path);
        assert_eq!(c.layout, LayoutConfig::default());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert!(matches!(ShellConfig::load(&path), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut c = ShellConfig::default();
        c.chat.base_url = Some("http://localhost:9000".into());
        c.save(&path).unwrap();
        assert_eq!(ShellConfig::load(&path).unwrap(), c);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_CHAT_URL, "https://chat.example"),
            (ENV_CHAT_KEY, "  "),
            (ENV_CHAT_MODEL, "small"),
        ]
        .into_iter()
        .collect();
        let mut c = ShellConfig::default();
        c.chat.api_key = Some("from-file".into());
        c.apply_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(c.chat.base_url.as_deref(), Some("https://chat.example"));
        // blank values do not override
        assert_eq!(c.chat.api_key.as_deref(), Some("from-file"));
        assert_eq!(c.chat.model, "small");
    }
}

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{DeskmateError, Result};

pub const DEFAULT_SQLITE_PATH: &str = "./data/deskmate.db";
pub const DEFAULT_SLOT_NAME: &str = "appData";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    pub sqlite_path: Option<String>,
    pub slot: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OpenAiConfig {
    pub base_url: Option<String>,
}

/// Runtime configuration for the client. Every field is optional; the
/// accessors fall back to the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub storage: Option<StorageConfig>,
    #[serde(default)]
    pub openai: Option<OpenAiConfig>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| DeskmateError::Config(e.to_string()))?;
        let config: Config =
            serde_json::from_str(&content).map_err(|e| DeskmateError::Config(e.to_string()))?;
        Ok(config)
    }

    pub fn sqlite_path(&self) -> String {
        self.storage
            .as_ref()
            .and_then(|s| s.sqlite_path.as_deref())
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .unwrap_or(DEFAULT_SQLITE_PATH)
            .to_string()
    }

    pub fn slot_name(&self) -> String {
        self.storage
            .as_ref()
            .and_then(|s| s.slot.as_deref())
            .map(str::trim)
            .filter(|slot| !slot.is_empty())
            .unwrap_or(DEFAULT_SLOT_NAME)
            .to_string()
    }

    pub fn openai_base_url(&self) -> String {
        self.openai
            .as_ref()
            .and_then(|o| o.base_url.as_deref())
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_OPENAI_BASE_URL)
            .to_string()
    }

    pub fn with_sqlite_path(mut self, path: impl Into<String>) -> Self {
        let storage = self.storage.get_or_insert_with(StorageConfig::default);
        storage.sqlite_path = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::default();
        assert_eq!(config.sqlite_path(), DEFAULT_SQLITE_PATH);
        assert_eq!(config.slot_name(), "appData");
        assert_eq!(config.openai_base_url(), "https://api.openai.com/v1");
    }

    #[test]
    fn partial_json_fills_remaining_fields() {
        let config: Config = serde_json::from_str(
            r#"{"storage":{"sqlite_path":"/tmp/x.db"},"openai":{"base_url":"http://localhost:9/v1/"}}"#,
        )
        .unwrap();
        assert_eq!(config.sqlite_path(), "/tmp/x.db");
        assert_eq!(config.slot_name(), DEFAULT_SLOT_NAME);
        assert_eq!(config.openai_base_url(), "http://localhost:9/v1");
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = Config::default().with_sqlite_path("   ");
        assert_eq!(config.sqlite_path(), DEFAULT_SQLITE_PATH);
    }
}

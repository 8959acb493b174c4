//! Studio configuration
//!
//! Settings for the generation backend. Read from a JSON file in the
//! user's config directory, with the API key overridable from the
//! environment:
//! - Linux: ~/.config/payungi-studio/config.json
//! - macOS: ~/Library/Application Support/payungi-studio/config.json
//! - Windows: %APPDATA%\payungi-studio\config.json

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{StudioError, StudioResult};

/// Environment variables checked for the API key, in order
pub const API_KEY_ENV: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StudioConfig {
    /// Base URL of the generative language API
    pub api_base: String,
    /// Image model used for every request
    pub model: String,
    /// API key; usually supplied through the environment instead
    pub api_key: Option<String>,
    /// Per-request timeout. `None` waits forever.
    pub request_timeout_secs: Option<u64>,
    /// Largest remote garment image that will be downloaded
    pub max_remote_image_bytes: u64,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash-image".to_string(),
            api_key: None,
            request_timeout_secs: None,
            max_remote_image_bytes: 20 * 1024 * 1024,
        }
    }
}

impl StudioConfig {
    /// Load the config file if present, then apply environment overrides
    pub fn load() -> StudioResult<Self> {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => {
                debug!("no config file found, using defaults");
                Self::default()
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Where the config file is expected
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("payungi-studio");
        path.push("config.json");
        Some(path)
    }

    pub fn from_file(path: &Path) -> StudioResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            StudioError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_json(&json)?;
        info!(path = %path.display(), "loaded studio config");
        Ok(config)
    }

    /// Parse from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> StudioResult<Self> {
        serde_json::from_str(json).map_err(|e| StudioError::config(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Fill the API key from the first environment variable that is set
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = API_KEY_ENV
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty())
        {
            self.api_key = Some(key);
        }
    }

    /// Full `generateContent` endpoint for the configured model
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StudioConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash-image");
        assert!(config.api_key.is_none());
        assert!(config.request_timeout_secs.is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = StudioConfig::from_json(r#"{ "model": "other-model" }"#).unwrap();
        assert_eq!(config.model, "other-model");
        assert_eq!(config.api_base, StudioConfig::default().api_base);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        assert!(matches!(
            StudioConfig::from_json("{ nope"),
            Err(StudioError::Config(_))
        ));
    }

    #[test]
    fn test_env_overrides_key() {
        let mut config = StudioConfig::from_json(r#"{ "api_key": "from-file" }"#).unwrap();
        config.apply_env(|name| match name {
            "GEMINI_API_KEY" => Some(String::new()),
            "API_KEY" => Some("from-env".to_string()),
            _ => None,
        });
        assert_eq!(config.api_key.as_deref(), Some("from-env"));

        let mut untouched = StudioConfig::default();
        untouched.apply_env(|_| None);
        assert!(untouched.api_key.is_none());
    }

    #[test]
    fn test_endpoint() {
        let config = StudioConfig {
            api_base: "https://host/v1beta/".to_string(),
            ..StudioConfig::default()
        };
        assert_eq!(
            config.endpoint(),
            "https://host/v1beta/models/gemini-2.5-flash-image:generateContent"
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let config = StudioConfig {
            request_timeout_secs: Some(90),
            ..StudioConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(StudioConfig::from_json(&json).unwrap(), config);
    }
}

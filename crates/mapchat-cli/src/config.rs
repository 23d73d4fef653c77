//! `mapchat.toml` loading.

use mapchat_agent::source::DEFAULT_MAP_API_BASE;
use mapchat_agent::ModelConfig;
use mapchat_core::{MapchatError, MapchatResult, DEFAULT_USD_PER_1K_TOKENS};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Environment variable consulted when the config file carries no key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Deserialize, Default)]
pub struct MapchatConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub maps: MapsConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
}

#[derive(Debug, Deserialize)]
pub struct MapsConfig {
    #[serde(default = "default_map_api_base")]
    pub api_base_url: String,
    #[serde(default = "default_map_id")]
    pub default_map_id: String,
    #[serde(default = "default_fetch_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_map_api_base(),
            default_map_id: default_map_id(),
            timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl MapsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize)]
pub struct PricingConfig {
    #[serde(default = "default_usd_per_1k")]
    pub usd_per_1k_tokens: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            usd_per_1k_tokens: default_usd_per_1k(),
        }
    }
}

fn default_map_api_base() -> String {
    DEFAULT_MAP_API_BASE.to_string()
}
fn default_map_id() -> String {
    "gTTfD4r2mORudVFKge".to_string()
}
fn default_fetch_timeout_secs() -> u64 {
    30
}
fn default_usd_per_1k() -> f64 {
    DEFAULT_USD_PER_1K_TOKENS
}

impl MapchatConfig {
    /// Reads `path`, or falls back to defaults when the file does not exist.
    pub fn load(path: &Path) -> MapchatResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| {
            MapchatError::Config(format!("failed to read '{}': {e}", path.display()))
        })?;
        Self::from_toml(&raw)
            .map_err(|e| MapchatError::Config(format!("'{}': {e}", path.display())))
    }

    pub fn from_toml(raw: &str) -> MapchatResult<Self> {
        toml::from_str(raw).map_err(|e| MapchatError::Config(e.to_string()))
    }

    /// Fills the model key from `env_key` when the file has none, then
    /// checks that chat can start at all.
    pub fn resolve_api_key(&mut self, env_key: Option<String>) -> MapchatResult<()> {
        if self.model.api_key.trim().is_empty() {
            if let Some(key) = env_key {
                self.model.api_key = key;
            }
        }
        self.model.validate()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = MapchatConfig::load(&tmp.path().join("mapchat.toml")).unwrap();
        assert_eq!(config.model.model_id, "gpt-4");
        assert_eq!(config.maps.api_base_url, DEFAULT_MAP_API_BASE);
        assert_eq!(config.maps.default_map_id, "gTTfD4r2mORudVFKge");
        assert_eq!(config.pricing.usd_per_1k_tokens, 0.06);
    }

    #[test]
    fn test_load_file_overrides() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("mapchat.toml");
        std::fs::write(
            &path,
            r#"
            [model]
            provider = "groq"
            model_id = "llama3-70b"

            [maps]
            api_base_url = "http://localhost:9000/v1/maps"

            [pricing]
            usd_per_1k_tokens = 0.002
            "#,
        )
        .unwrap();

        let config = MapchatConfig::load(&path).unwrap();
        assert_eq!(config.model.model_id, "llama3-70b");
        assert_eq!(config.maps.api_base_url, "http://localhost:9000/v1/maps");
        assert_eq!(config.maps.default_map_id, "gTTfD4r2mORudVFKge");
        assert_eq!(config.pricing.usd_per_1k_tokens, 0.002);
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let err = MapchatConfig::from_toml("[model\nmodel_id =").unwrap_err();
        assert!(matches!(err, MapchatError::Config(_)));
    }

    #[test]
    fn test_api_key_from_environment() {
        let mut config = MapchatConfig::default();
        config.resolve_api_key(Some("sk-env".to_string())).unwrap();
        assert_eq!(config.model.api_key, "sk-env");
    }

    #[test]
    fn test_file_key_wins_over_environment() {
        let mut config = MapchatConfig::from_toml("[model]\napi_key = \"sk-file\"").unwrap();
        config.resolve_api_key(Some("sk-env".to_string())).unwrap();
        assert_eq!(config.model.api_key, "sk-file");
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let mut config = MapchatConfig::default();
        let err = config.resolve_api_key(None).unwrap_err();
        assert!(!err.is_recoverable());
    }
}

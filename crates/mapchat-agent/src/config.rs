//! Chat-completion model configuration.

use mapchat_core::{MapchatError, MapchatResult};
use serde::{Deserialize, Serialize};

/// Which OpenAI-compatible service to talk to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// api.openai.com.
    #[default]
    OpenAi,
    /// OpenRouter's OpenAI-compatible gateway.
    OpenRouter,
    /// Groq cloud inference, OpenAI-compatible API.
    Groq,
}

/// Model settings, fixed once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Service the requests go to.
    #[serde(default)]
    pub provider: LlmProvider,
    /// Model identifier sent with every request.
    #[serde(default = "default_model_id")]
    pub model_id: String,
    /// Bearer secret. Left empty in config files that rely on the
    /// environment.
    #[serde(default)]
    pub api_key: String,
    /// Overrides the provider's default base URL.
    pub api_base_url: Option<String>,
    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model_id() -> String {
    "gpt-4".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            model_id: default_model_id(),
            api_key: String::new(),
            api_base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ModelConfig {
    /// Base URL of the completion API, without the `/v1/...` path.
    pub fn base_url(&self) -> &str {
        if let Some(url) = &self.api_base_url {
            url
        } else {
            match self.provider {
                LlmProvider::OpenAi => "https://api.openai.com",
                LlmProvider::OpenRouter => "https://openrouter.ai/api",
                LlmProvider::Groq => "https://api.groq.com/openai",
            }
        }
    }

    /// Fails when no secret is configured; chat must not start without one.
    pub fn validate(&self) -> MapchatResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(MapchatError::Config(
                "no API key configured: set model.api_key or OPENAI_API_KEY".to_string(),
            ));
        }
        if self.model_id.trim().is_empty() {
            return Err(MapchatError::Config("model.model_id is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialization_with_defaults() {
        let config: ModelConfig = toml::from_str(r#"api_key = "sk-test""#).unwrap();
        assert!(matches!(config.provider, LlmProvider::OpenAi));
        assert_eq!(config.model_id, "gpt-4");
        assert_eq!(config.timeout_secs, 120);
        assert_eq!(config.base_url(), "https://api.openai.com");
    }

    #[test]
    fn test_provider_base_urls() {
        let groq = ModelConfig {
            provider: LlmProvider::Groq,
            ..ModelConfig::default()
        };
        assert_eq!(groq.base_url(), "https://api.groq.com/openai");

        let custom = ModelConfig {
            provider: LlmProvider::OpenRouter,
            api_base_url: Some("http://localhost:8080".to_string()),
            ..ModelConfig::default()
        };
        assert_eq!(custom.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_provider_serialization() {
        let json = serde_json::to_string(&LlmProvider::OpenRouter).unwrap();
        assert_eq!(json, "\"openrouter\"");
    }

    #[test]
    fn test_validate_requires_api_key() {
        let err = ModelConfig::default().validate().unwrap_err();
        assert!(matches!(err, MapchatError::Config(_)));
        assert!(!err.is_recoverable());

        let config = ModelConfig {
            api_key: "sk-test".to_string(),
            ..ModelConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}

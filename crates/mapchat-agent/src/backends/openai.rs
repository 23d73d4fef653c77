use super::CompletionBackend;
use crate::config::{LlmProvider, ModelConfig};
use crate::llm::Completion;
use async_trait::async_trait;
use mapchat_core::{MapchatError, MapchatResult, Message};
use std::time::Duration;
use tracing::debug;

/// Sampling temperature sent with every request.
pub const TEMPERATURE: f32 = 0.5;

/// OpenAI-compatible API backend.
///
/// Works with OpenAI, OpenRouter, Groq and any other provider that implements
/// the OpenAI chat completions API.
pub struct OpenAiBackend {
    config: ModelConfig,
    http: reqwest::Client,
}

impl OpenAiBackend {
    /// Builds the backend and its HTTP client.
    pub fn new(config: ModelConfig) -> MapchatResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MapchatError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    fn build_messages(&self, messages: &[Message]) -> Vec<serde_json::Value> {
        messages
            .iter()
            .map(|m| {
                serde_json::json!({
                    "role": m.role.as_str(),
                    "content": m.content,
                })
            })
            .collect()
    }

    fn add_provider_headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json");

        // OpenRouter wants the calling app named
        if matches!(self.config.provider, LlmProvider::OpenRouter) {
            request.header("X-Title", "mapchat")
        } else {
            request
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(&self, messages: &[Message]) -> MapchatResult<Completion> {
        let url = format!("{}/v1/chat/completions", self.config.base_url());
        let body = serde_json::json!({
            "model": self.config.model_id,
            "temperature": TEMPERATURE,
            "messages": self.build_messages(messages),
        });

        debug!(url = %url, messages = messages.len(), "Sending chat completion");

        let resp = self
            .add_provider_headers(self.http.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| MapchatError::Completion(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| MapchatError::Completion(e.to_string()))?;

        if !status.is_success() {
            return Err(MapchatError::Completion(format!(
                "OpenAI API error {status}: {text}"
            )));
        }

        let resp_body: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| MapchatError::Completion(format!("malformed response: {e}")))?;

        parse_openai_response(&resp_body)
    }
}

/// Extracts the reply and `usage.total_tokens` from a chat completion body.
///
/// A body without `choices[0].message.content`, or with empty content, counts
/// as "no response". Missing usage is reported as zero tokens.
pub fn parse_openai_response(body: &serde_json::Value) -> MapchatResult<Completion> {
    let content = body["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| MapchatError::Completion("response contains no message".to_string()))?;

    if content.trim().is_empty() {
        return Err(MapchatError::Completion("response message is empty".to_string()));
    }

    let total_tokens = body["usage"]["total_tokens"].as_u64().unwrap_or(0);

    Ok(Completion {
        content: content.to_string(),
        total_tokens,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_parse_response() {
        let body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "Hello"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 100, "completion_tokens": 20, "total_tokens": 120}
        });
        let c = parse_openai_response(&body).unwrap();
        assert_eq!(c.content, "Hello");
        assert_eq!(c.total_tokens, 120);
    }

    #[test]
    fn test_parse_response_without_usage() {
        let body = serde_json::json!({
            "choices": [{"message": {"content": "Hi"}}]
        });
        assert_eq!(parse_openai_response(&body).unwrap().total_tokens, 0);
    }

    #[test]
    fn test_parse_response_without_choices() {
        let body = serde_json::json!({"choices": []});
        let err = parse_openai_response(&body).unwrap_err();
        assert!(matches!(err, MapchatError::Completion(_)));
    }

    #[test]
    fn test_parse_response_null_content() {
        let body = serde_json::json!({
            "choices": [{"message": {"content": null}}]
        });
        assert!(parse_openai_response(&body).is_err());
    }

    #[test]
    fn test_build_messages_keeps_order_and_roles() {
        let backend = OpenAiBackend::new(ModelConfig::default()).unwrap();
        let sid = Uuid::new_v4();
        let msgs = vec![
            Message::system("sys", sid),
            Message::user("q", sid),
            Message::assistant("a", sid),
        ];
        let api = backend.build_messages(&msgs);
        assert_eq!(api.len(), 3);
        assert_eq!(api[0]["role"], "system");
        assert_eq!(api[1]["role"], "user");
        assert_eq!(api[2]["role"], "assistant");
        assert_eq!(api[2]["content"], "a");
    }
}

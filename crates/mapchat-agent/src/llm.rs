use crate::backends::openai::OpenAiBackend;
use crate::backends::CompletionBackend;
use crate::config::{LlmProvider, ModelConfig};
use mapchat_core::{MapchatResult, Message};

/// Reply text and token usage of one completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Assistant reply text.
    pub content: String,
    /// `usage.total_tokens` reported by the endpoint, 0 when absent.
    pub total_tokens: u64,
}

/// LLM client that dispatches to the correct provider backend.
///
/// Uses the `CompletionBackend` trait to abstract away provider differences.
pub struct LlmClient {
    backend: Box<dyn CompletionBackend>,
}

impl LlmClient {
    /// Picks the backend for `config.provider`.
    pub fn new(config: ModelConfig) -> MapchatResult<Self> {
        let backend: Box<dyn CompletionBackend> = match config.provider {
            LlmProvider::OpenAi | LlmProvider::OpenRouter | LlmProvider::Groq => {
                Box::new(OpenAiBackend::new(config)?)
            }
        };
        Ok(Self { backend })
    }

    /// Create from a pre-built backend (for custom providers and tests).
    pub fn from_backend(backend: Box<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    /// Non-streaming chat completion.
    pub async fn complete(&self, messages: &[Message]) -> MapchatResult<Completion> {
        self.backend.complete(messages).await
    }
}

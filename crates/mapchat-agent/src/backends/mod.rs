//! Chat-completion provider backends.

pub mod openai;

use crate::llm::Completion;
use async_trait::async_trait;
use mapchat_core::{MapchatResult, Message};

/// Trait for chat-completion backends.
///
/// A backend receives the whole transcript in order and returns the reply
/// together with the tokens the call consumed. Any failure must come back as
/// [`MapchatError::Completion`](mapchat_core::MapchatError::Completion).
///
/// To add a new provider:
/// 1. Create a new module in `backends/`
/// 2. Implement `CompletionBackend` for your struct
/// 3. Add the variant to `LlmProvider` in `config.rs`
/// 4. Wire it up in `LlmClient::new()` in `llm.rs`
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Non-streaming chat completion over the full transcript.
    async fn complete(&self, messages: &[Message]) -> MapchatResult<Completion>;
}

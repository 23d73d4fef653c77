//! One chat turn against the completion endpoint.

use crate::config::ModelConfig;
use crate::llm::LlmClient;
use mapchat_core::{MapchatError, MapchatResult, UsageAccumulator};
use mapchat_session::ChatSession;
use tracing::{info, warn};

/// What a successful turn hands back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    /// Assistant text appended to the transcript.
    pub reply: String,
    /// Session usage after this turn was recorded.
    pub usage: UsageAccumulator,
}

/// The Turn Executor: one question → one completion call → one reply.
///
/// Requires `&mut ChatSession`, so a session can never have two turns in
/// flight at once.
pub struct TurnExecutor {
    llm: LlmClient,
}

impl TurnExecutor {
    /// Builds an executor talking to the configured provider.
    pub fn new(config: ModelConfig) -> MapchatResult<Self> {
        Ok(Self {
            llm: LlmClient::new(config)?,
        })
    }

    /// Wraps an existing client, e.g. one over a scripted backend.
    pub fn from_client(llm: LlmClient) -> Self {
        Self { llm }
    }

    /// Runs one turn. On failure the question stays in the transcript
    /// unanswered and the usage counters are left alone.
    pub async fn run(
        &self,
        session: &mut ChatSession,
        question: &str,
    ) -> MapchatResult<TurnOutcome> {
        if question.trim().is_empty() {
            return Err(MapchatError::Session("question is empty".to_string()));
        }

        session.push_question(question);

        info!(
            session_id = %session.id,
            map_id = %session.map_id,
            messages = session.transcript().len(),
            "Starting chat turn"
        );

        let completion = match self.llm.complete(session.transcript().messages()).await {
            Ok(c) => c,
            Err(e) => {
                warn!(session_id = %session.id, error = %e, "Chat turn failed");
                return Err(match e {
                    MapchatError::Completion(_) => e,
                    other => MapchatError::Completion(other.to_string()),
                });
            }
        };

        session.push_reply(question, &completion.content, completion.total_tokens);
        let usage = session.usage();

        info!(
            session_id = %session.id,
            tokens = usage.last_turn_tokens,
            total_tokens = usage.total_tokens,
            "Chat turn completed"
        );

        Ok(TurnOutcome {
            reply: completion.content,
            usage,
        })
    }
}

//! Append-only message store for one session.

use crate::prompts;
use mapchat_core::{Message, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ordered, append-only list of messages sent to the model on every turn.
///
/// The only way to drop messages is [`Transcript::seed`], which replaces the
/// whole store with the fixed three-message opening.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    session_id: Uuid,
    messages: Vec<Message>,
}

impl Transcript {
    /// Creates an empty transcript owned by `session_id`.
    pub fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            messages: Vec::new(),
        }
    }

    /// Replaces the store with `[system, user, assistant]` built from the map
    /// text.
    pub fn seed(&mut self, map_text: &str) {
        let sid = self.session_id;
        self.messages = vec![
            Message::system(prompts::system_prompt(map_text), sid),
            Message::user(prompts::SEED_USER_MESSAGE, sid),
            Message::assistant(prompts::SEED_ASSISTANT_MESSAGE, sid),
        ];
    }

    /// Appends one message and returns it.
    pub fn append(&mut self, role: Role, content: impl Into<String>) -> &Message {
        self.messages
            .push(Message::new(role, content, self.session_id));
        &self.messages[self.messages.len() - 1]
    }

    /// All messages in conversational order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the transcript holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Session that owns every message in this transcript.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }
}

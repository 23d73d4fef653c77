//! State scoped to one loaded map.

use crate::export;
use crate::map;
use crate::transcript::Transcript;
use chrono::{DateTime, Utc};
use mapchat_core::{Message, Role, UsageAccumulator};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One answered question: the user's query and the model's reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    /// The question as sent to the model.
    pub query: String,
    /// The reply text returned by the model.
    pub reply: String,
}

/// Conversation state keyed to a single map id.
///
/// The transcript, usage counters and exchanges are created together and are
/// thrown away together; a different map means a new `ChatSession`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    /// Unique identifier for this session.
    pub id: Uuid,
    /// Identifier of the map this session is about.
    pub map_id: String,
    /// Raw map text as fetched.
    pub map_text: String,
    transcript: Transcript,
    usage: UsageAccumulator,
    exchanges: Vec<Exchange>,
    /// When the session was seeded.
    pub created_at: DateTime<Utc>,
    /// When the transcript last changed.
    pub updated_at: DateTime<Utc>,
}

impl ChatSession {
    /// Creates a session for `map_id` with a freshly seeded transcript.
    pub fn seeded(map_id: impl Into<String>, map_text: impl Into<String>) -> Self {
        let id = Uuid::new_v4();
        let map_text = map_text.into();
        let mut transcript = Transcript::new(id);
        transcript.seed(&map_text);
        let now = Utc::now();
        Self {
            id,
            map_id: map_id.into(),
            map_text,
            transcript,
            usage: UsageAccumulator::new(),
            exchanges: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The transcript sent to the model.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Current token counters.
    pub fn usage(&self) -> UsageAccumulator {
        self.usage
    }

    /// Answered exchanges, oldest first.
    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    /// Map title, if the map text declares one.
    pub fn title(&self) -> Option<&str> {
        map::extract_title(&self.map_text)
    }

    /// Records the user's question at the end of the transcript.
    pub fn push_question(&mut self, question: &str) -> &Message {
        self.updated_at = Utc::now();
        self.transcript.append(Role::User, question)
    }

    /// Completes a turn started with [`ChatSession::push_question`]: appends
    /// the reply, folds in the usage and records the exchange.
    pub fn push_reply(&mut self, question: &str, reply: &str, tokens: u64) -> &Message {
        self.updated_at = Utc::now();
        self.usage.record(tokens);
        self.exchanges.push(Exchange {
            query: question.to_string(),
            reply: reply.to_string(),
        });
        self.transcript.append(Role::Assistant, reply)
    }

    /// Follow-up suggestions drawn from every reply, oldest first.
    pub fn follow_ups(&self) -> Vec<&str> {
        self.exchanges
            .iter()
            .flat_map(|e| map::follow_up_questions(&e.reply))
            .collect()
    }

    /// Replies joined by newlines, oldest first.
    pub fn export_replies(&self) -> String {
        export::export_replies(&self.exchanges)
    }

    /// Chat log joined by newlines, newest exchange first.
    pub fn export_chat(&self) -> String {
        export::export_chat(&self.exchanges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_session_starts_clean() {
        let s = ChatSession::seeded("abc", "title Demo\ncomponent A");
        assert_eq!(s.transcript().len(), 3);
        assert_eq!(s.usage(), UsageAccumulator::default());
        assert!(s.exchanges().is_empty());
        assert_eq!(s.title(), Some("Demo"));
        assert_eq!(s.transcript().session_id(), s.id);
    }

    #[test]
    fn test_full_turn_updates_everything() {
        let mut s = ChatSession::seeded("abc", "title Demo");
        s.push_question("What is this?");
        s.push_reply("What is this?", "A tea shop.", 120);

        assert_eq!(s.transcript().len(), 5);
        assert_eq!(s.usage().total_tokens, 120);
        assert_eq!(
            s.exchanges(),
            &[Exchange {
                query: "What is this?".into(),
                reply: "A tea shop.".into()
            }]
        );
        assert_eq!(s.transcript().last().map(|m| m.role), Some(Role::Assistant));
    }

    #[test]
    fn test_follow_ups_span_all_replies() {
        let mut s = ChatSession::seeded("abc", "title Demo");
        s.push_question("q1");
        s.push_reply("q1", "1. First?\n2. Second?", 10);
        s.push_question("q2");
        s.push_reply("q2", "Plain answer\n3. Third?", 10);
        assert_eq!(s.follow_ups(), vec!["1. First?", "2. Second?", "3. Third?"]);
    }
}

//! Session lifecycle: follow the selected map id, reset on change.

use crate::runner::{TurnExecutor, TurnOutcome};
use crate::source::MapSource;
use mapchat_core::{MapchatError, MapchatResult};
use mapchat_session::prompts::{DEFAULT_QUESTION, RESET_QUESTION};
use mapchat_session::ChatSession;
use std::sync::Arc;
use tracing::{info, warn};

/// Result of [`SessionManager::observe`].
#[derive(Debug)]
pub enum ObserveOutcome {
    /// Same id as the active session; nothing happened.
    Unchanged,
    /// Blank id: any previous session was dropped and nothing was fetched.
    NoDocument,
    /// A new map was fetched and a fresh session seeded.
    Loaded {
        /// Id of the map now backing the session.
        map_id: String,
        /// First `title` line of the map text, if any.
        title: Option<String>,
    },
    /// The previous session was dropped but the new map could not be
    /// fetched. Chat stays unavailable until a fetch succeeds.
    FetchFailed(MapchatError),
}

enum SessionState {
    Uninitialized,
    Active(ChatSession),
}

/// Owns the conversation for whichever map is currently selected.
///
/// Two states: no session, or an active [`ChatSession`] for one map id. Any
/// change of id replaces the whole session, so transcript, usage and
/// exchanges can never belong to different maps.
pub struct SessionManager {
    source: Arc<dyn MapSource>,
    executor: Arc<TurnExecutor>,
    state: SessionState,
    suggested_question: &'static str,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("suggested_question", &self.suggested_question)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Starts with no session; the first [`observe`](Self::observe) loads one.
    pub fn new(source: Arc<dyn MapSource>, executor: Arc<TurnExecutor>) -> Self {
        Self {
            source,
            executor,
            state: SessionState::Uninitialized,
            suggested_question: DEFAULT_QUESTION,
        }
    }

    /// Reacts to the currently selected map id.
    pub async fn observe(&mut self, map_id: &str) -> ObserveOutcome {
        let map_id = map_id.trim();

        if let SessionState::Active(session) = &self.state {
            if session.map_id == map_id {
                return ObserveOutcome::Unchanged;
            }
            info!(session_id = %session.id, old_map = %session.map_id, new_map = %map_id, "Map changed, resetting session");
        }

        self.state = SessionState::Uninitialized;
        self.suggested_question = RESET_QUESTION;

        if map_id.is_empty() {
            return ObserveOutcome::NoDocument;
        }

        match self.source.fetch(map_id).await {
            Ok(text) => {
                let session = ChatSession::seeded(map_id, text);
                let title = session.title().map(str::to_string);
                info!(session_id = %session.id, map_id = %map_id, "Session seeded");
                self.state = SessionState::Active(session);
                ObserveOutcome::Loaded {
                    map_id: map_id.to_string(),
                    title,
                }
            }
            Err(e) => {
                warn!(map_id = %map_id, error = %e, "Map not loaded; chat disabled");
                ObserveOutcome::FetchFailed(e)
            }
        }
    }

    /// Asks a question in the active session.
    pub async fn ask(&mut self, question: &str) -> MapchatResult<TurnOutcome> {
        match &mut self.state {
            SessionState::Active(session) => self.executor.run(session, question).await,
            SessionState::Uninitialized => Err(MapchatError::Session(
                "no map loaded; load a map before asking".to_string(),
            )),
        }
    }

    /// The active session, if a map is loaded.
    pub fn session(&self) -> Option<&ChatSession> {
        match &self.state {
            SessionState::Active(session) => Some(session),
            SessionState::Uninitialized => None,
        }
    }

    /// Id of the loaded map.
    pub fn current_map_id(&self) -> Option<&str> {
        self.session().map(|s| s.map_id.as_str())
    }

    /// Question to offer when the user has not typed one.
    pub fn suggested_question(&self) -> &'static str {
        self.suggested_question
    }
}

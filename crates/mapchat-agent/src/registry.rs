//! Session managers keyed by an explicit session id.

use crate::lifecycle::SessionManager;
use crate::runner::TurnExecutor;
use crate::source::MapSource;
use mapchat_core::{MapchatError, MapchatResult};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

/// Holds one [`SessionManager`] per session key.
///
/// A handler takes exclusive hold of its session with
/// [`SessionRegistry::acquire`]; a second handler for the same key is turned
/// away instead of interleaving with the first.
pub struct SessionRegistry {
    source: Arc<dyn MapSource>,
    executor: Arc<TurnExecutor>,
    sessions: Mutex<HashMap<Uuid, Arc<AsyncMutex<SessionManager>>>>,
}

impl SessionRegistry {
    /// Empty registry; every session it creates shares `source` and `executor`.
    pub fn new(source: Arc<dyn MapSource>, executor: Arc<TurnExecutor>) -> Self {
        Self {
            source,
            executor,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Exclusive access to the session `id`, creating it on first use.
    ///
    /// Fails with a session error while another handler holds it.
    pub fn acquire(&self, id: Uuid) -> MapchatResult<OwnedMutexGuard<SessionManager>> {
        let entry = {
            let mut sessions = self.sessions.lock();
            sessions
                .entry(id)
                .or_insert_with(|| {
                    Arc::new(AsyncMutex::new(SessionManager::new(
                        self.source.clone(),
                        self.executor.clone(),
                    )))
                })
                .clone()
        };

        entry
            .try_lock_owned()
            .map_err(|_| MapchatError::Session(format!("session {id} is busy")))
    }

    /// Drops the session `id`. Returns whether it existed.
    pub fn remove(&self, id: Uuid) -> bool {
        self.sessions.lock().remove(&id).is_some()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    /// True when no session has been created or all were removed.
    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}

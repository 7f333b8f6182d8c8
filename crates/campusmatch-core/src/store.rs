//! Session persistence contract.
//!
//! The wizard flow is keyed by an opaque session identifier; the store
//! trait lets callers swap the backing storage (in-memory for the CLI
//! and tests, something durable behind a web front).

use std::collections::HashMap;
use std::sync::Mutex;

use campusmatch_types::Session;

/// Keyed storage for wizard sessions.
///
/// Writes are last-write-wins; the flow layer reads, mutates, and puts
/// back whole sessions.
pub trait SessionStore: Send + Sync {
    /// Fetch a session, if one exists for this id.
    fn get(&self, id: &str) -> Option<Session>;

    /// Store (or replace) the session for this id.
    fn put(&self, id: &str, session: Session);

    /// Remove the session for this id. Removing a missing id is a no-op.
    fn clear(&self, id: &str);
}

/// In-memory session store backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A poisoned lock still yields the map: last-write-wins must hold
    /// even after a panic in another holder.
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Session>> {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, id: &str) -> Option<Session> {
        self.lock().get(id).cloned()
    }

    fn put(&self, id: &str, session: Session) {
        self.lock().insert(id.to_string(), session);
    }

    fn clear(&self, id: &str) {
        self.lock().remove(id);
    }
}

use std::{
    collections::HashMap,
    sync::Mutex,
    time::{Duration, Instant},
};

use serde::Serialize;
use uuid::Uuid;

/// The authenticated demo user attached to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct SessionUser {
    pub(crate) id: String,
    pub(crate) username: String,
}

#[derive(Debug)]
struct Session {
    user: SessionUser,
    expires_at: Instant,
}

/// In-memory session store with per-session expiry.
///
/// Expired entries are pruned lazily on lookup, so the map never grows
/// beyond the set of sessions touched within one TTL window.
#[derive(Debug)]
pub(crate) struct SessionStore {
    ttl: Duration,
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    #[must_use]
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Create a session for `user` and return its opaque id.
    pub(crate) fn create(&self, user: SessionUser) -> String {
        let id = Uuid::new_v4().to_string();
        let session = Session {
            user,
            expires_at: Instant::now() + self.ttl,
        };
        let mut sessions = self.sessions.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        sessions.insert(id.clone(), session);
        id
    }

    /// Look up a live session, pruning any expired entries.
    pub(crate) fn get(&self, id: &str) -> Option<SessionUser> {
        let now = Instant::now();
        let mut sessions = self.sessions.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        sessions.retain(|_, session| session.expires_at > now);
        sessions.get(id).map(|session| session.user.clone())
    }

    /// Drop a session. Returns whether it existed.
    pub(crate) fn remove(&self, id: &str) -> bool {
        let mut sessions = self.sessions.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        sessions.remove(id).is_some()
    }

    #[must_use]
    pub(crate) fn len(&self) -> usize {
        let sessions = self.sessions.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        sessions.len()
    }

    #[must_use]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_user() -> SessionUser {
        SessionUser {
            id: "1".to_string(),
            username: "demo".to_string(),
        }
    }

    #[test]
    fn create_and_get_round_trip() {
        let store = SessionStore::new(Duration::from_secs(60));
        let id = store.create(demo_user());
        assert_eq!(store.get(&id), Some(demo_user()));
    }

    #[test]
    fn unknown_id_misses() {
        let store = SessionStore::new(Duration::from_secs(60));
        assert_eq!(store.get("nope"), None);
    }

    #[test]
    fn sessions_are_distinct() {
        let store = SessionStore::new(Duration::from_secs(60));
        let a = store.create(demo_user());
        let b = store.create(demo_user());
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn remove_invalidates() {
        let store = SessionStore::new(Duration::from_secs(60));
        let id = store.create(demo_user());
        assert!(store.remove(&id));
        assert!(!store.remove(&id));
        assert_eq!(store.get(&id), None);
    }

    #[test]
    fn expired_sessions_are_pruned() {
        let store = SessionStore::new(Duration::ZERO);
        let id = store.create(demo_user());
        assert_eq!(store.get(&id), None);
        assert!(store.is_empty());
    }
}

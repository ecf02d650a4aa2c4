//! Mock session store for testing.

use crate::providers::{AuthFuture, Session, SessionStore};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock session store.
///
/// Uses in-memory storage keyed by token digest.
#[derive(Debug, Clone, Default)]
pub struct MockSessionStore {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
}

impl MockSessionStore {
    /// Create a new mock session store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions (for testing).
    #[must_use]
    pub fn count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

impl SessionStore for MockSessionStore {
    fn create_session<'a>(&'a self, session: &'a Session) -> AuthFuture<'a, ()> {
        Box::pin(async move {
            self.sessions
                .lock()
                .unwrap()
                .insert(session.token_hash.clone(), session.clone());
            Ok(())
        })
    }

    fn find_session<'a>(&'a self, token_hash: &'a str) -> AuthFuture<'a, Option<Session>> {
        Box::pin(async move { Ok(self.sessions.lock().unwrap().get(token_hash).cloned()) })
    }

    fn delete_session<'a>(&'a self, token_hash: &'a str) -> AuthFuture<'a, bool> {
        Box::pin(async move { Ok(self.sessions.lock().unwrap().remove(token_hash).is_some()) })
    }
}

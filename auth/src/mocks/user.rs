//! Mock user repository for testing.

use crate::providers::{AuthFuture, User, UserRepository};
use chrono::{DateTime, Utc};
use eventmaker_core::UserId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock user repository.
///
/// Uses in-memory storage keyed by normalized email.
#[derive(Debug, Clone, Default)]
pub struct MockUserRepository {
    users: Arc<Mutex<HashMap<String, User>>>,
}

impl MockUserRepository {
    /// Create a new mock user repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an unverified user (for testing).
    pub fn seed(&self, email: &str, name: Option<&str>) -> User {
        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: email.to_string(),
            name: name.map(str::to_string),
            email_verified: None,
            created_at: now,
            updated_at: now,
        };
        self.users
            .lock()
            .unwrap()
            .insert(user.email.clone(), user.clone());
        user
    }

    /// Number of users (for testing).
    #[must_use]
    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

impl UserRepository for MockUserRepository {
    fn find_by_email<'a>(&'a self, email: &'a str) -> AuthFuture<'a, Option<User>> {
        Box::pin(async move { Ok(self.users.lock().unwrap().get(email).cloned()) })
    }

    fn upsert_verified<'a>(
        &'a self,
        email: &'a str,
        verified_at: DateTime<Utc>,
    ) -> AuthFuture<'a, User> {
        Box::pin(async move {
            let mut users = self.users.lock().unwrap();
            let user = users.entry(email.to_string()).or_insert_with(|| User {
                id: UserId::new(),
                email: email.to_string(),
                name: None,
                email_verified: None,
                created_at: verified_at,
                updated_at: verified_at,
            });
            user.email_verified = Some(verified_at);
            user.updated_at = verified_at;
            Ok(user.clone())
        })
    }
}

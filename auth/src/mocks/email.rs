//! Mock email provider for testing.

use crate::error::AuthError;
use crate::providers::{AuthFuture, EmailProvider};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// A captured outgoing email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    /// Recipient.
    pub to: String,
    /// Magic link in the body.
    pub magic_link: String,
    /// Token expiry shown to the user.
    pub expires_at: DateTime<Utc>,
}

/// Mock email provider.
///
/// Records every message instead of delivering it, so tests can follow the
/// link a user would have clicked.
#[derive(Debug, Clone, Default)]
pub struct MockEmailProvider {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    failing: Arc<AtomicBool>,
}

impl MockEmailProvider {
    /// Create a new mock email provider that succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent sends fail with `AuthError::EmailError`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// All messages sent so far.
    #[must_use]
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// Number of messages sent so far.
    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// Most recent link sent to `to`.
    #[must_use]
    pub fn last_link_for(&self, to: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|email| email.to == to)
            .map(|email| email.magic_link.clone())
    }
}

impl EmailProvider for MockEmailProvider {
    fn send_magic_link<'a>(
        &'a self,
        to: &'a str,
        magic_link: &'a str,
        expires_at: DateTime<Utc>,
    ) -> AuthFuture<'a, ()> {
        Box::pin(async move {
            if self.failing.load(Ordering::SeqCst) {
                return Err(AuthError::EmailError("mock delivery failure".to_string()));
            }
            self.sent.lock().unwrap().push(SentEmail {
                to: to.to_string(),
                magic_link: magic_link.to_string(),
                expires_at,
            });
            Ok(())
        })
    }
}

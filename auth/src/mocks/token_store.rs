//! Mock token store for testing.

use crate::providers::{AuthFuture, MagicLinkToken, TokenStore};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock token store.
///
/// In-memory token store for testing with atomic single-use semantics: the
/// remove happens under the mutex, so concurrent consumers see at most one hit.
#[derive(Debug, Clone, Default)]
pub struct MockTokenStore {
    tokens: Arc<Mutex<HashMap<String, MagicLinkToken>>>,
}

impl MockTokenStore {
    /// Create a new mock token store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of unredeemed tokens (for testing).
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }

    /// Returns `true` if no tokens are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TokenStore for MockTokenStore {
    fn store_token<'a>(&'a self, token: &'a MagicLinkToken) -> AuthFuture<'a, ()> {
        Box::pin(async move {
            self.tokens
                .lock()
                .unwrap()
                .insert(token.token_hash.clone(), token.clone());
            Ok(())
        })
    }

    fn consume_token<'a>(
        &'a self,
        token_hash: &'a str,
    ) -> AuthFuture<'a, Option<MagicLinkToken>> {
        Box::pin(async move { Ok(self.tokens.lock().unwrap().remove(token_hash)) })
    }
}

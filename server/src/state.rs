//! Application state for the EventMaker HTTP server.

use crate::readiness::ReadinessChecker;
use axum::extract::FromRef;
use eventmaker_auth::AuthService;
use eventmaker_core::EventService;
use std::sync::Arc;

/// Shared dependencies for every handler. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Event creation, lookup and joining
    pub events: Arc<EventService>,

    /// Magic link sign-in and session resolution
    pub auth: Arc<AuthService>,

    /// Storage and environment checks for `/api/system/init`
    pub readiness: Arc<ReadinessChecker>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub const fn new(
        events: Arc<EventService>,
        auth: Arc<AuthService>,
        readiness: Arc<ReadinessChecker>,
    ) -> Self {
        Self {
            events,
            auth,
            readiness,
        }
    }
}

// Lets the auth router and `SessionUser` run on `AppState`
impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}

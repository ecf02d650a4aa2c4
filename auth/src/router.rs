//! Authentication router composition.

use crate::handlers::{magic_link, session};
use crate::service::AuthService;
use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use std::sync::Arc;

/// Create authentication router with all auth endpoints.
///
/// # Routes
///
/// ## Magic Link
/// - `POST /magic-link/send` - Send magic link email
/// - `GET /magic-link/verify` - Verify magic link token
///
/// ## Session
/// - `GET /session` - Get session info
/// - `POST /logout` - Logout (destroy session)
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .nest("/api/auth", auth_router())
///     .layer(TraceLayer::new_for_http())
///     .with_state(app_state);
/// ```
pub fn auth_router<S>() -> Router<S>
where
    Arc<AuthService>: FromRef<S>,
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        // Magic Link routes
        .route("/magic-link/send", post(magic_link::send_magic_link))
        .route("/magic-link/verify", get(magic_link::verify_magic_link))
        // Session routes
        .route("/session", get(session::get_session))
        .route("/logout", post(session::logout))
}

//! Session management handlers.

use super::cleared_session_cookie;
use crate::extractor::SessionUser;
use crate::providers::Session;
use crate::service::AuthService;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use eventmaker_web::AppError;
use std::sync::Arc;

/// Current session.
///
/// # Endpoint
///
/// ```text
/// GET /api/auth/session
/// Authorization: Bearer <session token>
/// ```
///
/// # Response
///
/// ```json
/// {
///   "id": "uuid",
///   "userId": "uuid",
///   "email": "user@example.com",
///   "createdAt": "2025-01-01T00:00:00Z",
///   "expiresAt": "2025-01-31T00:00:00Z"
/// }
/// ```
#[allow(clippy::unused_async)]
pub async fn get_session(user: SessionUser) -> Json<Session> {
    Json(user.session)
}

/// Logout (destroy session).
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/logout
/// Authorization: Bearer <session token>
/// ```
///
/// Responds `204 No Content` and clears the session cookie.
pub async fn logout(
    State(auth): State<Arc<AuthService>>,
    user: SessionUser,
) -> Result<Response, AppError> {
    auth.logout(&user.token).await?;
    tracing::info!(user_id = %user.user_id, "Logged out");

    Ok((StatusCode::NO_CONTENT, [cleared_session_cookie()]).into_response())
}

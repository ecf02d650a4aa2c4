//! Authentication extractor.
//!
//! # Usage
//!
//! ```rust,ignore
//! use eventmaker_auth::SessionUser;
//!
//! // Require authentication
//! async fn create_event(
//!     user: SessionUser,
//!     Json(request): Json<CreateEventRequest>,
//! ) -> Result<Json<Event>, AppError> {
//!     // user.email is guaranteed to belong to a live session
//!     ...
//! }
//! ```

use crate::error::AuthError;
use crate::providers::Session;
use crate::service::AuthService;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use eventmaker_core::UserId;
use eventmaker_web::{AppError, SessionToken};
use std::sync::Arc;

/// Authenticated session user.
///
/// Reads `Authorization: Bearer <token>` or the `session_token` cookie and
/// resolves it through [`AuthService::authenticate`]. Any failure rejects
/// the request with `401 {"message": "Unauthorized"}`.
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// The authenticated user ID
    pub user_id: UserId,
    /// The authenticated email
    pub email: String,
    /// The full session
    pub session: Session,
    /// The raw token the client presented
    pub token: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let SessionToken(token) = SessionToken::from_headers(&parts.headers);
        let token = token.ok_or(AuthError::Unauthorized)?;

        let auth = Arc::<AuthService>::from_ref(state);
        let session = auth.authenticate(&token).await.map_err(|e| {
            if e.is_authentication_failure() {
                tracing::debug!("Rejected session token");
            }
            AppError::from(e)
        })?;

        Ok(Self {
            user_id: session.user_id,
            email: session.email.clone(),
            session,
            token,
        })
    }
}

//! HTTP handlers for authentication endpoints.
//!
//! Handlers take `State<Arc<AuthService>>`, so they work with any router
//! state that implements `FromRef` for it.

pub mod magic_link;
pub mod session;

use crate::error::AuthError;
use axum::http::{HeaderValue, StatusCode, header};
use eventmaker_web::{AppError, SESSION_COOKIE};

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match &err {
            AuthError::InvalidEmail => Self::bad_request(err.to_string()),
            AuthError::RegistrationClosed => Self::forbidden(err.to_string()),
            AuthError::MagicLinkExpired | AuthError::MagicLinkInvalid => {
                Self::unauthorized(err.to_string())
            }
            AuthError::Unauthorized => Self::unauthorized("Unauthorized"),
            AuthError::EmailError(_)
            | AuthError::DatabaseError(_)
            | AuthError::ConfigurationError(_) => {
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    eventmaker_web::INTERNAL_ERROR_MESSAGE,
                    "INTERNAL_SERVER_ERROR",
                )
                .with_source(anyhow::Error::new(err))
            }
        }
    }
}

/// `Set-Cookie` value carrying a session token for `max_age_secs`.
fn session_cookie(token: &str, max_age_secs: i64) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}"
    ))
    .ok()
}

/// `Set-Cookie` value that clears the session cookie.
fn cleared_session_cookie() -> (header::HeaderName, HeaderValue) {
    (
        header::SET_COOKIE,
        HeaderValue::from_static("session_token=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"),
    )
}

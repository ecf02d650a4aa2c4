//! Magic Link authentication handlers.
//!
//! Implements passwordless authentication via email magic links.

use super::session_cookie;
use crate::service::AuthService;
use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
};
use chrono::{DateTime, Utc};
use eventmaker_core::UserId;
use eventmaker_web::{AppError, ClientIp, CorrelationId, UserAgent};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request to send a magic link.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SendMagicLinkRequest {
    /// Email address to send magic link to.
    pub email: String,
}

/// Response after sending magic link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMagicLinkResponse {
    /// Confirmation message.
    pub message: String,

    /// Email address (for confirmation).
    pub email: String,

    /// The link itself, only when links are exposed for testing.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub magic_link: Option<String>,
}

/// Query string of the verification link.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyMagicLinkQuery {
    /// Magic link token from email.
    #[serde(default)]
    pub token: String,
}

/// Response after successful magic link verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyMagicLinkResponse {
    /// Session token for authentication.
    pub session_token: String,

    /// Signed-in user.
    pub user_id: UserId,

    /// User's email.
    pub email: String,

    /// Session expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

/// Send magic link to user's email.
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/magic-link/send
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "message": "Magic link sent. Check your email.",
///   "email": "user@example.com"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Malformed body or email address
/// - `403 Forbidden`: Unknown email while registration is closed
pub async fn send_magic_link(
    State(auth): State<Arc<AuthService>>,
    correlation_id: CorrelationId,
    client_ip: ClientIp,
    user_agent: UserAgent,
    payload: Result<Json<SendMagicLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SendMagicLinkResponse>), AppError> {
    let Json(request) = payload.map_err(|_| AppError::bad_request("Invalid email address"))?;

    tracing::debug!(
        correlation_id = %correlation_id.0,
        client_ip = %client_ip.0,
        user_agent = %user_agent.0,
        "Magic link requested"
    );

    let sent = auth.send_magic_link(&request.email).await?;

    Ok((
        StatusCode::OK,
        Json(SendMagicLinkResponse {
            message: "Magic link sent. Check your email.".to_string(),
            email: sent.email,
            magic_link: sent.magic_link,
        }),
    ))
}

/// Verify magic link token and create session.
///
/// # Endpoint
///
/// ```text
/// GET /api/auth/magic-link/verify?token=abc123...
/// ```
///
/// # Response (Success)
///
/// ```json
/// {
///   "sessionToken": "q3Zk...",
///   "userId": "550e8400-e29b-41d4-a716-446655440000",
///   "email": "user@example.com",
///   "expiresAt": "2025-11-09T18:00:00Z"
/// }
/// ```
///
/// The token is also set as the `session_token` cookie.
///
/// # Response (Error)
///
/// - `401 Unauthorized`: Invalid, used or expired token
pub async fn verify_magic_link(
    State(auth): State<Arc<AuthService>>,
    Query(query): Query<VerifyMagicLinkQuery>,
) -> Result<(StatusCode, HeaderMap, Json<VerifyMagicLinkResponse>), AppError> {
    let grant = auth.verify_magic_link(&query.token).await?;

    let mut headers = HeaderMap::new();
    if let Some(cookie) = session_cookie(
        &grant.session_token,
        auth.config().session_ttl.num_seconds(),
    ) {
        headers.insert(header::SET_COOKIE, cookie);
    }

    Ok((
        StatusCode::OK,
        headers,
        Json(VerifyMagicLinkResponse {
            session_token: grant.session_token,
            user_id: grant.user.id,
            email: grant.user.email,
            expires_at: grant.session.expires_at,
        }),
    ))
}

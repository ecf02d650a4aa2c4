//! Event creation and lookup by join code.

use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use eventmaker_auth::SessionUser;
use eventmaker_core::{CreateEventRequest, Event, EventDetails, EventError, ValidationErrors};
use eventmaker_web::AppError;

/// Create an event owned by the signed-in user.
///
/// `POST /api/events`
///
/// # Errors
///
/// - 401 without a session
/// - 400 "Invalid event data" with field errors, also for an unreadable body
/// - 404 "User not found" if the session's user has no account row
pub async fn create_event(
    State(state): State<AppState>,
    user: SessionUser,
    body: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    let Json(request) = body.map_err(|rejection| {
        EventError::Validation(ValidationErrors::body(rejection.body_text()))
    })?;

    let event = state.events.create_event(&user.email, request).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Public details of the event with `code`.
///
/// `GET /api/events/code/:code`
///
/// # Errors
///
/// 404 "Event not found" for unknown or malformed codes.
pub async fn get_event_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<EventDetails>, AppError> {
    let details = state.events.get_event_by_code(&code).await?;
    Ok(Json(details))
}

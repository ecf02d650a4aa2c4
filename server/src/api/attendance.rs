//! Joining events and reading one's own attendance.

use super::parse_event_id;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use eventmaker_auth::SessionUser;
use eventmaker_core::{Attendance, EventError};
use eventmaker_web::AppError;

/// `POST /api/events/:id/join`
///
/// # Errors
///
/// - 401 without a session
/// - 404 "Event not found", also for a malformed id
/// - 400 when the event is full or the user already joined
pub async fn join_event(
    State(state): State<AppState>,
    user: SessionUser,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<Attendance>), AppError> {
    let event_id = parse_event_id(&id, EventError::EventNotFound)?;
    let attendance = state.events.join_event(event_id, user.user_id).await?;
    Ok((StatusCode::CREATED, Json(attendance)))
}

/// `GET /api/events/:id/attendance`
///
/// # Errors
///
/// - 401 without a session
/// - 404 "Attendance not found", also for a malformed id
pub async fn get_attendance(
    State(state): State<AppState>,
    user: SessionUser,
    Path(id): Path<String>,
) -> Result<Json<Attendance>, AppError> {
    let event_id = parse_event_id(&id, EventError::AttendanceNotFound)?;
    let attendance = state.events.get_attendance(event_id, user.user_id).await?;
    Ok(Json(attendance))
}

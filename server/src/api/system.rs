//! System initialization status.

use crate::state::AppState;
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Individual readiness checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitChecks {
    /// Store answered a ping
    pub database: bool,
    /// Required configuration was provided
    pub environment: bool,
    /// Registered users, if countable
    pub users: Option<i64>,
}

/// Body of `GET /api/system/init`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitResponse {
    /// Every check passed
    pub ready: bool,
    /// Individual results
    pub checks: InitChecks,
    /// When the check ran
    pub timestamp: DateTime<Utc>,
}

/// Run the readiness check on demand.
///
/// `GET /api/system/init`
pub async fn init(State(state): State<AppState>) -> Json<InitResponse> {
    let report = state.readiness.check().await;
    Json(InitResponse {
        ready: report.ready,
        checks: InitChecks {
            database: report.database,
            environment: report.environment,
            users: report.users,
        },
        timestamp: report.checked_at,
    })
}

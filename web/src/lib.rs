//! Axum integration for EventMaker.
//!
//! The HTTP shell around the event and auth services:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         HTTP shell (Axum)               │  ← JSON, headers, cookies
//! │  - Request parsing                      │  ← Correlation IDs
//! │  - Error → status mapping               │  ← Logging, metrics
//! ├─────────────────────────────────────────┤
//! │         Services                        │
//! │  - EventService, AuthService            │  ← Injected repositories
//! └─────────────────────────────────────────┘
//! ```
//!
//! Handlers return `Result<_, AppError>`; every failure is rendered as
//! `{"message": ...}` with `errors` added for validation failures.
//!
//! # Example
//!
//! ```ignore
//! use eventmaker_web::{AppError, correlation_id_layer};
//! use axum::{Router, routing::get, Json};
//!
//! async fn show(
//!     State(state): State<AppState>,
//!     Path(code): Path<String>,
//! ) -> Result<Json<EventDetails>, AppError> {
//!     Ok(Json(state.events.get_event_by_code(&code).await?))
//! }
//!
//! let app = Router::new()
//!     .route("/api/events/code/:code", get(show))
//!     .layer(correlation_id_layer())
//!     .with_state(app_state);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;

// Re-export key types for convenience
pub use error::{AppError, INTERNAL_ERROR_MESSAGE};
pub use extractors::{ClientIp, CorrelationId, SESSION_COOKIE, SessionToken, UserAgent};
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer};


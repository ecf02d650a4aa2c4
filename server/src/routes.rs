//! Router configuration for EventMaker.

use crate::api::{attendance, events, system};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use eventmaker_auth::auth_router;
use eventmaker_web::correlation_id_layer;
use eventmaker_web::handlers::health_check;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// - `/health` liveness
/// - `/api/auth/*` magic link sign-in and sessions
/// - `/api/events/*` event creation, lookup and joining
/// - `/api/system/init` readiness
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/events", post(events::create_event))
        .route("/events/code/:code", get(events::get_event_by_code))
        .route("/events/:id/join", post(attendance::join_event))
        .route("/events/:id/attendance", get(attendance::get_attendance))
        .route("/system/init", get(system::init))
        .nest("/auth", auth_router());

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
        .with_state(state)
}

/// Prometheus scrape endpoint at `/metrics`.
pub fn metrics_router(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || std::future::ready(handle.render())))
}

//! Metric descriptions for the EventMaker server.
//!
//! # Exported Metrics
//!
//! ## Counters
//! - `events.created` - Events stored
//! - `events.code_collisions` - Join codes regenerated after a collision
//! - `events.joins{outcome}` - Join attempts (joined, at_capacity, already_joined)
//! - `auth.magic_links{outcome}` - Magic link requests (sent, registration_closed, delivery_failed)
//! - `auth.verifications{outcome}` - Magic link verifications (signed_in, invalid, expired)
//! - `http.requests{method,status}` - HTTP requests served
//!
//! ## Gauges
//! - `users.registered` - Users counted by the last readiness check
//! - `readiness.ready` - 1 when the last readiness check passed
//!
//! ## Histograms
//! - `http.request_duration_seconds` - Request latency

use metrics::{describe_counter, describe_gauge, describe_histogram};

/// Register descriptions for every metric the server records.
///
/// Call once at startup, after the recorder is installed.
pub fn register_metrics() {
    // Event metrics
    describe_counter!("events.created", "Total number of events created");
    describe_counter!(
        "events.code_collisions",
        "Join codes regenerated because the first draw was taken"
    );
    describe_counter!(
        "events.joins",
        "Join attempts by outcome (joined, at_capacity, already_joined)"
    );

    // Auth metrics
    describe_counter!(
        "auth.magic_links",
        "Magic link requests by outcome (sent, registration_closed, delivery_failed)"
    );
    describe_counter!(
        "auth.verifications",
        "Magic link verifications by outcome (signed_in, invalid, expired)"
    );

    // HTTP metrics
    describe_counter!("http.requests", "HTTP requests by method and status");
    describe_histogram!(
        "http.request_duration_seconds",
        "Time taken to serve an HTTP request"
    );

    // Readiness
    describe_gauge!("users.registered", "Registered users at the last readiness check");
    describe_gauge!("readiness.ready", "1 if the last readiness check passed, else 0");

    tracing::info!("Metrics registered");
}

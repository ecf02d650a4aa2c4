//! # EventMaker Server
//!
//! HTTP API for creating events, sharing them by join code, and joining
//! them, with passwordless sign-in.
//!
//! The binary (`src/main.rs`) wires Postgres storage, the auth providers and
//! this crate's router together; tests build the same router over in-memory
//! stores.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod config;
pub mod metrics;
pub mod readiness;
pub mod routes;
pub mod state;

pub use config::{Config, ConfigError};
pub use readiness::{ReadinessChecker, ReadinessReport};
pub use routes::{build_router, metrics_router};
pub use state::AppState;

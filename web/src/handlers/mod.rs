//! HTTP handlers shared by every deployment.

pub mod health;

pub use health::{HealthResponse, health_check};

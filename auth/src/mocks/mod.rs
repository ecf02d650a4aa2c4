//! Mock provider implementations for testing.
//!
//! This module provides simple, in-memory implementations of all provider traits
//! for use in unit and integration tests.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Lock poisoning only follows a panicking test

pub mod email;
pub mod session;
pub mod token_store;
pub mod user;

pub use email::{MockEmailProvider, SentEmail};
pub use session::MockSessionStore;
pub use token_store::MockTokenStore;
pub use user::MockUserRepository;

//! Adapters - Implementations of port interfaces.
//!
//! - `postgres` - sqlx-backed persistence adapters
//! - `memory` - in-memory adapters for tests
//! - `notification` - tracing-backed notification sink
//! - `security` - Argon2 credential hashing
//! - `http` - axum REST API

pub mod http;
pub mod memory;
pub mod notification;
pub mod postgres;
pub mod security;

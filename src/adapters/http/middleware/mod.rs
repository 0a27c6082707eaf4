//! HTTP middleware for axum.
//!
//! - `auth` - API-key middleware and identity extractors

pub mod auth;

pub use auth::{require_api_key, AdminReviewer, AuthenticatedMember};

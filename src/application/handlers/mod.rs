//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations through the
//! ports. One file per use case; HTTP adapters construct these on demand.

pub mod dashboard;
pub mod intent;
pub mod member;
pub mod referral;

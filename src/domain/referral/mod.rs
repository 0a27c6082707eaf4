//! Business referral domain module.
//!
//! Covers the referral workflow between members: creation, recipient-driven
//! status changes, the append-only status history, and per-member statistics.

mod aggregate;
mod errors;
mod history;
mod statistics;
mod status;

pub use aggregate::{BusinessReferral, ReferralDetails};
pub use errors::ReferralError;
pub use history::StatusChange;
pub use statistics::ReferralStatistics;
pub use status::ReferralStatus;

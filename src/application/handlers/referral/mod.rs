//! Referral lifecycle command and query handlers.

mod create_referral;
mod queries;
mod update_status;

pub use create_referral::{CreateReferralCommand, CreateReferralHandler, CreateReferralResult};
pub use queries::{
    GetReferralQuery, ListReferralsQuery, ReferralDetail, ReferralListing, ReferralQueryHandler,
};
pub use update_status::{
    UpdateReferralStatusCommand, UpdateReferralStatusHandler, UpdateReferralStatusResult,
};

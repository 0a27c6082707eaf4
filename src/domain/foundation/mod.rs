//! Foundation module - Shared domain primitives.
//!
//! Value objects and traits used across every domain module: strongly-typed
//! identifiers, timestamps, the error taxonomy, the state machine trait, and
//! pagination primitives.

mod errors;
mod ids;
mod pagination;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{IntentId, MemberId, ReferralId, UserId};
pub use pagination::{
    Page, PageMeta, PageRequest, SortOrder, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;

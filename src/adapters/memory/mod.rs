//! In-memory adapters for testing.
//!
//! Deterministic, lock-based implementations of the persistence and
//! notification ports. They back the handler unit tests and the integration
//! tests under `tests/`; production wiring uses the postgres adapters.

mod intent_repository;
mod member_store;
mod notification;
mod referral_repository;

pub use intent_repository::InMemoryIntentRepository;
pub use member_store::InMemoryMemberStore;
pub use notification::RecordingNotificationSink;
pub use referral_repository::InMemoryReferralRepository;

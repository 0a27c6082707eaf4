//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `IntentRepository` - Membership intent storage
//! - `MemberRepository` / `MemberReader` - Member writes and read views
//! - `ReferralRepository` - Referrals plus their status history
//! - `UserRepository` - Login credential lookups
//! - `RegistrationUnit` - Atomic credential + member creation
//! - `DashboardReader` - One-pass dashboard counts
//!
//! ## Capability Ports
//!
//! - `NotificationSink` - Fire-and-forget outbound notifications
//! - `CredentialHasher` - Salted password hashing

mod credential_hasher;
mod dashboard_reader;
mod intent_repository;
mod member_reader;
mod member_repository;
mod notification_sink;
mod referral_repository;
mod registration_unit;
mod user_repository;

pub use credential_hasher::CredentialHasher;
pub use dashboard_reader::DashboardReader;
pub use intent_repository::{IntentListFilter, IntentRepository, IntentSortField};
pub use member_reader::{
    MemberListFilter, MemberListStats, MemberReader, MemberStatistics, MemberSummary,
};
pub use member_repository::MemberRepository;
pub use notification_sink::NotificationSink;
pub use referral_repository::{ReferralListFilter, ReferralRepository, ReferralScope};
pub use registration_unit::{NewRegistration, RegistrationUnit};
pub use user_repository::UserRepository;

//! PostgreSQL adapters - Database implementations for the persistence ports.
//!
//! - `PostgresIntentRepository` - Membership intents
//! - `PostgresMemberRepository` / `PostgresMemberReader` - Members
//! - `PostgresReferralRepository` - Referrals plus status history
//! - `PostgresUserRepository` - Login credentials
//! - `PostgresRegistrationUnit` - Atomic credential + member creation
//! - `PostgresDashboardReader` - One-pass dashboard counts

mod dashboard_reader;
mod intent_repository;
mod member_reader;
mod member_repository;
mod referral_repository;
mod registration_unit;
mod user_repository;

pub use dashboard_reader::PostgresDashboardReader;
pub use intent_repository::PostgresIntentRepository;
pub use member_reader::PostgresMemberReader;
pub use member_repository::PostgresMemberRepository;
pub use referral_repository::PostgresReferralRepository;
pub use registration_unit::PostgresRegistrationUnit;
pub use user_repository::PostgresUserRepository;

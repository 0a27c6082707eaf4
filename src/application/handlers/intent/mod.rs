//! Membership intent command and query handlers.

mod complete_registration;
mod queries;
mod review_intent;
mod submit_intent;
mod validate_token;

pub use complete_registration::{
    CompleteRegistrationCommand, CompleteRegistrationHandler, CompleteRegistrationResult,
};
pub use queries::{GetIntentQuery, IntentQueryHandler, ListIntentsQuery};
pub use review_intent::{
    ApproveIntentCommand, RejectIntentCommand, ReviewIntentHandler, ReviewIntentResult,
};
pub use submit_intent::{SubmitIntentCommand, SubmitIntentHandler, SubmitIntentResult};
pub use validate_token::{ValidateTokenHandler, ValidateTokenQuery};

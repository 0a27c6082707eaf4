//! Business referral status state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Workflow status of a business referral.
///
/// Transitions are deliberately unrestricted: the recipient may move a
/// referral between any two statuses (including straight from Pending to
/// Closed, or back out of Lost). The only transition rule - Closed requires
/// a closed value - is enforced by the aggregate, not the status enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferralStatus {
    /// Freshly created; the recipient has not acted yet.
    Pending,

    /// The recipient reached out to the referred client.
    Contacted,

    /// A deal is being negotiated.
    Negotiating,

    /// Business closed; carries the closed value.
    Closed,

    /// The lead did not convert.
    Lost,

    /// Withdrawn by the recipient.
    Cancelled,
}

impl ReferralStatus {
    /// All statuses, in workflow order.
    pub const ALL: [ReferralStatus; 6] = [
        ReferralStatus::Pending,
        ReferralStatus::Contacted,
        ReferralStatus::Negotiating,
        ReferralStatus::Closed,
        ReferralStatus::Lost,
        ReferralStatus::Cancelled,
    ];
}

impl StateMachine for ReferralStatus {
    fn can_transition_to(&self, _target: &Self) -> bool {
        true
    }

    fn valid_transitions(&self) -> Vec<Self> {
        Self::ALL.to_vec()
    }
}

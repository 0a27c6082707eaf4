//! Member status state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a registered member.
///
/// Members are soft-deleted by moving to Inactive; rows are never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberStatus {
    /// In good standing; may create and receive referrals.
    Active,

    /// Soft-deleted. Profile is retained for history.
    Inactive,

    /// Temporarily barred (e.g. unpaid fees); may be reinstated.
    Suspended,
}

impl MemberStatus {
    /// Returns true if the member may participate in referrals.
    pub fn is_active(&self) -> bool {
        matches!(self, MemberStatus::Active)
    }
}

impl StateMachine for MemberStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use MemberStatus::*;
        matches!(
            (self, target),
            (Active, Inactive) | (Active, Suspended) | (Suspended, Active) | (Suspended, Inactive) | (Inactive, Active)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use MemberStatus::*;
        match self {
            Active => vec![Inactive, Suspended],
            Suspended => vec![Active, Inactive],
            Inactive => vec![Active],
        }
    }
}

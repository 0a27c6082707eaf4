//! Membership intent status state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Review status of a membership intent.
///
/// An intent starts Pending and is resolved exactly once by an admin
/// review. Both outcomes are terminal; a rejected candidate submits a new
/// intent rather than reopening the old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentStatus {
    /// Submitted and awaiting admin review.
    Pending,

    /// Approved; carries an invite token until it is redeemed or expires.
    Approved,

    /// Rejected by an admin. Terminal.
    Rejected,
}

impl IntentStatus {
    /// Returns true while the intent blocks new submissions for the same
    /// email (at most one Pending or Approved intent per email).
    pub fn is_active(&self) -> bool {
        matches!(self, IntentStatus::Pending | IntentStatus::Approved)
    }
}

impl StateMachine for IntentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use IntentStatus::*;
        matches!((self, target), (Pending, Approved) | (Pending, Rejected))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use IntentStatus::*;
        match self {
            Pending => vec![Approved, Rejected],
            Approved | Rejected => vec![],
        }
    }
}

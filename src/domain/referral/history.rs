//! Referral status history records.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ReferralId, Timestamp, UserId};

use super::ReferralStatus;

/// One immutable entry in a referral's status history.
///
/// Appended on creation (`from_status: None -> Pending`) and on every status
/// change; never updated or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub referral_id: ReferralId,
    pub from_status: Option<ReferralStatus>,
    pub to_status: ReferralStatus,
    pub changed_by: UserId,
    pub notes: Option<String>,
    pub changed_at: Timestamp,
}

impl StatusChange {
    /// The initial record appended when a referral is created.
    pub fn initial(referral_id: ReferralId, changed_by: UserId) -> Self {
        Self {
            referral_id,
            from_status: None,
            to_status: ReferralStatus::Pending,
            changed_by,
            notes: None,
            changed_at: Timestamp::now(),
        }
    }
}

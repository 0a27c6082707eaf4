//! BusinessReferral aggregate entity.
//!
//! A referral is a lead one member passes to another. The recipient drives
//! the workflow: every status change is theirs to make and is recorded in an
//! append-only history log.
//!
//! # Design Decisions
//!
//! - **Money in cents**: `estimated_value` and `closed_value` are i64 cents.
//! - **Unrestricted transitions**: any status may move to any other; the one
//!   rule is that Closed requires a non-negative closed value.
//! - **closed_at**: stamped only when a change lands on Closed.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MemberId, ReferralId, Timestamp, UserId};

use super::{ReferralError, ReferralStatus, StatusChange};

/// Client and deal details supplied at creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralDetails {
    pub client_name: String,
    pub client_phone: Option<String>,
    pub client_email: Option<String>,
    pub description: String,
    /// Estimated deal value in cents.
    pub estimated_value: Option<i64>,
}

/// BusinessReferral aggregate - a lead passed between members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessReferral {
    pub id: ReferralId,
    pub referrer_id: MemberId,
    pub referred_to_id: MemberId,

    pub client_name: String,
    pub client_phone: Option<String>,
    pub client_email: Option<String>,
    pub description: String,
    pub estimated_value: Option<i64>,

    pub status: ReferralStatus,
    pub feedback: Option<String>,
    /// Final deal value in cents; present only once Closed.
    pub closed_value: Option<i64>,
    pub closed_at: Option<Timestamp>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl BusinessReferral {
    /// Creates a new Pending referral plus its initial history record.
    ///
    /// `changed_by` is the referrer's login credential, recorded as the
    /// author of the initial history entry.
    ///
    /// # Errors
    ///
    /// Returns `SelfReferral` if referrer and recipient are the same member,
    /// regardless of either member's status.
    pub fn create(
        id: ReferralId,
        referrer_id: MemberId,
        referred_to_id: MemberId,
        changed_by: UserId,
        details: ReferralDetails,
    ) -> Result<(Self, StatusChange), ReferralError> {
        if referrer_id == referred_to_id {
            return Err(ReferralError::SelfReferral);
        }

        if let Some(value) = details.estimated_value {
            if value < 0 {
                return Err(ReferralError::validation(
                    "estimated_value",
                    "must not be negative",
                ));
            }
        }

        let now = Timestamp::now();
        let referral = Self {
            id,
            referrer_id,
            referred_to_id,
            client_name: details.client_name,
            client_phone: details.client_phone,
            client_email: details.client_email,
            description: details.description,
            estimated_value: details.estimated_value,
            status: ReferralStatus::Pending,
            feedback: None,
            closed_value: None,
            closed_at: None,
            created_at: now,
            updated_at: now,
        };

        let change = StatusChange::initial(id, changed_by);
        Ok((referral, change))
    }

    /// Moves the referral to a new status, returning the history record to
    /// append.
    ///
    /// # Errors
    ///
    /// - `MissingClosedValue` when moving to Closed without a value.
    /// - `ValidationFailed` when the closed value is negative.
    pub fn update_status(
        &mut self,
        new_status: ReferralStatus,
        feedback: Option<String>,
        closed_value: Option<i64>,
        changed_by: UserId,
    ) -> Result<StatusChange, ReferralError> {
        if new_status == ReferralStatus::Closed {
            match closed_value {
                None => return Err(ReferralError::MissingClosedValue(self.id)),
                Some(value) if value < 0 => {
                    return Err(ReferralError::validation(
                        "closed_value",
                        "must not be negative",
                    ));
                }
                Some(_) => {}
            }
        }

        let from_status = self.status;
        let now = Timestamp::now();

        self.status = new_status;
        if feedback.is_some() {
            self.feedback = feedback.clone();
        }
        if closed_value.is_some() {
            self.closed_value = closed_value;
        }
        if new_status == ReferralStatus::Closed {
            self.closed_at = Some(now);
        }
        self.updated_at = now;

        Ok(StatusChange {
            referral_id: self.id,
            from_status: Some(from_status),
            to_status: new_status,
            changed_by,
            notes: feedback,
            changed_at: now,
        })
    }

    /// Returns true if the member is referrer or recipient.
    pub fn involves(&self, member_id: MemberId) -> bool {
        self.referrer_id == member_id || self.referred_to_id == member_id
    }

    /// Returns true if the member is the recipient of this referral.
    pub fn is_received_by(&self, member_id: MemberId) -> bool {
        self.referred_to_id == member_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> ReferralDetails {
        ReferralDetails {
            client_name: "Cliente Exemplo".to_string(),
            client_phone: Some("+5511944444444".to_string()),
            client_email: Some("cliente@example.com".to_string()),
            description: "Needs an ERP implementation".to_string(),
            estimated_value: Some(50_000_00),
        }
    }

    fn new_referral() -> (BusinessReferral, StatusChange) {
        BusinessReferral::create(
            ReferralId::new(),
            MemberId::new(),
            MemberId::new(),
            UserId::new(),
            details(),
        )
        .unwrap()
    }

    // Creation

    #[test]
    fn create_starts_pending_with_initial_history() {
        let (referral, change) = new_referral();

        assert_eq!(referral.status, ReferralStatus::Pending);
        assert!(referral.closed_value.is_none());
        assert!(referral.closed_at.is_none());
        assert_eq!(change.referral_id, referral.id);
        assert!(change.from_status.is_none());
        assert_eq!(change.to_status, ReferralStatus::Pending);
    }

    #[test]
    fn create_rejects_self_referral() {
        let member = MemberId::new();
        let result = BusinessReferral::create(
            ReferralId::new(),
            member,
            member,
            UserId::new(),
            details(),
        );
        assert!(matches!(result, Err(ReferralError::SelfReferral)));
    }

    #[test]
    fn create_rejects_negative_estimated_value() {
        let result = BusinessReferral::create(
            ReferralId::new(),
            MemberId::new(),
            MemberId::new(),
            UserId::new(),
            ReferralDetails {
                estimated_value: Some(-1),
                ..details()
            },
        );
        assert!(matches!(result, Err(ReferralError::ValidationFailed { .. })));
    }

    // Status updates

    #[test]
    fn update_status_records_transition() {
        let (mut referral, _) = new_referral();
        let user = UserId::new();

        let change = referral
            .update_status(
                ReferralStatus::Contacted,
                Some("called the client".to_string()),
                None,
                user,
            )
            .unwrap();

        assert_eq!(referral.status, ReferralStatus::Contacted);
        assert_eq!(referral.feedback.as_deref(), Some("called the client"));
        assert_eq!(change.from_status, Some(ReferralStatus::Pending));
        assert_eq!(change.to_status, ReferralStatus::Contacted);
        assert_eq!(change.changed_by, user);
        assert_eq!(change.notes.as_deref(), Some("called the client"));
    }

    #[test]
    fn closing_without_value_fails() {
        let (mut referral, _) = new_referral();
        let result =
            referral.update_status(ReferralStatus::Closed, None, None, UserId::new());
        assert!(matches!(result, Err(ReferralError::MissingClosedValue(_))));
        assert_eq!(referral.status, ReferralStatus::Pending);
        assert!(referral.closed_at.is_none());
    }

    #[test]
    fn closing_with_negative_value_fails() {
        let (mut referral, _) = new_referral();
        let result = referral.update_status(
            ReferralStatus::Closed,
            None,
            Some(-10_00),
            UserId::new(),
        );
        assert!(matches!(result, Err(ReferralError::ValidationFailed { .. })));
    }

    #[test]
    fn closing_with_value_stamps_closed_at() {
        let (mut referral, _) = new_referral();
        referral
            .update_status(ReferralStatus::Closed, None, Some(42_000_00), UserId::new())
            .unwrap();

        assert_eq!(referral.status, ReferralStatus::Closed);
        assert_eq!(referral.closed_value, Some(42_000_00));
        assert!(referral.closed_at.is_some());
    }

    #[test]
    fn closing_with_zero_value_is_allowed() {
        let (mut referral, _) = new_referral();
        let result = referral.update_status(ReferralStatus::Closed, None, Some(0), UserId::new());
        assert!(result.is_ok());
    }

    #[test]
    fn non_closing_update_leaves_closed_at_unset() {
        let (mut referral, _) = new_referral();
        referral
            .update_status(ReferralStatus::Negotiating, None, None, UserId::new())
            .unwrap();
        assert!(referral.closed_at.is_none());
    }

    #[test]
    fn pending_can_jump_directly_to_any_status() {
        for target in [
            ReferralStatus::Contacted,
            ReferralStatus::Negotiating,
            ReferralStatus::Lost,
            ReferralStatus::Cancelled,
        ] {
            let (mut referral, _) = new_referral();
            assert!(referral
                .update_status(target, None, None, UserId::new())
                .is_ok());
            assert_eq!(referral.status, target);
        }
    }

    #[test]
    fn closed_can_move_back_to_contacted() {
        // Unrestricted transitions are intentional; see ReferralStatus docs.
        let (mut referral, _) = new_referral();
        referral
            .update_status(ReferralStatus::Closed, None, Some(100), UserId::new())
            .unwrap();
        let result =
            referral.update_status(ReferralStatus::Contacted, None, None, UserId::new());
        assert!(result.is_ok());
    }

    // Participation

    #[test]
    fn involves_matches_both_sides() {
        let (referral, _) = new_referral();
        assert!(referral.involves(referral.referrer_id));
        assert!(referral.involves(referral.referred_to_id));
        assert!(!referral.involves(MemberId::new()));
    }

    #[test]
    fn is_received_by_matches_only_recipient() {
        let (referral, _) = new_referral();
        assert!(referral.is_received_by(referral.referred_to_id));
        assert!(!referral.is_received_by(referral.referrer_id));
    }
}

//! MembershipIntent aggregate entity.
//!
//! A membership intent is a candidate's application to join the group. It is
//! created by a public submission, resolved exactly once by an admin review,
//! and - when approved - carries a single-use invite token that the candidate
//! exchanges for full registration.
//!
//! # Invariants
//!
//! - At most one active (Pending or Approved) intent per email, enforced by
//!   the submission handler together with a partial unique index.
//! - The invite token is set only on approval and consumed by exactly one
//!   successful registration.
//! - Intents are never deleted; rejection is terminal.

use crate::domain::foundation::{IntentId, StateMachine, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{IntentError, IntentStatus};

/// Days an invite token stays redeemable after approval.
pub const INVITE_TOKEN_TTL_DAYS: i64 = 7;

/// Candidate-supplied fields of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentSubmission {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub industry: Option<String>,
    pub motivation: String,
}

/// MembershipIntent aggregate - a candidate's application to join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipIntent {
    pub id: IntentId,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub industry: Option<String>,
    pub motivation: String,
    pub status: IntentStatus,

    /// Admin who resolved the review (approve or reject).
    pub reviewed_by: Option<UserId>,
    pub reviewed_at: Option<Timestamp>,
    pub review_notes: Option<String>,
    pub rejection_reason: Option<String>,

    /// Opaque single-use invite token, present only after approval.
    pub invite_token: Option<String>,
    pub token_expires_at: Option<Timestamp>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MembershipIntent {
    /// Creates a new Pending intent from a candidate submission.
    pub fn submit(id: IntentId, submission: IntentSubmission) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            full_name: submission.full_name,
            email: submission.email,
            phone: submission.phone,
            company: submission.company,
            industry: submission.industry,
            motivation: submission.motivation,
            status: IntentStatus::Pending,
            reviewed_by: None,
            reviewed_at: None,
            review_notes: None,
            rejection_reason: None,
            invite_token: None,
            token_expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Approves a pending intent, issuing a fresh invite token.
    ///
    /// Returns the generated token so the caller can hand it to the
    /// notification sink.
    ///
    /// # Errors
    ///
    /// Returns `NotPending` if the intent has already been reviewed.
    pub fn approve(
        &mut self,
        reviewer: UserId,
        notes: Option<String>,
    ) -> Result<String, IntentError> {
        self.transition_to(IntentStatus::Approved)?;

        let token = Uuid::new_v4().to_string();
        let now = Timestamp::now();

        self.invite_token = Some(token.clone());
        self.token_expires_at = Some(now.add_days(INVITE_TOKEN_TTL_DAYS));
        self.reviewed_by = Some(reviewer);
        self.reviewed_at = Some(now);
        self.review_notes = notes;
        self.updated_at = now;

        Ok(token)
    }

    /// Rejects a pending intent.
    ///
    /// # Errors
    ///
    /// Returns `NotPending` if the intent has already been reviewed.
    pub fn reject(&mut self, reviewer: UserId, reason: Option<String>) -> Result<(), IntentError> {
        self.transition_to(IntentStatus::Rejected)?;

        let now = Timestamp::now();
        self.reviewed_by = Some(reviewer);
        self.reviewed_at = Some(now);
        self.rejection_reason = reason;
        self.updated_at = now;

        Ok(())
    }

    /// Checks that this intent's token can still be redeemed at `now`.
    ///
    /// Covers the status and expiry preconditions; the single-use check
    /// (no member referencing this intent yet) requires a store lookup and
    /// lives in the validate-token handler.
    pub fn ensure_redeemable(&self, now: Timestamp) -> Result<(), IntentError> {
        if self.status != IntentStatus::Approved {
            return Err(IntentError::NotApproved(self.id));
        }

        match self.token_expires_at {
            Some(expires_at) if now <= expires_at => Ok(()),
            _ => Err(IntentError::TokenExpired(self.id)),
        }
    }

    /// Returns true while this intent blocks new submissions for its email.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    fn transition_to(&mut self, target: IntentStatus) -> Result<(), IntentError> {
        self.status = self
            .status
            .transition_to(target)
            .map_err(|_| IntentError::not_pending(self.id, self.status))?;
        Ok(())
    }
}

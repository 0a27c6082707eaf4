//! Member aggregate entity.
//!
//! A member is a registered, profile-complete participant. Exactly one member
//! is created per redeemed invite token (the `intent_id` back-reference is
//! unique), and each member owns exactly one login credential.
//!
//! # Design Decisions
//!
//! - **Soft delete**: deactivation flips the status to Inactive and stamps
//!   `membership_end_date`; rows are never removed.
//! - **Idempotent deactivation**: deactivating an already-inactive member is
//!   a no-op, not an error.
//! - **Money in cents**: monetary statistics are i64 cents, never floats.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{IntentId, MemberId, Timestamp, UserId};

use super::{Address, MemberStatus};

/// Profile attributes shared by registration and admin-created members.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cpf: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub photo_url: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub industry: Option<String>,
    pub business_description: Option<String>,
    pub website: Option<String>,
    pub linkedin_url: Option<String>,
    pub address: Address,
}

/// Partial update applied to a member profile.
///
/// Fields left as `None` keep their current value; the address patch is
/// merged field-by-field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MemberUpdate {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub cpf: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub photo_url: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub industry: Option<String>,
    pub business_description: Option<String>,
    pub website: Option<String>,
    pub linkedin_url: Option<String>,
    pub address: Option<Address>,
}

/// Member aggregate - a registered participant of the networking group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,

    /// Login credential owned by this member.
    pub user_id: UserId,

    /// Originating membership intent (None for pre-system legacy members).
    pub intent_id: Option<IntentId>,

    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cpf: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub photo_url: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub industry: Option<String>,
    pub business_description: Option<String>,
    pub website: Option<String>,
    pub linkedin_url: Option<String>,
    pub address: Address,

    pub status: MemberStatus,
    pub membership_start_date: Timestamp,
    pub membership_end_date: Option<Timestamp>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Member {
    /// Creates a new Active member from a redeemed invite.
    pub fn register(
        id: MemberId,
        user_id: UserId,
        intent_id: IntentId,
        profile: MemberProfile,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            user_id,
            intent_id: Some(intent_id),
            full_name: profile.full_name,
            email: profile.email,
            phone: profile.phone,
            cpf: profile.cpf,
            birth_date: profile.birth_date,
            photo_url: profile.photo_url,
            company: profile.company,
            position: profile.position,
            industry: profile.industry,
            business_description: profile.business_description,
            website: profile.website,
            linkedin_url: profile.linkedin_url,
            address: profile.address,
            status: MemberStatus::Active,
            membership_start_date: now,
            membership_end_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial profile update.
    pub fn apply_update(&mut self, patch: MemberUpdate) {
        if let Some(full_name) = patch.full_name {
            self.full_name = full_name;
        }
        if patch.phone.is_some() {
            self.phone = patch.phone;
        }
        if patch.cpf.is_some() {
            self.cpf = patch.cpf;
        }
        if patch.birth_date.is_some() {
            self.birth_date = patch.birth_date;
        }
        if patch.photo_url.is_some() {
            self.photo_url = patch.photo_url;
        }
        if patch.company.is_some() {
            self.company = patch.company;
        }
        if patch.position.is_some() {
            self.position = patch.position;
        }
        if patch.industry.is_some() {
            self.industry = patch.industry;
        }
        if patch.business_description.is_some() {
            self.business_description = patch.business_description;
        }
        if patch.website.is_some() {
            self.website = patch.website;
        }
        if patch.linkedin_url.is_some() {
            self.linkedin_url = patch.linkedin_url;
        }
        if let Some(address_patch) = patch.address {
            self.address.merge(address_patch);
        }
        self.updated_at = Timestamp::now();
    }

    /// Soft-deletes this member.
    ///
    /// Returns `true` if the member transitioned to Inactive, `false` if it
    /// already was (idempotent no-op).
    pub fn deactivate(&mut self) -> bool {
        if self.status == MemberStatus::Inactive {
            return false;
        }
        let now = Timestamp::now();
        self.status = MemberStatus::Inactive;
        self.membership_end_date = Some(now);
        self.updated_at = now;
        true
    }

    /// Returns true if the member may participate in referrals.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> MemberProfile {
        MemberProfile {
            full_name: "João Silva".to_string(),
            email: "joao@empresa.com".to_string(),
            phone: Some("+5511999999999".to_string()),
            cpf: Some("123.456.789-00".to_string()),
            company: Some("Empresa XPTO Ltda".to_string()),
            position: Some("Commercial Director".to_string()),
            industry: Some("Technology".to_string()),
            ..Default::default()
        }
    }

    fn registered_member() -> Member {
        Member::register(MemberId::new(), UserId::new(), IntentId::new(), profile())
    }

    #[test]
    fn register_starts_active_with_start_date() {
        let member = registered_member();
        assert_eq!(member.status, MemberStatus::Active);
        assert!(member.membership_end_date.is_none());
        assert!(member.intent_id.is_some());
        assert!(member.is_active());
    }

    #[test]
    fn apply_update_changes_only_patched_fields() {
        let mut member = registered_member();
        member.apply_update(MemberUpdate {
            company: Some("Nova Empresa".to_string()),
            ..Default::default()
        });

        assert_eq!(member.company.as_deref(), Some("Nova Empresa"));
        assert_eq!(member.full_name, "João Silva");
        assert_eq!(member.cpf.as_deref(), Some("123.456.789-00"));
    }

    #[test]
    fn apply_update_merges_address_field_by_field() {
        let mut member = registered_member();
        member.apply_update(MemberUpdate {
            address: Some(Address {
                city: Some("São Paulo".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        });
        member.apply_update(MemberUpdate {
            address: Some(Address {
                state: Some("SP".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        });

        assert_eq!(member.address.city.as_deref(), Some("São Paulo"));
        assert_eq!(member.address.state.as_deref(), Some("SP"));
    }

    #[test]
    fn deactivate_sets_inactive_and_end_date() {
        let mut member = registered_member();
        let changed = member.deactivate();

        assert!(changed);
        assert_eq!(member.status, MemberStatus::Inactive);
        assert!(member.membership_end_date.is_some());
        assert!(!member.is_active());
    }

    #[test]
    fn deactivate_is_idempotent() {
        let mut member = registered_member();
        assert!(member.deactivate());

        let first_end_date = member.membership_end_date;
        assert!(!member.deactivate());
        assert_eq!(member.membership_end_date, first_end_date);
    }
}

//! HTTP DTOs for referral endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MemberId, PageRequest, Timestamp, DEFAULT_PAGE_LIMIT};
use crate::domain::referral::{
    BusinessReferral, ReferralDetails, ReferralStatistics, ReferralStatus, StatusChange,
};
use crate::ports::{ReferralListFilter, ReferralScope};

use super::super::response::PagedBody;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// New referral form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReferralRequest {
    pub referred_to_id: MemberId,
    pub client_name: String,
    #[serde(default)]
    pub client_phone: Option<String>,
    #[serde(default)]
    pub client_email: Option<String>,
    pub description: String,
    /// Estimated deal value in cents.
    #[serde(default)]
    pub estimated_value: Option<i64>,
}

impl CreateReferralRequest {
    pub fn into_parts(self) -> (MemberId, ReferralDetails) {
        (
            self.referred_to_id,
            ReferralDetails {
                client_name: self.client_name,
                client_phone: self.client_phone,
                client_email: self.client_email,
                description: self.description,
                estimated_value: self.estimated_value,
            },
        )
    }
}

/// Status transition request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReferralStatusRequest {
    pub status: ReferralStatus,
    #[serde(default)]
    pub feedback: Option<String>,
    /// Final deal value in cents; required when closing.
    #[serde(default)]
    pub closed_value: Option<i64>,
}

/// Query parameters of the referral listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListReferralsParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// `given`, `received`, or `all` (default).
    #[serde(default, rename = "type")]
    pub scope: Option<ReferralScope>,
    #[serde(default)]
    pub status: Option<ReferralStatus>,
    #[serde(default)]
    pub search: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

impl ListReferralsParams {
    pub fn into_parts(self) -> (ReferralListFilter, PageRequest) {
        (
            ReferralListFilter {
                scope: self.scope.unwrap_or_default(),
                status: self.status,
                search: self.search,
            },
            PageRequest::new(self.page, self.limit),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Referral view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralResponse {
    pub id: String,
    pub referrer_id: String,
    pub referred_to_id: String,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub client_email: Option<String>,
    pub description: String,
    pub estimated_value: Option<i64>,
    pub status: ReferralStatus,
    pub feedback: Option<String>,
    pub closed_value: Option<i64>,
    pub closed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<BusinessReferral> for ReferralResponse {
    fn from(referral: BusinessReferral) -> Self {
        Self {
            id: referral.id.to_string(),
            referrer_id: referral.referrer_id.to_string(),
            referred_to_id: referral.referred_to_id.to_string(),
            client_name: referral.client_name,
            client_phone: referral.client_phone,
            client_email: referral.client_email,
            description: referral.description,
            estimated_value: referral.estimated_value,
            status: referral.status,
            feedback: referral.feedback,
            closed_value: referral.closed_value,
            closed_at: referral.closed_at,
            created_at: referral.created_at,
            updated_at: referral.updated_at,
        }
    }
}

/// One history entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeResponse {
    pub from_status: Option<ReferralStatus>,
    pub to_status: ReferralStatus,
    pub changed_by: String,
    pub notes: Option<String>,
    pub changed_at: Timestamp,
}

impl From<StatusChange> for StatusChangeResponse {
    fn from(change: StatusChange) -> Self {
        Self {
            from_status: change.from_status,
            to_status: change.to_status,
            changed_by: change.changed_by.to_string(),
            notes: change.notes,
            changed_at: change.changed_at,
        }
    }
}

/// Referral plus its history, newest first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralDetailResponse {
    #[serde(flatten)]
    pub referral: ReferralResponse,
    pub status_history: Vec<StatusChangeResponse>,
}

/// Listing payload: items, statistics, and pagination.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralListResponse {
    #[serde(flatten)]
    pub page: PagedBody<ReferralResponse>,
    pub statistics: ReferralStatistics,
}

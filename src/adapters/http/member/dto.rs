//! HTTP DTOs for member directory endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{IntentId, PageRequest, Timestamp, DEFAULT_PAGE_LIMIT};
use crate::domain::member::{Member, MemberProfile, MemberStatus, MemberUpdate};
use crate::ports::{MemberListFilter, MemberStatistics};

use super::super::intent::dto::AddressPayload;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Admin-initiated member creation against an approved intent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    pub intent_id: IntentId,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub cpf: Option<String>,
    #[serde(default)]
    pub birth_date: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub business_description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub address: Option<AddressPayload>,
}

impl CreateMemberRequest {
    pub fn into_parts(self) -> (IntentId, MemberProfile) {
        let profile = MemberProfile {
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            cpf: self.cpf,
            birth_date: self.birth_date,
            photo_url: self.photo_url,
            company: self.company,
            position: self.position,
            industry: self.industry,
            business_description: self.business_description,
            website: self.website,
            linkedin_url: self.linkedin_url,
            address: self.address.map(Into::into).unwrap_or_default(),
        };
        (self.intent_id, profile)
    }
}

/// Partial profile update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub cpf: Option<String>,
    #[serde(default)]
    pub birth_date: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub business_description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub address: Option<AddressPayload>,
}

impl From<UpdateMemberRequest> for MemberUpdate {
    fn from(request: UpdateMemberRequest) -> Self {
        MemberUpdate {
            full_name: request.full_name,
            phone: request.phone,
            cpf: request.cpf,
            birth_date: request.birth_date,
            photo_url: request.photo_url,
            company: request.company,
            position: request.position,
            industry: request.industry,
            business_description: request.business_description,
            website: request.website,
            linkedin_url: request.linkedin_url,
            address: request.address.map(Into::into),
        }
    }
}

/// Query parameters of the directory listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListMembersParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub status: Option<MemberStatus>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

impl ListMembersParams {
    pub fn into_parts(self) -> (MemberListFilter, PageRequest) {
        (
            MemberListFilter {
                status: self.status,
                industry: self.industry,
                search: self.search,
            },
            PageRequest::new(self.page, self.limit),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Nested address in member responses.
#[derive(Debug, Clone, Serialize)]
pub struct AddressResponse {
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
}

/// Full member profile view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cpf: Option<String>,
    pub birth_date: Option<chrono::NaiveDate>,
    pub photo_url: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub industry: Option<String>,
    pub business_description: Option<String>,
    pub website: Option<String>,
    pub linkedin_url: Option<String>,
    pub address: AddressResponse,
    pub status: MemberStatus,
    pub membership_start_date: Timestamp,
    pub membership_end_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id.to_string(),
            full_name: member.full_name,
            email: member.email,
            phone: member.phone,
            cpf: member.cpf,
            birth_date: member.birth_date,
            photo_url: member.photo_url,
            company: member.company,
            position: member.position,
            industry: member.industry,
            business_description: member.business_description,
            website: member.website,
            linkedin_url: member.linkedin_url,
            address: AddressResponse {
                street: member.address.street,
                number: member.address.number,
                complement: member.address.complement,
                neighborhood: member.address.neighborhood,
                city: member.address.city,
                state: member.address.state,
                zipcode: member.address.zipcode,
            },
            status: member.status,
            membership_start_date: member.membership_start_date,
            membership_end_date: member.membership_end_date,
            created_at: member.created_at,
            updated_at: member.updated_at,
        }
    }
}

/// Profile plus derived statistics for the detail endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDetailResponse {
    #[serde(flatten)]
    pub member: MemberResponse,
    pub statistics: MemberStatistics,
}

//! HTTP DTOs for membership intent endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PageRequest, SortOrder, Timestamp, DEFAULT_PAGE_LIMIT};
use crate::domain::intent::{IntentStatus, IntentSubmission, MembershipIntent};
use crate::domain::member::{Address, MemberProfile};
use crate::ports::{IntentListFilter, IntentSortField};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Public submission form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentRequest {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    pub motivation: String,
}

impl From<CreateIntentRequest> for IntentSubmission {
    fn from(request: CreateIntentRequest) -> Self {
        IntentSubmission {
            full_name: request.full_name,
            email: request.email,
            phone: request.phone,
            company: request.company,
            industry: request.industry,
            motivation: request.motivation,
        }
    }
}

/// Optional notes attached to an approval.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApproveIntentRequest {
    #[serde(default)]
    pub notes: Option<String>,
}

/// Optional reason attached to a rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RejectIntentRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

/// Query parameters of the admin listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListIntentsParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub status: Option<IntentStatus>,
    #[serde(default)]
    pub sort: Option<IntentSortField>,
    #[serde(default)]
    pub order: Option<SortOrder>,
    #[serde(default)]
    pub search: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

impl ListIntentsParams {
    pub fn into_parts(self) -> (IntentListFilter, PageRequest) {
        (
            IntentListFilter {
                status: self.status,
                search: self.search,
                sort: self.sort.unwrap_or_default(),
                order: self.order.unwrap_or_default(),
            },
            PageRequest::new(self.page, self.limit),
        )
    }
}

/// Nested address in registration payloads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressPayload {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub complement: Option<String>,
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zipcode: Option<String>,
}

impl From<AddressPayload> for Address {
    fn from(payload: AddressPayload) -> Self {
        Address {
            street: payload.street,
            number: payload.number,
            complement: payload.complement,
            neighborhood: payload.neighborhood,
            city: payload.city,
            state: payload.state,
            zipcode: payload.zipcode,
        }
    }
}

/// Registration form redeemed against an invite token.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteRegistrationRequest {
    pub invite_token: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
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

impl CompleteRegistrationRequest {
    pub fn into_profile(self) -> (String, String, MemberProfile) {
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
            address: self.address.map(Address::from).unwrap_or_default(),
        };
        (self.invite_token, self.password, profile)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Full intent view for admin endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub industry: Option<String>,
    pub motivation: String,
    pub status: IntentStatus,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<Timestamp>,
    pub review_notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub invite_token: Option<String>,
    pub token_expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<MembershipIntent> for IntentResponse {
    fn from(intent: MembershipIntent) -> Self {
        Self {
            id: intent.id.to_string(),
            full_name: intent.full_name,
            email: intent.email,
            phone: intent.phone,
            company: intent.company,
            industry: intent.industry,
            motivation: intent.motivation,
            status: intent.status,
            reviewed_by: intent.reviewed_by.map(|id| id.to_string()),
            reviewed_at: intent.reviewed_at,
            review_notes: intent.review_notes,
            rejection_reason: intent.rejection_reason,
            invite_token: intent.invite_token,
            token_expires_at: intent.token_expires_at,
            created_at: intent.created_at,
            updated_at: intent.updated_at,
        }
    }
}

/// Candidate-facing summary returned by token validation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentSummaryResponse {
    pub full_name: String,
    pub email: String,
    pub company: Option<String>,
}

/// Token validation result.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateTokenResponse {
    pub valid: bool,
    pub intent: IntentSummaryResponse,
}

impl From<MembershipIntent> for ValidateTokenResponse {
    fn from(intent: MembershipIntent) -> Self {
        Self {
            valid: true,
            intent: IntentSummaryResponse {
                full_name: intent.full_name,
                email: intent.email,
                company: intent.company,
            },
        }
    }
}

/// Identifiers created by a completed registration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub user_id: String,
    pub member_id: String,
}

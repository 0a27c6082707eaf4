//! Member reader port (read side) and its view types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, MemberId, Page, PageRequest, Timestamp};
use crate::domain::member::MemberStatus;

/// Filters for the member directory listing.
#[derive(Debug, Clone, Default)]
pub struct MemberListFilter {
    pub status: Option<MemberStatus>,
    /// Case-insensitive substring match on the industry.
    pub industry: Option<String>,
    /// Case-insensitive substring match over full name, email, and company.
    pub search: Option<String>,
}

/// Directory listing row: profile summary plus referral counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    pub id: MemberId,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub industry: Option<String>,
    pub photo_url: Option<String>,
    pub status: MemberStatus,
    pub membership_start_date: Timestamp,
    pub stats: MemberListStats,
}

/// Per-member counters shown in the directory listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberListStats {
    pub referrals_given: u64,
    pub referrals_received: u64,
    /// Referrals closed with this member as recipient.
    pub business_closed: u64,
    /// Sum of closed values in cents (as recipient).
    pub total_value: i64,
}

/// Full engagement statistics for a single member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberStatistics {
    pub referrals_given: u64,
    pub referrals_received: u64,
    /// Referrals closed with this member as recipient.
    pub business_closed: u64,
    /// Sum of closed values in cents (as recipient).
    pub total_business_value: i64,
    /// Meetings attended (Present or Late).
    pub meetings_attended: u64,
    /// `meetings_attended / meetings_scheduled`, 0 when none scheduled.
    pub attendance_rate: f64,
    /// Completed one-on-one meetings.
    pub one_on_one_meetings: u64,
}

impl MemberStatistics {
    /// Computes the attendance rate, avoiding division by zero.
    pub fn attendance_rate(attended: u64, scheduled: u64) -> f64 {
        if scheduled == 0 {
            0.0
        } else {
            attended as f64 / scheduled as f64
        }
    }
}

/// Read-optimized port for directory listings and derived statistics.
#[async_trait]
pub trait MemberReader: Send + Sync {
    /// List members with per-member referral counters, newest first.
    async fn list(
        &self,
        filter: &MemberListFilter,
        page: PageRequest,
    ) -> Result<Page<MemberSummary>, DomainError>;

    /// Full engagement statistics for one member.
    ///
    /// Recomputed per request; no caching.
    async fn statistics(&self, member_id: &MemberId) -> Result<MemberStatistics, DomainError>;
}

//! Group-wide dashboard statistics.
//!
//! Pure assembly logic: the `DashboardReader` port supplies raw counts and
//! this module shapes them into the response structure, including the demo
//! fallback dataset used when the directory is still empty.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Raw counts collected by the dashboard reader in one pass.
///
/// Month-scoped numbers cover the half-open window
/// `[start_of_month, start_of_next_month)` of the current calendar month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardCounts {
    pub total_members: u64,
    pub active_members: u64,
    pub new_members_this_month: u64,

    pub total_referrals: u64,
    pub pending_referrals: u64,
    pub closed_referrals: u64,
    pub referrals_this_month: u64,
    /// All-time sum of closed values in cents.
    pub total_referral_value: i64,
    /// Sum of closed values in cents for referrals closed this month.
    pub referral_value_this_month: i64,

    pub total_thank_yous: u64,
    pub thank_yous_this_month: u64,
}

/// Member totals section of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberTotals {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
    pub new_this_month: u64,
}

/// This-month slice of the referral totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReferrals {
    pub count: u64,
    /// Closed value in cents.
    pub value: i64,
}

/// Referral totals section of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralTotals {
    pub total: u64,
    pub pending: u64,
    pub closed: u64,
    /// All-time closed value in cents.
    pub total_value: i64,
    pub this_month: MonthlyReferrals,
}

/// Thank-you acknowledgment totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThankYouTotals {
    pub total: u64,
    pub this_month: u64,
    /// Rough estimate derived from the monthly count; the source data has no
    /// per-week resolution.
    pub this_week: u64,
}

/// Placeholder next-meeting projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextMeeting {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub title: String,
}

/// Meeting outlook section. Attendance figures are fixed placeholders until
/// meeting scheduling lands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingOutlook {
    pub this_month: u32,
    pub average_attendance: f64,
    pub next_meeting: NextMeeting,
}

/// Complete dashboard statistics payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub members: MemberTotals,
    pub referrals: ReferralTotals,
    pub thank_yous: ThankYouTotals,
    pub meetings: MeetingOutlook,
}

impl DashboardStats {
    /// Assembles the dashboard from raw counts.
    pub fn from_counts(counts: DashboardCounts, now: Timestamp) -> Self {
        Self {
            members: MemberTotals {
                total: counts.total_members,
                active: counts.active_members,
                inactive: counts.total_members.saturating_sub(counts.active_members),
                new_this_month: counts.new_members_this_month,
            },
            referrals: ReferralTotals {
                total: counts.total_referrals,
                pending: counts.pending_referrals,
                closed: counts.closed_referrals,
                total_value: counts.total_referral_value,
                this_month: MonthlyReferrals {
                    count: counts.referrals_this_month,
                    value: counts.referral_value_this_month,
                },
            },
            thank_yous: ThankYouTotals {
                total: counts.total_thank_yous,
                this_month: counts.thank_yous_this_month,
                this_week: (counts.thank_yous_this_month as f64 * 0.3) as u64,
            },
            meetings: Self::meeting_outlook(now),
        }
    }

    /// Fixed illustrative dataset returned while the directory is empty.
    ///
    /// Demo presentation fallback, not a correctness mechanism.
    pub fn sample(now: Timestamp) -> Self {
        Self {
            members: MemberTotals {
                total: 35,
                active: 33,
                inactive: 2,
                new_this_month: 2,
            },
            referrals: ReferralTotals {
                total: 145,
                pending: 23,
                closed: 45,
                total_value: 1_250_000_00,
                this_month: MonthlyReferrals {
                    count: 12,
                    value: 150_000_00,
                },
            },
            thank_yous: ThankYouTotals {
                total: 87,
                this_month: 12,
                this_week: 4,
            },
            meetings: Self::meeting_outlook(now),
        }
    }

    fn meeting_outlook(now: Timestamp) -> MeetingOutlook {
        MeetingOutlook {
            this_month: 4,
            average_attendance: 0.88,
            next_meeting: NextMeeting {
                date: now.add_days(7).date_string(),
                title: "Next weekly meeting".to_string(),
            },
        }
    }
}

/// The half-open calendar-month window `[start, end)` containing `now`.
pub fn month_window(now: Timestamp) -> (Timestamp, Timestamp) {
    (now.start_of_month(), now.start_of_next_month())
}

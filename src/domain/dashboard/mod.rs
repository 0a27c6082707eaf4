//! Dashboard domain module.
//!
//! Read-only rollups over members, referrals, and thank-you acknowledgments.

mod stats;

pub use stats::{
    month_window, DashboardCounts, DashboardStats, MeetingOutlook, MemberTotals, MonthlyReferrals,
    NextMeeting, ReferralTotals, ThankYouTotals,
};

//! Per-member referral statistics.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::MemberId;

use super::{BusinessReferral, ReferralStatus};

/// Counts and sums scoped to one member, recomputed per request.
///
/// Invariants (property-tested below):
/// - `total_received` >= `pending_received` + `closed_received`
/// - `total_value_closed` equals the sum of `closed_value` over exactly the
///   Closed referrals where the member is the recipient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralStatistics {
    pub total_given: u64,
    pub total_received: u64,
    pub pending_received: u64,
    pub closed_received: u64,
    /// Sum of closed values in cents.
    pub total_value_closed: i64,
}

impl ReferralStatistics {
    /// Computes statistics for a member from a set of referrals.
    ///
    /// The postgres reader computes the same numbers in SQL; this in-process
    /// version backs the in-memory adapter and the property tests.
    pub fn from_referrals(member_id: MemberId, referrals: &[BusinessReferral]) -> Self {
        let mut stats = ReferralStatistics::default();

        for referral in referrals {
            if referral.referrer_id == member_id {
                stats.total_given += 1;
            }
            if referral.referred_to_id == member_id {
                stats.total_received += 1;
                match referral.status {
                    ReferralStatus::Pending => stats.pending_received += 1,
                    ReferralStatus::Closed => {
                        stats.closed_received += 1;
                        stats.total_value_closed += referral.closed_value.unwrap_or(0);
                    }
                    _ => {}
                }
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ReferralId, UserId};
    use crate::domain::referral::ReferralDetails;
    use proptest::prelude::*;

    fn referral(
        referrer: MemberId,
        recipient: MemberId,
        status: ReferralStatus,
        closed_value: Option<i64>,
    ) -> BusinessReferral {
        let (mut r, _) = BusinessReferral::create(
            ReferralId::new(),
            referrer,
            recipient,
            UserId::new(),
            ReferralDetails {
                client_name: "Client".to_string(),
                description: "Lead".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        if status != ReferralStatus::Pending {
            r.update_status(status, None, closed_value, UserId::new())
                .unwrap();
        }
        r
    }

    #[test]
    fn counts_given_and_received_separately() {
        let alice = MemberId::new();
        let bob = MemberId::new();
        let referrals = vec![
            referral(alice, bob, ReferralStatus::Pending, None),
            referral(alice, bob, ReferralStatus::Closed, Some(100_00)),
            referral(bob, alice, ReferralStatus::Lost, None),
        ];

        let stats = ReferralStatistics::from_referrals(alice, &referrals);
        assert_eq!(stats.total_given, 2);
        assert_eq!(stats.total_received, 1);
        assert_eq!(stats.pending_received, 0);
        assert_eq!(stats.closed_received, 0);
        assert_eq!(stats.total_value_closed, 0);

        let stats = ReferralStatistics::from_referrals(bob, &referrals);
        assert_eq!(stats.total_given, 1);
        assert_eq!(stats.total_received, 2);
        assert_eq!(stats.pending_received, 1);
        assert_eq!(stats.closed_received, 1);
        assert_eq!(stats.total_value_closed, 100_00);
    }

    #[test]
    fn empty_set_yields_zero_statistics() {
        let stats = ReferralStatistics::from_referrals(MemberId::new(), &[]);
        assert_eq!(stats, ReferralStatistics::default());
    }

    // Invariants: received counts decompose by status, and the closed sum
    // covers exactly the member's closed received referrals.
    proptest! {
        #[test]
        fn received_decomposes_into_status_buckets(
            statuses in proptest::collection::vec(0usize..6, 0..40),
            values in proptest::collection::vec(0i64..1_000_000, 40),
        ) {
            let me = MemberId::new();
            let other = MemberId::new();

            let referrals: Vec<BusinessReferral> = statuses
                .iter()
                .zip(values.iter())
                .map(|(&s, &v)| {
                    let status = ReferralStatus::ALL[s];
                    let closed_value =
                        (status == ReferralStatus::Closed).then_some(v);
                    referral(other, me, status, closed_value)
                })
                .collect();

            let stats = ReferralStatistics::from_referrals(me, &referrals);

            let other_statuses = referrals
                .iter()
                .filter(|r| {
                    !matches!(r.status, ReferralStatus::Pending | ReferralStatus::Closed)
                })
                .count() as u64;

            prop_assert_eq!(stats.total_given, 0);
            prop_assert_eq!(
                stats.total_received,
                stats.pending_received + stats.closed_received + other_statuses
            );

            let expected_value: i64 = referrals
                .iter()
                .filter(|r| r.status == ReferralStatus::Closed)
                .filter_map(|r| r.closed_value)
                .sum();
            prop_assert_eq!(stats.total_value_closed, expected_value);
        }

        #[test]
        fn closed_sum_ignores_referrals_given(
            values in proptest::collection::vec(0i64..1_000_000, 0..20),
        ) {
            let me = MemberId::new();
            let other = MemberId::new();

            // Closed referrals where I am the *referrer* must not count.
            let referrals: Vec<BusinessReferral> = values
                .iter()
                .map(|&v| referral(me, other, ReferralStatus::Closed, Some(v)))
                .collect();

            let stats = ReferralStatistics::from_referrals(me, &referrals);
            prop_assert_eq!(stats.total_value_closed, 0);
            prop_assert_eq!(stats.total_given, values.len() as u64);
        }
    }
}

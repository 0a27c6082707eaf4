//! Referral query handlers, scoped to the authenticated member.

use std::sync::Arc;

use crate::domain::foundation::{MemberId, Page, PageRequest, ReferralId};
use crate::domain::referral::{
    BusinessReferral, ReferralError, ReferralStatistics, StatusChange,
};
use crate::ports::{ReferralListFilter, ReferralRepository};

/// Query for a member's referral listing.
#[derive(Debug, Clone)]
pub struct ListReferralsQuery {
    pub member_id: MemberId,
    pub filter: ReferralListFilter,
    pub page: PageRequest,
}

/// One page of referrals plus the member's statistics.
#[derive(Debug, Clone)]
pub struct ReferralListing {
    pub page: Page<BusinessReferral>,
    pub statistics: ReferralStatistics,
}

/// Query for one referral with its history.
#[derive(Debug, Clone)]
pub struct GetReferralQuery {
    pub member_id: MemberId,
    pub referral_id: ReferralId,
}

/// A referral plus its status history, newest first.
#[derive(Debug, Clone)]
pub struct ReferralDetail {
    pub referral: BusinessReferral,
    pub history: Vec<StatusChange>,
}

/// Handler for referral queries.
pub struct ReferralQueryHandler {
    referrals: Arc<dyn ReferralRepository>,
}

impl ReferralQueryHandler {
    pub fn new(referrals: Arc<dyn ReferralRepository>) -> Self {
        Self { referrals }
    }

    pub async fn list(&self, query: ListReferralsQuery) -> Result<ReferralListing, ReferralError> {
        let page = self
            .referrals
            .list(&query.member_id, &query.filter, query.page)
            .await
            .map_err(|e| ReferralError::infrastructure(e.to_string()))?;

        let statistics = self
            .referrals
            .statistics(&query.member_id)
            .await
            .map_err(|e| ReferralError::infrastructure(e.to_string()))?;

        Ok(ReferralListing { page, statistics })
    }

    pub async fn get(&self, query: GetReferralQuery) -> Result<ReferralDetail, ReferralError> {
        let referral = self
            .referrals
            .find_by_id(&query.referral_id)
            .await
            .map_err(|e| ReferralError::infrastructure(e.to_string()))?
            .ok_or(ReferralError::NotFound(query.referral_id))?;

        if !referral.involves(query.member_id) {
            return Err(ReferralError::not_participant(
                query.referral_id,
                query.member_id,
            ));
        }

        let history = self
            .referrals
            .history(&referral.id)
            .await
            .map_err(|e| ReferralError::infrastructure(e.to_string()))?;

        Ok(ReferralDetail { referral, history })
    }
}

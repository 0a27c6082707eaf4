//! Member directory query handlers.

use std::sync::Arc;

use crate::domain::foundation::{MemberId, Page, PageRequest};
use crate::domain::member::{Member, MemberError};
use crate::ports::{MemberListFilter, MemberReader, MemberRepository, MemberStatistics, MemberSummary};

/// Query for the paginated directory listing.
#[derive(Debug, Clone)]
pub struct ListMembersQuery {
    pub filter: MemberListFilter,
    pub page: PageRequest,
}

/// Query for one member's profile plus derived statistics.
#[derive(Debug, Clone)]
pub struct GetMemberQuery {
    pub member_id: MemberId,
}

/// Profile plus derived engagement statistics.
#[derive(Debug, Clone)]
pub struct MemberDetail {
    pub member: Member,
    pub statistics: MemberStatistics,
}

/// Handler for directory queries.
pub struct MemberQueryHandler {
    members: Arc<dyn MemberRepository>,
    reader: Arc<dyn MemberReader>,
}

impl MemberQueryHandler {
    pub fn new(members: Arc<dyn MemberRepository>, reader: Arc<dyn MemberReader>) -> Self {
        Self { members, reader }
    }

    pub async fn list(&self, query: ListMembersQuery) -> Result<Page<MemberSummary>, MemberError> {
        self.reader
            .list(&query.filter, query.page)
            .await
            .map_err(|e| MemberError::infrastructure(e.to_string()))
    }

    pub async fn get(&self, query: GetMemberQuery) -> Result<MemberDetail, MemberError> {
        let member = self
            .members
            .find_by_id(&query.member_id)
            .await
            .map_err(|e| MemberError::infrastructure(e.to_string()))?
            .ok_or(MemberError::NotFound(query.member_id))?;

        let statistics = self
            .reader
            .statistics(&member.id)
            .await
            .map_err(|e| MemberError::infrastructure(e.to_string()))?;

        Ok(MemberDetail { member, statistics })
    }
}

//! Admin query handlers for the intent listing and detail views.

use std::sync::Arc;

use crate::domain::foundation::{IntentId, Page, PageRequest};
use crate::domain::intent::{IntentError, MembershipIntent};
use crate::ports::{IntentListFilter, IntentRepository};

/// Query for one intent by id.
#[derive(Debug, Clone)]
pub struct GetIntentQuery {
    pub intent_id: IntentId,
}

/// Query for the paginated admin listing.
#[derive(Debug, Clone)]
pub struct ListIntentsQuery {
    pub filter: IntentListFilter,
    pub page: PageRequest,
}

/// Handler for admin intent queries.
pub struct IntentQueryHandler {
    intents: Arc<dyn IntentRepository>,
}

impl IntentQueryHandler {
    pub fn new(intents: Arc<dyn IntentRepository>) -> Self {
        Self { intents }
    }

    pub async fn get(&self, query: GetIntentQuery) -> Result<MembershipIntent, IntentError> {
        self.intents
            .find_by_id(&query.intent_id)
            .await
            .map_err(|e| IntentError::infrastructure(e.to_string()))?
            .ok_or(IntentError::NotFound(query.intent_id))
    }

    pub async fn list(
        &self,
        query: ListIntentsQuery,
    ) -> Result<Page<MembershipIntent>, IntentError> {
        self.intents
            .list(&query.filter, query.page)
            .await
            .map_err(|e| IntentError::infrastructure(e.to_string()))
    }
}

//! In-memory member/credential store for testing.
//!
//! One struct implements `MemberRepository`, `MemberReader`, `UserRepository`
//! and `RegistrationUnit` over the same shared state, mirroring how the
//! postgres adapters share one database. The registration unit supports
//! failure injection so tests can assert the all-or-nothing guarantee.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::credential::User;
use crate::domain::foundation::{
    DomainError, ErrorCode, IntentId, MemberId, Page, PageRequest, UserId,
};
use crate::domain::member::Member;
use crate::ports::{
    MemberListFilter, MemberListStats, MemberReader, MemberRepository, MemberStatistics,
    MemberSummary, NewRegistration, ReferralRepository, RegistrationUnit, UserRepository,
};

use super::InMemoryReferralRepository;

#[derive(Default)]
struct State {
    users: Vec<User>,
    members: Vec<Member>,
    /// member -> (attended, scheduled) meeting counts.
    attendance: HashMap<MemberId, (u64, u64)>,
    /// member -> completed one-on-one count.
    one_on_ones: HashMap<MemberId, u64>,
}

/// In-memory credential + member store for tests. Lock poisoning panics.
#[derive(Default)]
pub struct InMemoryMemberStore {
    state: RwLock<State>,
    fail_registration: AtomicBool,
    /// Optional referral store backing the listing/statistics counters.
    referrals: Option<Arc<InMemoryReferralRepository>>,
}

impl InMemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Couples this store to a referral store so read views can compute
    /// referral counters.
    pub fn with_referrals(referrals: Arc<InMemoryReferralRepository>) -> Self {
        Self {
            referrals: Some(referrals),
            ..Default::default()
        }
    }

    /// Makes the next (and every subsequent) registration fail before
    /// persisting anything.
    pub fn set_fail_registration(&self, fail: bool) {
        self.fail_registration.store(fail, Ordering::SeqCst);
    }

    /// Seeds a member directly (bypassing registration).
    pub fn insert_member(&self, member: Member) {
        self.state.write().unwrap().members.push(member);
    }

    /// Seeds a credential directly (bypassing registration).
    pub fn insert_user(&self, user: User) {
        self.state.write().unwrap().users.push(user);
    }

    /// Seeds meeting attendance counts for a member.
    pub fn set_attendance(&self, member_id: MemberId, attended: u64, scheduled: u64) {
        self.state
            .write()
            .unwrap()
            .attendance
            .insert(member_id, (attended, scheduled));
    }

    /// Seeds the completed one-on-one count for a member.
    pub fn set_one_on_ones(&self, member_id: MemberId, count: u64) {
        self.state.write().unwrap().one_on_ones.insert(member_id, count);
    }

    /// Snapshot of stored credentials (for assertions).
    pub fn users(&self) -> Vec<User> {
        self.state.read().unwrap().users.clone()
    }

    /// Snapshot of stored members (for assertions).
    pub fn members(&self) -> Vec<Member> {
        self.state.read().unwrap().members.clone()
    }

    async fn referral_counters(&self, member_id: MemberId) -> MemberListStats {
        match &self.referrals {
            Some(repo) => {
                let stats = repo
                    .statistics(&member_id)
                    .await
                    .unwrap_or_default();
                MemberListStats {
                    referrals_given: stats.total_given,
                    referrals_received: stats.total_received,
                    business_closed: stats.closed_received,
                    total_value: stats.total_value_closed,
                }
            }
            None => MemberListStats::default(),
        }
    }
}

fn matches_search(member: &Member, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    member.full_name.to_lowercase().contains(&needle)
        || member.email.to_lowercase().contains(&needle)
        || member
            .company
            .as_deref()
            .map(|c| c.to_lowercase().contains(&needle))
            .unwrap_or(false)
}

#[async_trait]
impl MemberRepository for InMemoryMemberStore {
    async fn update(&self, member: &Member) -> Result<(), DomainError> {
        let mut state = self.state.write().unwrap();
        match state.members.iter_mut().find(|m| m.id == member.id) {
            Some(slot) => {
                *slot = member.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::MemberNotFound,
                "Member not found",
            )),
        }
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError> {
        Ok(self
            .state
            .read()
            .unwrap()
            .members
            .iter()
            .find(|m| &m.id == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, DomainError> {
        Ok(self
            .state
            .read()
            .unwrap()
            .members
            .iter()
            .find(|m| m.email == email)
            .cloned())
    }

    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Member>, DomainError> {
        Ok(self
            .state
            .read()
            .unwrap()
            .members
            .iter()
            .find(|m| m.cpf.as_deref() == Some(cpf))
            .cloned())
    }

    async fn find_by_intent(&self, intent_id: &IntentId) -> Result<Option<Member>, DomainError> {
        Ok(self
            .state
            .read()
            .unwrap()
            .members
            .iter()
            .find(|m| m.intent_id.as_ref() == Some(intent_id))
            .cloned())
    }
}

#[async_trait]
impl UserRepository for InMemoryMemberStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .state
            .read()
            .unwrap()
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self
            .state
            .read()
            .unwrap()
            .users
            .iter()
            .find(|u| &u.id == id)
            .cloned())
    }
}

#[async_trait]
impl RegistrationUnit for InMemoryMemberStore {
    async fn register(&self, registration: NewRegistration) -> Result<(), DomainError> {
        if self.fail_registration.load(Ordering::SeqCst) {
            return Err(DomainError::database("Simulated registration failure"));
        }

        let mut state = self.state.write().unwrap();

        if state.users.iter().any(|u| u.email == registration.user.email) {
            return Err(DomainError::new(
                ErrorCode::EmailInUse,
                "Email already has a credential",
            ));
        }
        if state
            .members
            .iter()
            .any(|m| m.email == registration.member.email)
        {
            return Err(DomainError::new(
                ErrorCode::EmailInUse,
                "Email already registered as member",
            ));
        }
        if let Some(cpf) = registration.member.cpf.as_deref() {
            if state.members.iter().any(|m| m.cpf.as_deref() == Some(cpf)) {
                return Err(DomainError::new(
                    ErrorCode::CpfInUse,
                    "CPF already registered",
                ));
            }
        }
        if let Some(intent_id) = registration.member.intent_id {
            if state
                .members
                .iter()
                .any(|m| m.intent_id == Some(intent_id))
            {
                return Err(DomainError::new(
                    ErrorCode::TokenAlreadyUsed,
                    "Invite already redeemed",
                ));
            }
        }

        // Single write-lock scope: both rows land or neither does.
        state.users.push(registration.user);
        state.members.push(registration.member);
        Ok(())
    }
}

#[async_trait]
impl MemberReader for InMemoryMemberStore {
    async fn list(
        &self,
        filter: &MemberListFilter,
        page: PageRequest,
    ) -> Result<Page<MemberSummary>, DomainError> {
        let mut matching: Vec<Member> = {
            let state = self.state.read().unwrap();
            state
                .members
                .iter()
                .filter(|m| filter.status.map(|s| m.status == s).unwrap_or(true))
                .filter(|m| {
                    filter
                        .industry
                        .as_deref()
                        .map(|needle| {
                            m.industry
                                .as_deref()
                                .map(|i| i.to_lowercase().contains(&needle.to_lowercase()))
                                .unwrap_or(false)
                        })
                        .unwrap_or(true)
                })
                .filter(|m| {
                    filter
                        .search
                        .as_deref()
                        .map(|needle| matches_search(m, needle))
                        .unwrap_or(true)
                })
                .cloned()
                .collect()
        };

        matching.sort_by_key(|m| m.created_at);
        matching.reverse();

        let total = matching.len() as u64;
        let selected: Vec<Member> = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        let mut items = Vec::with_capacity(selected.len());
        for member in selected {
            let stats = self.referral_counters(member.id).await;
            items.push(MemberSummary {
                id: member.id,
                full_name: member.full_name,
                email: member.email,
                phone: member.phone,
                company: member.company,
                position: member.position,
                industry: member.industry,
                photo_url: member.photo_url,
                status: member.status,
                membership_start_date: member.membership_start_date,
                stats,
            });
        }

        Ok(Page::new(items, page, total))
    }

    async fn statistics(&self, member_id: &MemberId) -> Result<MemberStatistics, DomainError> {
        let counters = self.referral_counters(*member_id).await;
        let (attended, scheduled, one_on_ones) = {
            let state = self.state.read().unwrap();
            let (attended, scheduled) =
                state.attendance.get(member_id).copied().unwrap_or((0, 0));
            let one_on_ones = state.one_on_ones.get(member_id).copied().unwrap_or(0);
            (attended, scheduled, one_on_ones)
        };

        Ok(MemberStatistics {
            referrals_given: counters.referrals_given,
            referrals_received: counters.referrals_received,
            business_closed: counters.business_closed,
            total_business_value: counters.total_value,
            meetings_attended: attended,
            attendance_rate: MemberStatistics::attendance_rate(attended, scheduled),
            one_on_one_meetings: one_on_ones,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::member::{MemberProfile, MemberStatus};

    fn profile(name: &str, email: &str) -> MemberProfile {
        MemberProfile {
            full_name: name.to_string(),
            email: email.to_string(),
            industry: Some("Technology".to_string()),
            ..Default::default()
        }
    }

    fn member(name: &str, email: &str) -> Member {
        Member::register(MemberId::new(), UserId::new(), IntentId::new(), profile(name, email))
    }

    fn registration(email: &str) -> NewRegistration {
        let member = member("Novo Membro", email);
        let user = User::new_member(member.user_id, email, "$argon2id$stub".to_string());
        NewRegistration { user, member }
    }

    #[tokio::test]
    async fn register_persists_credential_and_member_together() {
        let store = InMemoryMemberStore::new();
        store.register(registration("novo@x.com")).await.unwrap();

        assert_eq!(store.users().len(), 1);
        assert_eq!(store.members().len(), 1);
        assert_eq!(store.users()[0].email, "novo@x.com");
    }

    #[tokio::test]
    async fn failed_registration_persists_nothing() {
        let store = InMemoryMemberStore::new();
        store.set_fail_registration(true);

        let result = store.register(registration("novo@x.com")).await;
        assert!(result.is_err());
        assert!(store.users().is_empty());
        assert!(store.members().is_empty());
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let store = InMemoryMemberStore::new();
        store.register(registration("dup@x.com")).await.unwrap();

        let err = store.register(registration("dup@x.com")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EmailInUse);
        assert_eq!(store.users().len(), 1);
    }

    #[tokio::test]
    async fn register_rejects_consumed_intent() {
        let store = InMemoryMemberStore::new();
        let first = registration("a@x.com");
        let intent_id = first.member.intent_id.unwrap();
        store.register(first).await.unwrap();

        let mut second = registration("b@x.com");
        second.member.intent_id = Some(intent_id);
        let err = store.register(second).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenAlreadyUsed);
    }

    #[tokio::test]
    async fn find_by_cpf_matches_exactly() {
        let store = InMemoryMemberStore::new();
        let mut m = member("Com CPF", "cpf@x.com");
        m.cpf = Some("123.456.789-00".to_string());
        store.insert_member(m);

        assert!(MemberRepository::find_by_id(&store, &MemberId::new())
            .await
            .unwrap()
            .is_none());
        assert!(store.find_by_cpf("123.456.789-00").await.unwrap().is_some());
        assert!(store.find_by_cpf("999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_filters_by_status_and_industry() {
        let store = InMemoryMemberStore::new();
        store.insert_member(member("Ativa", "ativa@x.com"));
        let mut inactive = member("Inativa", "inativa@x.com");
        inactive.deactivate();
        store.insert_member(inactive);

        let filter = MemberListFilter {
            status: Some(MemberStatus::Active),
            ..Default::default()
        };
        let page = store.list(&filter, PageRequest::default()).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].full_name, "Ativa");

        let filter = MemberListFilter {
            industry: Some("tech".to_string()),
            ..Default::default()
        };
        let page = store.list(&filter, PageRequest::default()).await.unwrap();
        assert_eq!(page.items.len(), 2);
    }

    #[tokio::test]
    async fn statistics_combine_referrals_and_engagement() {
        let referrals = Arc::new(InMemoryReferralRepository::new());
        let store = InMemoryMemberStore::with_referrals(referrals.clone());

        let alice = member("Alice", "alice@x.com");
        let bob = member("Bob", "bob@x.com");
        store.insert_member(alice.clone());
        store.insert_member(bob.clone());
        store.set_attendance(bob.id, 3, 4);
        store.set_one_on_ones(bob.id, 2);

        let (mut referral, change) = crate::domain::referral::BusinessReferral::create(
            crate::domain::foundation::ReferralId::new(),
            alice.id,
            bob.id,
            alice.user_id,
            crate::domain::referral::ReferralDetails {
                client_name: "Cliente".to_string(),
                description: "lead".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        referrals.save(&referral, &change).await.unwrap();
        let change = referral
            .update_status(
                crate::domain::referral::ReferralStatus::Closed,
                None,
                Some(900_00),
                bob.user_id,
            )
            .unwrap();
        referrals.update(&referral, &change).await.unwrap();

        let stats = store.statistics(&bob.id).await.unwrap();
        assert_eq!(stats.referrals_received, 1);
        assert_eq!(stats.business_closed, 1);
        assert_eq!(stats.total_business_value, 900_00);
        assert_eq!(stats.meetings_attended, 3);
        assert!((stats.attendance_rate - 0.75).abs() < f64::EPSILON);
        assert_eq!(stats.one_on_one_meetings, 2);
    }

    #[tokio::test]
    async fn statistics_report_zero_attendance_without_meetings() {
        let store = InMemoryMemberStore::new();
        let m = member("Sem Reunião", "x@x.com");
        store.insert_member(m.clone());

        let stats = store.statistics(&m.id).await.unwrap();
        assert_eq!(stats.attendance_rate, 0.0);
    }
}

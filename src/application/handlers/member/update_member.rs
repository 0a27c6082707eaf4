//! UpdateMemberHandler - Partial profile updates.

use std::sync::Arc;

use crate::domain::foundation::MemberId;
use crate::domain::member::{Member, MemberError, MemberUpdate};
use crate::ports::MemberRepository;

/// Command to apply a partial profile update.
#[derive(Debug, Clone)]
pub struct UpdateMemberCommand {
    pub member_id: MemberId,
    pub patch: MemberUpdate,
}

/// Result of a profile update.
#[derive(Debug, Clone)]
pub struct UpdateMemberResult {
    pub member: Member,
}

/// Handler for profile updates.
pub struct UpdateMemberHandler {
    members: Arc<dyn MemberRepository>,
}

impl UpdateMemberHandler {
    pub fn new(members: Arc<dyn MemberRepository>) -> Self {
        Self { members }
    }

    pub async fn handle(&self, cmd: UpdateMemberCommand) -> Result<UpdateMemberResult, MemberError> {
        let mut member = self
            .members
            .find_by_id(&cmd.member_id)
            .await
            .map_err(|e| MemberError::infrastructure(e.to_string()))?
            .ok_or(MemberError::NotFound(cmd.member_id))?;

        // CPF uniqueness across *other* members
        if let Some(cpf) = cmd.patch.cpf.as_deref() {
            if let Some(existing) = self
                .members
                .find_by_cpf(cpf)
                .await
                .map_err(|e| MemberError::infrastructure(e.to_string()))?
            {
                if existing.id != member.id {
                    return Err(MemberError::CpfInUse(cpf.to_string()));
                }
            }
        }

        member.apply_update(cmd.patch);

        self.members
            .update(&member)
            .await
            .map_err(|e| MemberError::infrastructure(e.to_string()))?;

        Ok(UpdateMemberResult { member })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryMemberStore;
    use crate::domain::foundation::{IntentId, UserId};
    use crate::domain::member::{Address, MemberProfile};

    fn member(email: &str, cpf: Option<&str>) -> Member {
        let mut m = Member::register(
            MemberId::new(),
            UserId::new(),
            IntentId::new(),
            MemberProfile {
                full_name: "Original".to_string(),
                email: email.to_string(),
                ..Default::default()
            },
        );
        m.cpf = cpf.map(|c| c.to_string());
        m
    }

    #[tokio::test]
    async fn updates_patched_fields_and_persists() {
        let store = Arc::new(InMemoryMemberStore::new());
        let m = member("a@x.com", None);
        store.insert_member(m.clone());
        let handler = UpdateMemberHandler::new(store.clone());

        let result = handler
            .handle(UpdateMemberCommand {
                member_id: m.id,
                patch: MemberUpdate {
                    company: Some("Nova Ltda".to_string()),
                    address: Some(Address {
                        city: Some("Curitiba".to_string()),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(result.member.company.as_deref(), Some("Nova Ltda"));
        assert_eq!(store.members()[0].address.city.as_deref(), Some("Curitiba"));
    }

    #[tokio::test]
    async fn unknown_member_fails_not_found() {
        let store = Arc::new(InMemoryMemberStore::new());
        let handler = UpdateMemberHandler::new(store);

        let result = handler
            .handle(UpdateMemberCommand {
                member_id: MemberId::new(),
                patch: MemberUpdate::default(),
            })
            .await;
        assert!(matches!(result, Err(MemberError::NotFound(_))));
    }

    #[tokio::test]
    async fn cpf_collision_with_other_member_conflicts() {
        let store = Arc::new(InMemoryMemberStore::new());
        store.insert_member(member("a@x.com", Some("111.111.111-11")));
        let target = member("b@x.com", None);
        store.insert_member(target.clone());
        let handler = UpdateMemberHandler::new(store);

        let result = handler
            .handle(UpdateMemberCommand {
                member_id: target.id,
                patch: MemberUpdate {
                    cpf: Some("111.111.111-11".to_string()),
                    ..Default::default()
                },
            })
            .await;

        assert!(matches!(result, Err(MemberError::CpfInUse(_))));
    }

    #[tokio::test]
    async fn keeping_own_cpf_is_not_a_conflict() {
        let store = Arc::new(InMemoryMemberStore::new());
        let target = member("a@x.com", Some("222.222.222-22"));
        store.insert_member(target.clone());
        let handler = UpdateMemberHandler::new(store);

        let result = handler
            .handle(UpdateMemberCommand {
                member_id: target.id,
                patch: MemberUpdate {
                    cpf: Some("222.222.222-22".to_string()),
                    full_name: Some("Renamed".to_string()),
                    ..Default::default()
                },
            })
            .await;

        assert!(result.is_ok());
    }
}

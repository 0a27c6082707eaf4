//! Member directory command and query handlers.

mod create_member;
mod deactivate_member;
mod queries;
mod update_member;

pub use create_member::{CreateMemberCommand, CreateMemberHandler, CreateMemberResult};
pub use deactivate_member::{
    DeactivateMemberCommand, DeactivateMemberHandler, DeactivateMemberResult,
};
pub use queries::{GetMemberQuery, ListMembersQuery, MemberDetail, MemberQueryHandler};
pub use update_member::{UpdateMemberCommand, UpdateMemberHandler, UpdateMemberResult};

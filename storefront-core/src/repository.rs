use storefront_shared::{Member, MemberId};
use crate::CoreResult;

/// Repository trait for member data access
pub trait MemberRepository: Send + Sync {
    /// Store a member under its id, replacing any previous entry
    fn save(&self, member: Member);

    /// Look up a member, failing with `CoreError::MemberNotFound` if absent
    fn find_by_id(&self, id: MemberId) -> CoreResult<Member>;
}

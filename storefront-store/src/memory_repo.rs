use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use storefront_core::{CoreError, CoreResult, MemberRepository};
use storefront_shared::{Member, MemberId};

/// Member repository backed by an in-process map
#[derive(Debug, Default)]
pub struct MemoryMemberRepository {
    store: RwLock<HashMap<MemberId, Member>>,
}

impl MemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository pre-populated with `members`
    pub fn with_members(members: impl IntoIterator<Item = Member>) -> Self {
        let store = members.into_iter().map(|m| (m.id, m)).collect();
        Self {
            store: RwLock::new(store),
        }
    }

    pub fn len(&self) -> usize {
        self.store.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MemberRepository for MemoryMemberRepository {
    fn save(&self, member: Member) {
        tracing::debug!(member_id = %member.id, grade = %member.grade, "Saving member");
        self.store
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(member.id, member);
    }

    fn find_by_id(&self, id: MemberId) -> CoreResult<Member> {
        self.store
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or_else(|| {
                tracing::warn!(member_id = %id, "Member lookup missed");
                CoreError::MemberNotFound(id)
            })
    }
}

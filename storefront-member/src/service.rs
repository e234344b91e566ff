use std::sync::Arc;
use storefront_core::{CoreResult, MemberRepository};
use storefront_shared::{Member, MemberId};

pub trait MemberService: Send + Sync {
    /// Register a member
    fn join(&self, member: Member);

    fn find_member(&self, id: MemberId) -> CoreResult<Member>;
}

pub struct MemberServiceImpl {
    member_repository: Arc<dyn MemberRepository>,
}

impl MemberServiceImpl {
    pub fn new(member_repository: Arc<dyn MemberRepository>) -> Self {
        Self { member_repository }
    }

    pub fn member_repository(&self) -> &Arc<dyn MemberRepository> {
        &self.member_repository
    }
}

impl MemberService for MemberServiceImpl {
    fn join(&self, member: Member) {
        tracing::info!(member_id = %member.id, name = %member.name, grade = %member.grade, "Member joined");
        self.member_repository.save(member);
    }

    fn find_member(&self, id: MemberId) -> CoreResult<Member> {
        self.member_repository.find_by_id(id)
    }
}

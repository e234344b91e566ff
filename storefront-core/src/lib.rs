pub mod container;
pub mod discount;
pub mod repository;

use storefront_shared::MemberId;

pub use container::{Bean, Container, ContainerError, Scope};
pub use discount::DiscountPolicy;
pub use repository::MemberRepository;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),
}

pub type CoreResult<T> = Result<T, CoreError>;

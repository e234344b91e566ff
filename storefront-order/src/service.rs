use crate::models::Order;
use std::sync::Arc;
use storefront_core::{CoreError, DiscountPolicy, MemberRepository};
use storefront_shared::MemberId;

pub trait OrderService: Send + Sync {
    fn create_order(&self, member_id: MemberId, item_name: &str, item_price: u32) -> Result<Order, OrderError>;
}

/// Places orders against whichever repository and discount policy it is given
pub struct OrderServiceImpl {
    member_repository: Arc<dyn MemberRepository>,
    discount_policy: Arc<dyn DiscountPolicy>,
}

impl OrderServiceImpl {
    pub fn new(
        member_repository: Arc<dyn MemberRepository>,
        discount_policy: Arc<dyn DiscountPolicy>,
    ) -> Self {
        Self {
            member_repository,
            discount_policy,
        }
    }

    pub fn member_repository(&self) -> &Arc<dyn MemberRepository> {
        &self.member_repository
    }
}

impl OrderService for OrderServiceImpl {
    fn create_order(&self, member_id: MemberId, item_name: &str, item_price: u32) -> Result<Order, OrderError> {
        let member = self.member_repository.find_by_id(member_id)?;
        let discount_price = self.discount_policy.discount(&member, item_price);

        tracing::info!(
            member_id = %member_id,
            item_name,
            item_price,
            discount_price,
            "Order created"
        );

        Ok(Order::new(member_id, item_name, item_price, discount_price))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),
}

impl From<CoreError> for OrderError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MemberNotFound(id) => OrderError::MemberNotFound(id),
        }
    }
}

//! Composition root.
//!
//! The only module that names concrete repository and policy types. Services
//! receive trait objects through their constructors and never learn which
//! implementation they were given.

use std::sync::Arc;
use storefront_core::{DiscountPolicy, MemberRepository};
use storefront_discount::{FixDiscountPolicy, RateDiscountPolicy};
use storefront_member::{MemberService, MemberServiceImpl};
use storefront_order::{OrderService, OrderServiceImpl};
use storefront_store::{Config, DiscountConfig, MemoryMemberRepository, PolicyKind};

pub struct AppConfig {
    member_repository: Arc<MemoryMemberRepository>,
    discount: DiscountConfig,
}

impl AppConfig {
    /// Default wiring: empty repository, rate discount
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Self {
        let member_repository = MemoryMemberRepository::with_members(config.members.iter().cloned());
        tracing::debug!(
            members = member_repository.len(),
            policy = ?config.discount.policy,
            "Building object graph"
        );

        Self {
            member_repository: Arc::new(member_repository),
            discount: config.discount.clone(),
        }
    }

    /// Wire from layered config files and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Ok(Self::from_config(&Config::load()?))
    }

    /// Swap the active discount policy; consumers are unaffected
    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.discount.policy = policy;
        self
    }

    pub fn policy(&self) -> PolicyKind {
        self.discount.policy
    }

    /// The single repository instance shared by every service
    pub fn member_repository(&self) -> Arc<dyn MemberRepository> {
        self.member_repository.clone()
    }

    pub fn discount_policy(&self) -> Arc<dyn DiscountPolicy> {
        let DiscountConfig { fixed_amount, rate_percent, grade, .. } = self.discount;
        match self.discount.policy {
            PolicyKind::Fix => Arc::new(FixDiscountPolicy::new(fixed_amount, grade)),
            PolicyKind::Rate => Arc::new(RateDiscountPolicy::new(rate_percent, grade)),
        }
    }

    pub fn member_service(&self) -> Arc<dyn MemberService> {
        Arc::new(self.build_member_service())
    }

    pub fn order_service(&self) -> Arc<dyn OrderService> {
        Arc::new(self.build_order_service())
    }

    fn build_member_service(&self) -> MemberServiceImpl {
        MemberServiceImpl::new(self.member_repository())
    }

    fn build_order_service(&self) -> OrderServiceImpl {
        OrderServiceImpl::new(self.member_repository(), self.discount_policy())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

use storefront_core::DiscountPolicy;
use storefront_shared::{Grade, Member};

/// Flat discount for members of a given grade
#[derive(Debug, Clone)]
pub struct FixDiscountPolicy {
    amount: u32,
    grade: Grade,
}

impl FixDiscountPolicy {
    pub const DEFAULT_AMOUNT: u32 = 1000;

    pub fn new(amount: u32, grade: Grade) -> Self {
        Self { amount, grade }
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }
}

impl Default for FixDiscountPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_AMOUNT, Grade::Vip)
    }
}

impl DiscountPolicy for FixDiscountPolicy {
    fn discount(&self, member: &Member, price: u32) -> u32 {
        if !member.has_grade(self.grade) {
            return 0;
        }
        // never discount below zero
        self.amount.min(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_shared::MemberId;

    #[test]
    fn test_vip_gets_flat_amount() {
        let policy = FixDiscountPolicy::default();
        let member = Member::new(MemberId(1), "memberVIP", Grade::Vip);

        assert_eq!(policy.discount(&member, 10000), 1000);
        assert_eq!(policy.discount(&member, 20000), 1000);
    }

    #[test]
    fn test_basic_gets_nothing() {
        let policy = FixDiscountPolicy::default();
        let member = Member::new(MemberId(2), "memberBASIC", Grade::Basic);

        assert_eq!(policy.discount(&member, 10000), 0);
    }

    #[test]
    fn test_capped_at_price() {
        let policy = FixDiscountPolicy::new(1000, Grade::Vip);
        let member = Member::new(MemberId(1), "memberVIP", Grade::Vip);

        assert_eq!(policy.amount(), 1000);
        assert_eq!(policy.discount(&member, 600), 600);
        assert_eq!(policy.discount(&member, 0), 0);
    }
}

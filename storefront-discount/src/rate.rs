use storefront_core::DiscountPolicy;
use storefront_shared::{Grade, Member};

/// Percentage discount for members of a given grade
#[derive(Debug, Clone)]
pub struct RateDiscountPolicy {
    percent: u32,
    grade: Grade,
}

impl RateDiscountPolicy {
    pub const DEFAULT_PERCENT: u32 = 10;

    /// `percent` is clamped to 100.
    pub fn new(percent: u32, grade: Grade) -> Self {
        Self {
            percent: percent.min(100),
            grade,
        }
    }

    pub fn percent(&self) -> u32 {
        self.percent
    }
}

impl Default for RateDiscountPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PERCENT, Grade::Vip)
    }
}

impl DiscountPolicy for RateDiscountPolicy {
    fn discount(&self, member: &Member, price: u32) -> u32 {
        if !member.has_grade(self.grade) {
            return 0;
        }
        // rounds down; percent <= 100 keeps the result within u32
        (u64::from(price) * u64::from(self.percent) / 100) as u32
    }
}

pub mod fixed;
pub mod rate;

pub use fixed::FixDiscountPolicy;
pub use rate::RateDiscountPolicy;

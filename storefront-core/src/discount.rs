use storefront_shared::Member;

/// Computes the discount a member receives on a purchase.
///
/// Implementations must be pure and return an amount in `0..=price`.
pub trait DiscountPolicy: Send + Sync {
    fn discount(&self, member: &Member, price: u32) -> u32;
}

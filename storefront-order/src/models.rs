use serde::{Deserialize, Serialize};
use std::fmt;
use storefront_shared::MemberId;

/// Result of placing an order; prices are in the smallest currency unit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub member_id: MemberId,
    pub item_name: String,
    pub item_price: u32,
    pub discount_price: u32,
}

impl Order {
    pub fn new(member_id: MemberId, item_name: impl Into<String>, item_price: u32, discount_price: u32) -> Self {
        Self {
            member_id,
            item_name: item_name.into(),
            item_price,
            discount_price,
        }
    }

    /// Amount charged after the discount
    pub fn calculate_price(&self) -> u32 {
        self.item_price.saturating_sub(self.discount_price)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order{{member_id={}, item_name={}, item_price={}, discount_price={}}}",
            self.member_id, self.item_name, self.item_price, self.discount_price
        )
    }
}

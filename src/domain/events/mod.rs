//! Domain events
use crate::domain::value_objects::{CouponCode, Money};

#[derive(Clone, Debug)]
pub enum DomainEvent {
    Cart(CartEvent),
    Order(OrderEvent),
}

#[derive(Clone, Debug)]
pub enum CartEvent {
    ItemAdded { product_id: String, size: String, quantity: u32 },
    ItemRemoved { product_id: String, size: String },
    QuantityChanged { product_id: String, size: String, quantity: u32 },
    Cleared,
    DiscountApplied { code: CouponCode, amount: Money },
    DiscountCleared,
}

#[derive(Clone, Debug)]
pub enum OrderEvent {
    Placed { order_id: String, total: Money },
}

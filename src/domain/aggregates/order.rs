//! Order record
//!
//! Checkout records an order at the client-computed pricing and the core
//! loses sight of it: fulfillment, payment capture and status changes
//! happen in the back office. The status enum mirrors what the back
//! office can set, but this crate only ever creates `Pending` orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::aggregates::cart::{Cart, CartLine};
use crate::domain::events::{DomainEvent, OrderEvent};
use crate::domain::value_objects::Money;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub name: String,
    pub street: String,
    pub city: String,
    pub zip: String,
    pub country: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub items: Vec<CartLine>,
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
    pub shipping_address: ShippingAddress,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

impl Order {
    /// Snapshot a cart into a pending order at its current pricing.
    pub fn from_cart(cart: &Cart, customer_id: &str, shipping_address: ShippingAddress) -> Self {
        let id = Uuid::new_v4().to_string();
        let total = cart.total();
        let mut order = Self {
            id: id.clone(),
            customer_id: customer_id.to_string(),
            items: cart.lines().to_vec(),
            subtotal: cart.subtotal(),
            discount: cart.discount_amount(),
            total: total.clone(),
            shipping_address,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            events: vec![],
        };
        order
            .events
            .push(DomainEvent::Order(OrderEvent::Placed { order_id: id, total }));
        order
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }
}

//! Checkout
//!
//! Records an order at the cart's client-computed pricing and clears the
//! cart on success. A failed submission leaves the cart intact so the
//! user can retry; nothing here captures payment or touches inventory.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::domain::aggregates::{Order, ShippingAddress};
use crate::ports::OrderGateway;
use crate::store::CartStore;
use crate::StoreError;

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("order submission failed: {0}")]
    Submission(#[from] StoreError),
}

pub struct CheckoutService {
    gateway: Arc<dyn OrderGateway>,
}

impl CheckoutService {
    pub fn new(gateway: Arc<dyn OrderGateway>) -> Self {
        Self { gateway }
    }

    /// Submit the cart as a pending order for `customer_id`. On success
    /// the cart (and its discount) is cleared; on failure it is left
    /// untouched for retry.
    pub async fn place_order(
        &self,
        store: &mut CartStore,
        customer_id: &str,
        shipping_address: ShippingAddress,
    ) -> Result<Order, CheckoutError> {
        if store.cart().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let order = Order::from_cart(store.cart(), customer_id, shipping_address);
        self.gateway.submit(&order).await?;

        store.clear();
        info!(order_id = %order.id, total = %order.total, "order placed");
        Ok(order)
    }
}

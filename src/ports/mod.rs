//! Ports to the external collaborators.
//!
//! Auth, document storage, image hosting and order recording are all
//! delegated to third-party services; the core talks to them through
//! these narrow traits. In-memory and local-file implementations live in
//! [`crate::store`].

use async_trait::async_trait;

use crate::domain::aggregates::{CartLine, Coupon, Order, Product};
use crate::StoreError;

/// Guest-local persistence for the cart line items. Saves are
/// fire-and-forget relative to the UI; the cart never blocks on them.
/// Discounts are session state and are not persisted.
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn load(&self) -> Result<Vec<CartLine>, StoreError>;
    async fn save(&self, lines: Vec<CartLine>) -> Result<(), StoreError>;
}

/// Read-only catalog of products to browse and snapshot into the cart.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, StoreError>;
    async fn get(&self, product_id: &str) -> Result<Option<Product>, StoreError>;
}

/// Source of currently offerable discount codes. Implementations filter
/// to `is_active == true` at this boundary; the cart trusts what it is
/// handed.
#[async_trait]
pub trait CouponCatalog: Send + Sync {
    async fn list_active(&self) -> Result<Vec<Coupon>, StoreError>;
}

/// Remote mirror of an authenticated user's wishlist (a set of product
/// ids on the profile document).
#[async_trait]
pub trait WishlistRemote: Send + Sync {
    async fn fetch(&self, user_id: &str) -> Result<Vec<String>, StoreError>;
    async fn add(&self, user_id: &str, product_id: &str) -> Result<(), StoreError>;
    async fn remove(&self, user_id: &str, product_id: &str) -> Result<(), StoreError>;
}

/// Accepts a finished order as an opaque record. The core has no
/// visibility into the order lifecycle after submission succeeds.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn submit(&self, order: &Order) -> Result<(), StoreError>;
}

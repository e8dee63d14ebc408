//! JEFF'S Streetwear storefront domain core
//!
//! In-process engine behind the JEFF'S direct-to-consumer storefront.
//! Rendering, routing, auth and document storage live elsewhere; this crate
//! owns the parts with actual business rules.
//!
//! ## Features
//! - Cart with `(product, size)` line merging and snapshot pricing
//! - Flat-amount coupons with minimum-purchase eligibility
//! - Derived pricing: subtotal, discount, total (floored at zero)
//! - Wishlist with optimistic remote sync and rollback
//! - Checkout that records an order at the client-computed total
//! - Async ports for catalog, persistence and order submission

use thiserror::Error;

pub mod checkout;
pub mod domain;
pub mod ports;
pub mod store;

pub use checkout::{CheckoutError, CheckoutService};
pub use domain::aggregates::{
    AppliedDiscount, Cart, CartLine, Coupon, CouponError, NewCoupon, Order, OrderStatus, Product,
    ShippingAddress,
};
pub use domain::value_objects::{CouponCode, Money};
pub use store::{offerable_coupons, CartStore, WishlistStore};

/// Failures at the boundary to an external collaborator (document store,
/// media CDN, order backend). Always recoverable by retrying the user
/// action; never corrupts in-memory state.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("backend unavailable: {0}")]
    Backend(String),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

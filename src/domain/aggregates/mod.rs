//! Aggregates module
pub mod cart;
pub mod coupon;
pub mod order;
pub mod product;

pub use cart::{AppliedDiscount, Cart, CartLine};
pub use coupon::{Coupon, CouponError, NewCoupon};
pub use order::{Order, OrderStatus, ShippingAddress};
pub use product::{Product, DEFAULT_SIZE_RUN};

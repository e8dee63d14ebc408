//! In-memory port implementations, for tests and embedding.
//!
//! Each adapter can be flipped into a failing state to exercise the
//! error paths (rollbacks, swallowed persistence failures).

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::aggregates::{CartLine, Coupon, Order, Product};
use crate::ports::{CartRepository, CouponCatalog, OrderGateway, ProductCatalog, WishlistRemote};
use crate::StoreError;

fn backend_down() -> StoreError {
    StoreError::Backend("simulated outage".to_string())
}

#[derive(Default)]
pub struct InMemoryCartRepository {
    lines: Mutex<Vec<CartLine>>,
    failing: AtomicBool,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// The last saved snapshot.
    pub fn snapshot(&self) -> Vec<CartLine> {
        self.lines.lock().unwrap().clone()
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn load(&self) -> Result<Vec<CartLine>, StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(backend_down());
        }
        Ok(self.lines.lock().unwrap().clone())
    }

    async fn save(&self, lines: Vec<CartLine>) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(backend_down());
        }
        *self.lines.lock().unwrap() = lines;
        Ok(())
    }
}

pub struct InMemoryProductCatalog {
    products: Vec<Product>,
}

impl InMemoryProductCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl ProductCatalog for InMemoryProductCatalog {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.products.clone())
    }

    async fn get(&self, product_id: &str) -> Result<Option<Product>, StoreError> {
        Ok(self.products.iter().find(|p| p.id == product_id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryCouponCatalog {
    coupons: Vec<Coupon>,
    failing: AtomicBool,
}

impl InMemoryCouponCatalog {
    pub fn new(coupons: Vec<Coupon>) -> Self {
        Self { coupons, failing: AtomicBool::new(false) }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl CouponCatalog for InMemoryCouponCatalog {
    async fn list_active(&self) -> Result<Vec<Coupon>, StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(backend_down());
        }
        Ok(self
            .coupons
            .iter()
            .filter(|c| c.is_active)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryWishlistRemote {
    wishlists: Mutex<HashMap<String, Vec<String>>>,
    failing: AtomicBool,
}

impl InMemoryWishlistRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn wishlist_of(&self, user_id: &str) -> Vec<String> {
        self.wishlists
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl WishlistRemote for InMemoryWishlistRemote {
    async fn fetch(&self, user_id: &str) -> Result<Vec<String>, StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(backend_down());
        }
        Ok(self.wishlist_of(user_id))
    }

    async fn add(&self, user_id: &str, product_id: &str) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(backend_down());
        }
        let mut wishlists = self.wishlists.lock().unwrap();
        let list = wishlists.entry(user_id.to_string()).or_default();
        if !list.iter().any(|id| id == product_id) {
            list.push(product_id.to_string());
        }
        Ok(())
    }

    async fn remove(&self, user_id: &str, product_id: &str) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(backend_down());
        }
        let mut wishlists = self.wishlists.lock().unwrap();
        if let Some(list) = wishlists.get_mut(user_id) {
            list.retain(|id| id != product_id);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryOrderGateway {
    orders: Mutex<Vec<Order>>,
    failing: AtomicBool,
}

impl InMemoryOrderGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn submitted(&self) -> Vec<Order> {
        self.orders.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderGateway for InMemoryOrderGateway {
    async fn submit(&self, order: &Order) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(backend_down());
        }
        self.orders.lock().unwrap().push(order.clone());
        Ok(())
    }
}

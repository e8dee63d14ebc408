//! State-binding layer: explicitly constructed store handles over the
//! domain aggregates and the persistence ports.

pub mod local_file;
pub mod memory;
pub mod wishlist;

pub use wishlist::WishlistStore;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::domain::aggregates::{Cart, CartLine, Coupon, CouponError, Product};
use crate::domain::value_objects::DEFAULT_CURRENCY;
use crate::ports::{CartRepository, CouponCatalog};

/// Handle owning the live cart and its persistence.
///
/// Constructed explicitly and passed around rather than living in ambient
/// state. Every mutation persists the line items fire-and-forget: a failed
/// save is logged and the in-memory cart stays authoritative for the
/// session. Saves run on a single writer task that always writes the
/// newest snapshot, so a slow early save can never clobber a later one.
/// The cart persists locally regardless of auth state.
pub struct CartStore {
    cart: Cart,
    snapshots: watch::Sender<Vec<CartLine>>,
}

impl CartStore {
    /// Open the store, restoring any persisted line-item snapshot. A
    /// failed load starts an empty cart; it is not a user-facing error.
    pub async fn open(repository: Arc<dyn CartRepository>) -> Self {
        let lines = match repository.load().await {
            Ok(lines) => lines,
            Err(error) => {
                warn!(%error, "could not restore persisted cart, starting empty");
                Vec::new()
            }
        };
        let cart = Cart::from_lines(lines, DEFAULT_CURRENCY);

        // Writer task: one save in flight at a time, always of the latest
        // snapshot. Intermediate snapshots coalesce. Ends when the store
        // (and with it the sender) is dropped.
        let (snapshots, mut rx) = watch::channel(cart.lines().to_vec());
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let lines = rx.borrow_and_update().clone();
                if let Err(error) = repository.save(lines).await {
                    warn!(%error, "failed to persist cart snapshot");
                }
            }
        });

        Self { cart, snapshots }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn add_item(&mut self, product: &Product, size: &str, quantity: u32) {
        self.cart.add_item(product, size, quantity);
        debug!(product_id = %product.id, size, quantity, "item added to cart");
        self.persist();
    }

    pub fn remove_item(&mut self, product_id: &str, size: &str) {
        self.cart.remove_item(product_id, size);
        self.persist();
    }

    pub fn update_quantity(&mut self, product_id: &str, size: &str, quantity: u32) {
        self.cart.update_quantity(product_id, size, quantity);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// Apply a coupon the user picked from the catalog listing. The
    /// discount lives in memory only; it is not part of the persisted
    /// snapshot.
    pub fn apply_coupon(&mut self, coupon: &Coupon) -> Result<(), CouponError> {
        self.cart.apply_coupon(coupon)
    }

    pub fn clear_coupon(&mut self) {
        self.cart.clear_coupon();
    }

    /// Mutable access to the aggregate, for draining domain events. Cart
    /// mutations should go through the named operations above so they
    /// get persisted.
    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    fn persist(&self) {
        self.snapshots.send_replace(self.cart.lines().to_vec());
    }
}

/// Coupons to present to the user. A failed fetch yields an empty list
/// with a logged diagnostic, never a user-facing cart error. Inactive
/// coupons are filtered out here, at the listing boundary.
pub async fn offerable_coupons(catalog: &dyn CouponCatalog) -> Vec<Coupon> {
    match catalog.list_active().await {
        Ok(coupons) => coupons.into_iter().filter(|c| c.is_active).collect(),
        Err(error) => {
            warn!(%error, "failed to fetch coupons");
            Vec::new()
        }
    }
}

//! Cart Aggregate
//!
//! Owns the line items and the applied discount, and derives all pricing
//! from them. Line identity is the `(product_id, size)` pair: adding the
//! same pair again merges into the existing line instead of duplicating it.
//! Name, price and thumbnail are snapshotted at add time and intentionally
//! never re-synced, so an in-progress cart keeps the prices the shopper
//! saw even if the catalog changes underneath it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::aggregates::coupon::{Coupon, CouponError};
use crate::domain::aggregates::product::Product;
use crate::domain::events::{CartEvent, DomainEvent};
use crate::domain::value_objects::{CouponCode, Money};

/// One `(product, size)` row in the cart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub unit_price: Money,
    #[serde(default)]
    pub image: Option<String>,
    pub size: String,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }

    fn matches(&self, product_id: &str, size: &str) -> bool {
        self.product_id == product_id && self.size == size
    }
}

/// The one coupon currently applied to the cart. Last applied wins; there
/// is no stacking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppliedDiscount {
    pub code: CouponCode,
    pub amount: Money,
}

#[derive(Clone, Debug)]
pub struct Cart {
    id: String,
    lines: Vec<CartLine>,
    discount: Option<AppliedDiscount>,
    currency: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    events: Vec<DomainEvent>,
}

impl Cart {
    pub fn new(currency: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            lines: vec![],
            discount: None,
            currency: currency.to_string(),
            created_at: now,
            updated_at: now,
            events: vec![],
        }
    }

    /// Rebuild a cart from a persisted line-item snapshot. Discounts are
    /// session state and are never persisted, so a restored cart starts
    /// with none.
    ///
    /// The snapshot is not trusted to uphold the cart's invariants: a
    /// tampered or legacy document may carry duplicate `(product, size)`
    /// rows or zero quantities. Duplicates merge by summing quantities
    /// (first occurrence keeps its position and snapshot fields) and
    /// zero-quantity rows are dropped.
    pub fn from_lines(lines: Vec<CartLine>, currency: &str) -> Self {
        let mut cart = Self::new(currency);
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            if let Some(existing) = cart
                .lines
                .iter_mut()
                .find(|l| l.matches(&line.product_id, &line.size))
            {
                existing.quantity = existing.quantity.saturating_add(line.quantity);
            } else {
                cart.lines.push(line);
            }
        }
        cart
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn discount(&self) -> Option<&AppliedDiscount> {
        self.discount.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add `quantity` of a product in the given size, snapshotting name,
    /// price and first image. Merges into an existing `(product, size)`
    /// line. A zero quantity is a no-op.
    pub fn add_item(&mut self, product: &Product, size: &str, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(&product.id, size))
        {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine {
                product_id: product.id.clone(),
                name: product.name.clone(),
                unit_price: product.price.clone(),
                image: product.thumbnail().map(str::to_string),
                size: size.to_string(),
                quantity,
            });
        }
        self.raise(CartEvent::ItemAdded {
            product_id: product.id.clone(),
            size: size.to_string(),
            quantity,
        });
        self.touch();
    }

    /// Remove the matching line. Silently a no-op when absent.
    pub fn remove_item(&mut self, product_id: &str, size: &str) {
        let before = self.lines.len();
        self.lines.retain(|line| !line.matches(product_id, size));
        if self.lines.len() != before {
            self.raise(CartEvent::ItemRemoved {
                product_id: product_id.to_string(),
                size: size.to_string(),
            });
            self.touch();
        }
    }

    /// Set a line's quantity to exactly `quantity` (not incremental).
    /// Zero behaves as removal; a missing line is a no-op.
    pub fn update_quantity(&mut self, product_id: &str, size: &str, quantity: u32) {
        if quantity == 0 {
            self.remove_item(product_id, size);
            return;
        }
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(product_id, size))
        {
            line.quantity = quantity;
            self.raise(CartEvent::QuantityChanged {
                product_id: product_id.to_string(),
                size: size.to_string(),
                quantity,
            });
            self.touch();
        }
    }

    /// Empty the cart. Also drops the applied discount: a discount tied to
    /// a cart that no longer exists is meaningless.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.discount = None;
        self.raise(CartEvent::Cleared);
        self.touch();
    }

    /// Apply a coupon, replacing any prior one. Fails without touching the
    /// cart when the subtotal is below the coupon's minimum purchase.
    ///
    /// `is_active` is not re-checked here; inactive coupons are filtered
    /// out where the catalog lists them. Re-applying the same coupon is
    /// idempotent.
    pub fn apply_coupon(&mut self, coupon: &Coupon) -> Result<(), CouponError> {
        if !coupon.eligible_for(&self.subtotal()) {
            return Err(CouponError::MinPurchaseNotMet {
                required: coupon.min_purchase_amount.clone(),
            });
        }
        self.discount = Some(AppliedDiscount {
            code: coupon.code.clone(),
            amount: coupon.discount_amount.clone(),
        });
        self.raise(CartEvent::DiscountApplied {
            code: coupon.code.clone(),
            amount: coupon.discount_amount.clone(),
        });
        self.touch();
        Ok(())
    }

    /// Drop the applied coupon, if any. Always succeeds.
    pub fn clear_coupon(&mut self) {
        if self.discount.take().is_some() {
            self.raise(CartEvent::DiscountCleared);
            self.touch();
        }
    }

    /// Σ unit price × quantity over all lines. Zero for an empty cart.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().fold(Money::zero(&self.currency), |acc, line| {
            acc.add(&line.line_total()).unwrap_or(acc)
        })
    }

    /// The applied discount amount, or zero.
    pub fn discount_amount(&self) -> Money {
        self.discount
            .as_ref()
            .map(|d| d.amount.clone())
            .unwrap_or_else(|| Money::zero(&self.currency))
    }

    /// `max(0, subtotal − discount)`. Never negative. A discount that has
    /// gone stale (subtotal dropped below the coupon minimum after a
    /// removal) is NOT revalidated here; it keeps applying until replaced
    /// or cleared.
    pub fn total(&self) -> Money {
        let subtotal = self.subtotal();
        match &self.discount {
            Some(discount) => subtotal
                .saturating_sub(&discount.amount)
                .unwrap_or(subtotal),
            None => subtotal,
        }
    }

    /// Σ quantity over all lines; the badge count.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    fn raise(&mut self, event: CartEvent) {
        self.events.push(DomainEvent::Cart(event));
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn tee(id: &str, price: i64) -> Product {
        Product {
            id: id.to_string(),
            name: "Oversized Tee".to_string(),
            price: Money::thb(Decimal::new(price, 0)),
            images: vec!["tee-front.jpg".to_string()],
            category: "tops".to_string(),
            sizes: vec![],
        }
    }

    fn coupon(code: &str, amount: i64, min: i64) -> Coupon {
        Coupon {
            code: CouponCode::new(code).unwrap(),
            description: String::new(),
            discount_amount: Money::thb(Decimal::new(amount, 0)),
            min_purchase_amount: Money::thb(Decimal::new(min, 0)),
            is_active: true,
        }
    }

    #[test]
    fn same_product_and_size_merge_into_one_line() {
        let mut cart = Cart::new("THB");
        let product = tee("p1", 500);
        cart.add_item(&product, "M", 2);
        cart.add_item(&product, "M", 1);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.subtotal().amount(), Decimal::new(1500, 0));
    }

    #[test]
    fn different_sizes_are_separate_lines() {
        let mut cart = Cart::new("THB");
        let product = tee("p1", 500);
        cart.add_item(&product, "M", 1);
        cart.add_item(&product, "L", 1);

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn subtotal_is_order_invariant() {
        let shirt = tee("p1", 500);
        let hoodie = tee("p2", 1200);

        let mut a = Cart::new("THB");
        a.add_item(&shirt, "M", 2);
        a.add_item(&hoodie, "L", 1);

        let mut b = Cart::new("THB");
        b.add_item(&hoodie, "L", 1);
        b.add_item(&shirt, "M", 1);
        b.add_item(&shirt, "M", 1);

        assert_eq!(a.subtotal(), b.subtotal());
    }

    #[test]
    fn add_with_zero_quantity_is_a_no_op() {
        let mut cart = Cart::new("THB");
        cart.add_item(&tee("p1", 500), "M", 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_sets_exactly_not_incrementally() {
        let mut cart = Cart::new("THB");
        cart.add_item(&tee("p1", 500), "M", 2);
        cart.update_quantity("p1", "M", 5);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn update_quantity_to_zero_removes_the_line() {
        let mut cart = Cart::new("THB");
        cart.add_item(&tee("p1", 500), "M", 2);
        cart.update_quantity("p1", "M", 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn update_and_remove_of_missing_line_are_no_ops() {
        let mut cart = Cart::new("THB");
        cart.add_item(&tee("p1", 500), "M", 1);
        cart.update_quantity("p9", "M", 4);
        cart.remove_item("p1", "XL");
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn coupon_applies_at_or_above_minimum() {
        let mut cart = Cart::new("THB");
        cart.add_item(&tee("p1", 500), "M", 3);

        cart.apply_coupon(&coupon("SAVE100", 100, 1000)).unwrap();
        assert_eq!(cart.total().amount(), Decimal::new(1400, 0));
    }

    #[test]
    fn coupon_below_minimum_fails_and_leaves_cart_unchanged() {
        let mut cart = Cart::new("THB");
        cart.add_item(&tee("p1", 500), "M", 1);

        let err = cart.apply_coupon(&coupon("SAVE100", 100, 1000)).unwrap_err();
        match err {
            CouponError::MinPurchaseNotMet { required } => {
                assert_eq!(required.amount(), Decimal::new(1000, 0));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(cart.discount().is_none());
        assert_eq!(cart.total().amount(), Decimal::new(500, 0));
    }

    #[test]
    fn reapplying_the_same_coupon_is_idempotent() {
        let mut cart = Cart::new("THB");
        cart.add_item(&tee("p1", 500), "M", 3);
        let c = coupon("SAVE100", 100, 1000);

        cart.apply_coupon(&c).unwrap();
        let once = cart.discount().cloned();
        cart.apply_coupon(&c).unwrap();
        assert_eq!(cart.discount().cloned(), once);
    }

    #[test]
    fn applying_a_second_coupon_replaces_the_first() {
        let mut cart = Cart::new("THB");
        cart.add_item(&tee("p1", 500), "M", 3);

        cart.apply_coupon(&coupon("SAVE100", 100, 1000)).unwrap();
        cart.apply_coupon(&coupon("SAVE200", 200, 1000)).unwrap();

        let applied = cart.discount().unwrap();
        assert_eq!(applied.code.as_str(), "SAVE200");
        assert_eq!(cart.total().amount(), Decimal::new(1300, 0));
    }

    #[test]
    fn stale_discount_keeps_applying_without_revalidation() {
        let mut cart = Cart::new("THB");
        let shirt = tee("p1", 500);
        let cap = tee("p2", 800);
        cart.add_item(&shirt, "M", 2);
        cart.add_item(&cap, "M", 1);
        cart.apply_coupon(&coupon("SAVE100", 100, 1000)).unwrap();

        // Subtotal drops to 800, below the coupon's 1000 minimum. The
        // discount is deliberately not revalidated on mutation.
        cart.remove_item("p1", "M");
        assert_eq!(cart.subtotal().amount(), Decimal::new(800, 0));
        assert_eq!(cart.total().amount(), Decimal::new(700, 0));
    }

    #[test]
    fn total_never_goes_negative() {
        let mut cart = Cart::new("THB");
        cart.add_item(&tee("p1", 500), "M", 2);
        cart.apply_coupon(&coupon("MEGA", 900, 0)).unwrap();
        cart.update_quantity("p1", "M", 1);

        assert!(cart.total().is_zero());
    }

    #[test]
    fn clear_drops_lines_and_discount() {
        let mut cart = Cart::new("THB");
        cart.add_item(&tee("p1", 500), "M", 3);
        cart.apply_coupon(&coupon("SAVE100", 100, 1000)).unwrap();

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.discount().is_none());
        assert!(cart.total().is_zero());
    }

    #[test]
    fn clear_coupon_restores_undiscounted_total() {
        let mut cart = Cart::new("THB");
        cart.add_item(&tee("p1", 500), "M", 3);
        cart.apply_coupon(&coupon("SAVE100", 100, 1000)).unwrap();

        cart.clear_coupon();
        assert!(cart.discount().is_none());
        assert_eq!(cart.total().amount(), Decimal::new(1500, 0));
    }

    #[test]
    fn item_count_sums_quantities_across_lines() {
        let mut cart = Cart::new("THB");
        cart.add_item(&tee("p1", 500), "M", 2);
        cart.add_item(&tee("p2", 800), "L", 3);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn restored_snapshot_merges_duplicates_and_drops_zero_rows() {
        let mut cart = Cart::new("THB");
        cart.add_item(&tee("p1", 500), "M", 2);
        let mut snapshot = cart.lines().to_vec();
        // Tampered snapshot: a duplicate row for the same key and a
        // zero-quantity row.
        snapshot.push(CartLine {
            quantity: 3,
            ..snapshot[0].clone()
        });
        snapshot.push(CartLine {
            size: "L".to_string(),
            quantity: 0,
            ..snapshot[0].clone()
        });

        let restored = Cart::from_lines(snapshot, "THB");
        assert_eq!(restored.lines().len(), 1);
        assert_eq!(restored.lines()[0].quantity, 5);
        assert_eq!(restored.subtotal().amount(), Decimal::new(2500, 0));
    }

    #[test]
    fn mutations_raise_domain_events() {
        let mut cart = Cart::new("THB");
        cart.add_item(&tee("p1", 500), "M", 2);
        cart.remove_item("p1", "M");
        let events = cart.take_events();
        assert_eq!(events.len(), 2);
        assert!(cart.take_events().is_empty());
    }
}

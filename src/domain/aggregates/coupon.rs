//! Coupon Aggregate
//!
//! Coupons are flat-amount discounts (never percentages) gated on a
//! minimum purchase. They are owned by the coupon catalog; the cart only
//! ever reads them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::domain::value_objects::{CouponCode, CouponCodeError, Money, DEFAULT_CURRENCY};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub code: CouponCode,
    #[serde(default)]
    pub description: String,
    pub discount_amount: Money,
    pub min_purchase_amount: Money,
    pub is_active: bool,
}

impl Coupon {
    /// Whether a cart at `subtotal` may use this coupon.
    pub fn eligible_for(&self, subtotal: &Money) -> bool {
        subtotal.at_least(&self.min_purchase_amount)
    }
}

/// Admin-side input for creating a coupon. Shape validation happens here,
/// before the document is handed to the catalog.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewCoupon {
    #[validate(length(min = 3, max = 32))]
    pub code: String,
    #[validate(length(max = 200))]
    #[serde(default)]
    pub description: String,
    pub discount_amount: Decimal,
    pub min_purchase_amount: Decimal,
    #[serde(default)]
    pub is_active: bool,
}

impl NewCoupon {
    pub fn into_coupon(self) -> Result<Coupon, CouponError> {
        self.validate()
            .map_err(|e| CouponError::InvalidInput(e.to_string()))?;
        if self.discount_amount <= Decimal::ZERO {
            return Err(CouponError::NonPositiveDiscount);
        }
        if self.min_purchase_amount < Decimal::ZERO {
            return Err(CouponError::NegativeMinimum);
        }
        Ok(Coupon {
            code: CouponCode::new(self.code)?,
            description: self.description,
            discount_amount: Money::new(self.discount_amount, DEFAULT_CURRENCY),
            min_purchase_amount: Money::new(self.min_purchase_amount, DEFAULT_CURRENCY),
            is_active: self.is_active,
        })
    }
}

#[derive(Error, Debug, Clone)]
pub enum CouponError {
    /// The cart's subtotal is below the coupon's threshold. Carries the
    /// required minimum so the caller can render an actionable message.
    #[error("minimum purchase of {required} required")]
    MinPurchaseNotMet { required: Money },

    #[error(transparent)]
    InvalidCode(#[from] CouponCodeError),

    #[error("discount amount must be positive")]
    NonPositiveDiscount,

    #[error("minimum purchase amount cannot be negative")]
    NegativeMinimum,

    #[error("invalid coupon: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(code: &str, discount: i64, min: i64) -> NewCoupon {
        NewCoupon {
            code: code.to_string(),
            description: "launch promo".to_string(),
            discount_amount: Decimal::new(discount, 0),
            min_purchase_amount: Decimal::new(min, 0),
            is_active: true,
        }
    }

    #[test]
    fn new_coupon_normalizes_code() {
        let coupon = draft("save100", 100, 1000).into_coupon().unwrap();
        assert_eq!(coupon.code.as_str(), "SAVE100");
    }

    #[test]
    fn rejects_non_positive_discount() {
        assert!(matches!(
            draft("SAVE", 0, 1000).into_coupon(),
            Err(CouponError::NonPositiveDiscount)
        ));
    }

    #[test]
    fn rejects_negative_minimum() {
        assert!(matches!(
            draft("SAVE", 100, -1).into_coupon(),
            Err(CouponError::NegativeMinimum)
        ));
    }

    #[test]
    fn rejects_too_short_code() {
        assert!(draft("ab", 100, 0).into_coupon().is_err());
    }

    #[test]
    fn eligibility_follows_minimum_purchase() {
        let coupon = draft("SAVE100", 100, 1000).into_coupon().unwrap();
        assert!(coupon.eligible_for(&Money::thb(Decimal::new(1000, 0))));
        assert!(!coupon.eligible_for(&Money::thb(Decimal::new(999, 0))));
    }
}

//! Value objects for the storefront

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Default currency for the storefront. Prices are in Thai baht.
pub const DEFAULT_CURRENCY: &str = "THB";

/// Money value object. Decimal-backed so repeated additions never drift.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: String,
}

impl Money {
    pub fn new(amount: Decimal, currency: &str) -> Self {
        Self { amount, currency: currency.to_string() }
    }

    pub fn thb(amount: Decimal) -> Self {
        Self::new(amount, DEFAULT_CURRENCY)
    }

    pub fn zero(currency: &str) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch);
        }
        Ok(Money::new(self.amount + other.amount, &self.currency))
    }

    pub fn multiply(&self, qty: u32) -> Money {
        Money::new(self.amount * Decimal::from(qty), &self.currency)
    }

    /// Subtraction floored at zero; a total never goes negative.
    pub fn saturating_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch);
        }
        let amount = (self.amount - other.amount).max(Decimal::ZERO);
        Ok(Money::new(amount, &self.currency))
    }

    /// True when `self >= other` in the same currency. Amounts in different
    /// currencies are never comparable.
    pub fn at_least(&self, other: &Money) -> bool {
        self.currency == other.currency && self.amount >= other.amount
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero(DEFAULT_CURRENCY)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

#[derive(Error, Debug, Clone)]
pub enum MoneyError {
    #[error("currency mismatch")]
    CurrencyMismatch,
}

/// Coupon code value object. Codes are case-insensitive; normalized to
/// trimmed uppercase on construction so `save100` and `SAVE100` are the
/// same coupon.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CouponCode(String);

impl CouponCode {
    pub fn new(value: impl Into<String>) -> Result<Self, CouponCodeError> {
        let value = value.into().trim().to_uppercase();
        if value.is_empty() {
            return Err(CouponCodeError::Empty);
        }
        if value.len() > 32 {
            return Err(CouponCodeError::TooLong);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug, Clone)]
pub enum CouponCodeError {
    #[error("coupon code is empty")]
    Empty,
    #[error("coupon code exceeds 32 characters")]
    TooLong,
}

//! Product snapshot
//!
//! The catalog document as the storefront sees it. Owned by the external
//! product catalog; the cart copies what it needs at add time.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Money;

/// Size run offered when a product document carries none.
pub const DEFAULT_SIZE_RUN: [&str; 4] = ["S", "M", "L", "XL"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sizes: Vec<String>,
}

impl Product {
    /// First catalog image; used as the cart thumbnail.
    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// The sizes to offer, falling back to the standard run when the
    /// document has none.
    pub fn size_run(&self) -> Vec<String> {
        if self.sizes.is_empty() {
            DEFAULT_SIZE_RUN.iter().map(|s| (*s).to_string()).collect()
        } else {
            self.sizes.clone()
        }
    }
}

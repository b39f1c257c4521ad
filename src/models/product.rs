use serde::{Deserialize, Serialize};

/// A purchasable item. Catalog entries are immutable templates; a cart line is
/// a value-copy of one of them carrying its own quantity, and possibly a price
/// overwritten by a discount calculation at add-time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
    pub available: bool,
    pub quantity: u32,
}

impl Product {
    pub fn new(name: impl Into<String>, price: f64, available: bool) -> Self {
        Self {
            name: name.into(),
            price,
            available,
            quantity: 1,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Case-insensitive name comparison, the catalog and cart matching rule.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

use crate::models::product::Product;

/// The fixed set of purchasable products, populated once at startup and never
/// mutated afterward. Holds at most one product per case-insensitive name.
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn with_defaults() -> Self {
        Self::new(vec![
            Product::new("Laptop", 1000.0, true),
            Product::new("Headphones", 50.0, true),
        ])
    }

    /// All products in stable insertion order.
    pub fn list_all(&self) -> &[Product] {
        &self.products
    }

    /// Case-insensitive exact match; first match wins.
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.matches_name(name))
    }
}

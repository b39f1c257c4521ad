use std::fmt;

use thiserror::Error;
use tracing::{debug, info};

use crate::models::product::Product;
use crate::services::discount::DiscountStrategy;
use crate::utils::formatting::format_price;

#[derive(Error, Debug, PartialEq)]
pub enum CartError {
    #[error("no discount strategy configured")]
    NoDiscountStrategy,

    #[error("Product not found in the cart.")]
    LineNotFound,
}

/// Confirmation returned by [`Cart::add_to_cart`]. The `Display` rendering is
/// the user-facing confirmation text the menu prints.
#[derive(Debug, Clone, PartialEq)]
pub enum AddedToCart {
    /// First line for this name; added as given, no discount applied.
    New { name: String, quantity: u32 },
    /// A line for this name already existed: the incoming product was appended
    /// as a fresh line at the discounted price, and the existing line's
    /// quantity was bumped to `combined_quantity`. `quantity` is the freshly
    /// appended line's quantity.
    Repeat {
        name: String,
        quantity: u32,
        discounted_price: f64,
        combined_quantity: u32,
    },
}

impl fmt::Display for AddedToCart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddedToCart::New { name, quantity } => {
                write!(f, "{quantity} {name}(s) added to the cart.")
            }
            AddedToCart::Repeat {
                name,
                quantity,
                discounted_price,
                combined_quantity,
            } => {
                writeln!(
                    f,
                    "{quantity} {name}(s) added to the cart with discounted price: {}",
                    format_price(*discounted_price)
                )?;
                write!(f, "Quantity updated for {name} to {combined_quantity}")
            }
        }
    }
}

/// Confirmation returned by [`Cart::update_quantity`].
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityUpdated {
    pub name: String,
    pub quantity: u32,
}

impl fmt::Display for QuantityUpdated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quantity updated for {} to {}", self.name, self.quantity)
    }
}

/// The shopping cart: an ordered list of product lines and the discount
/// strategy bound to it at startup.
///
/// The backing list may contain multiple lines for the same product name; each
/// add appends rather than merges. Display and billing aggregate where a
/// combined view is needed.
pub struct Cart {
    lines: Vec<Product>,
    discount: Option<Box<dyn DiscountStrategy>>,
}

impl Cart {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            discount: None,
        }
    }

    pub fn set_discount_strategy(&mut self, strategy: Box<dyn DiscountStrategy>) {
        self.discount = Some(strategy);
    }

    fn discounted(&self, price: f64) -> Result<f64, CartError> {
        let strategy = self.discount.as_ref().ok_or(CartError::NoDiscountStrategy)?;
        Ok(strategy.apply_discount(price))
    }

    /// Adds a product line to the cart.
    ///
    /// When a line with the same name (case-insensitive) already exists, the
    /// incoming product's price is overwritten with the discounted price and
    /// appended as a new line, and the existing line's quantity is incremented
    /// by the incoming quantity. The two resulting lines are intentionally not
    /// merged. When no line matches, the product is appended as given and the
    /// strategy is not consulted.
    pub fn add_to_cart(&mut self, product: Product) -> Result<AddedToCart, CartError> {
        if let Some(index) = self.find_line(&product.name) {
            let discounted_price = self.discounted(product.price)?;

            let mut incoming = product;
            incoming.price = discounted_price;
            let name = incoming.name.clone();
            let quantity = incoming.quantity;
            self.lines.push(incoming);

            self.lines[index].quantity += quantity;
            let combined_quantity = self.lines[index].quantity;

            info!(
                "added {quantity} x {name} at discounted price {discounted_price}, \
                 combined quantity now {combined_quantity}"
            );
            Ok(AddedToCart::Repeat {
                name,
                quantity,
                discounted_price,
                combined_quantity,
            })
        } else {
            let name = product.name.clone();
            let quantity = product.quantity;
            self.lines.push(product);

            info!("added {quantity} x {name}");
            Ok(AddedToCart::New { name, quantity })
        }
    }

    /// Overwrites the quantity of the first line matching `name`
    /// (case-insensitive). Later lines with the same name are untouched.
    pub fn update_quantity(
        &mut self,
        name: &str,
        quantity: u32,
    ) -> Result<QuantityUpdated, CartError> {
        let index = self.find_line(name).ok_or(CartError::LineNotFound)?;
        let line = &mut self.lines[index];
        line.quantity = quantity;

        info!("updated quantity for {} to {quantity}", line.name);
        Ok(QuantityUpdated {
            name: line.name.clone(),
            quantity,
        })
    }

    /// Removes exactly the line at `index`; other lines with the same name are
    /// untouched. Out of range removes nothing.
    pub fn remove_line(&mut self, index: usize) -> Option<Product> {
        if index < self.lines.len() {
            let removed = self.lines.remove(index);
            info!("removed line {} ({})", index, removed.name);
            Some(removed)
        } else {
            debug!("remove_line: no line at index {index}");
            None
        }
    }

    /// Index of the first line matching `name` (case-insensitive).
    pub fn find_line(&self, name: &str) -> Option<usize> {
        self.lines.iter().position(|line| line.matches_name(name))
    }

    /// Sums `apply_discount(line.price) * line.quantity` over every line. The
    /// discount is applied at billing time regardless of any discounting the
    /// line's stored price already received at add-time.
    pub fn calculate_total_bill(&self) -> Result<f64, CartError> {
        let mut total = 0.0;
        for line in &self.lines {
            total += self.discounted(line.price)? * f64::from(line.quantity);
        }
        Ok(total)
    }

    /// Live ordered view of the cart lines.
    pub fn items(&self) -> &[Product] {
        &self.lines
    }

    /// Combined quantity per product name, in first-occurrence order.
    pub fn aggregated_quantities(&self) -> Vec<(String, u32)> {
        let mut combined: Vec<(String, u32)> = Vec::new();
        for line in &self.lines {
            if let Some(entry) = combined.iter_mut().find(|(name, _)| *name == line.name) {
                entry.1 += line.quantity;
            } else {
                combined.push((line.name.clone(), line.quantity));
            }
        }
        combined
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

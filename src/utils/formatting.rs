use console::style;
use tabled::{
    settings::{Alignment, Style},
    Table, Tabled,
};

use crate::models::product::Product;

#[derive(Tabled)]
struct ProductTableRow {
    #[tabled(rename = "Product")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Available")]
    available: String,
}

#[derive(Tabled)]
struct CartTableRow {
    #[tabled(rename = "Product")]
    name: String,
    #[tabled(rename = "Quantity")]
    quantity: u32,
}

pub fn format_price(value: f64) -> String {
    format!("${value:.2}")
}

pub fn format_product_table(products: &[Product]) -> String {
    if products.is_empty() {
        return String::new();
    }

    let rows: Vec<ProductTableRow> = products
        .iter()
        .map(|product| ProductTableRow {
            name: product.name.clone(),
            price: format_price(product.price),
            available: if product.available {
                style("yes").green().to_string()
            } else {
                style("no").red().to_string()
            },
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded()).with(Alignment::left());

    table.to_string()
}

/// Renders the aggregated per-name cart view (one row per product name).
pub fn format_cart_table(entries: &[(String, u32)]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let rows: Vec<CartTableRow> = entries
        .iter()
        .map(|(name, quantity)| CartTableRow {
            name: name.clone(),
            quantity: *quantity,
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded()).with(Alignment::left());

    table.to_string()
}

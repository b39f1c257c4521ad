use shopcart_cli::models::product::Product;
use shopcart_cli::services::{AddedToCart, Cart, CartError, Catalog, PercentageOffStrategy};
use shopcart_cli::utils::formatting::format_price;

fn cart_with_ten_percent_off() -> Cart {
    let mut cart = Cart::new();
    cart.set_discount_strategy(Box::new(PercentageOffStrategy::new(10.0)));
    cart
}

fn add_from_catalog(cart: &mut Cart, catalog: &Catalog, name: &str, quantity: u32) -> AddedToCart {
    let product = catalog
        .find_by_name(name)
        .expect("product should exist in the catalog")
        .clone()
        .with_quantity(quantity);
    cart.add_to_cart(product).expect("add should succeed")
}

#[test]
fn test_full_shopping_scenario() {
    let catalog = Catalog::with_defaults();
    let mut cart = cart_with_ten_percent_off();

    // First add: plain addition, no discount, one line.
    let first = add_from_catalog(&mut cart, &catalog, "Laptop", 1);
    assert_eq!(first.to_string(), "1 Laptop(s) added to the cart.");
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 1);
    assert!((cart.items()[0].price - 1000.0).abs() < 1e-9);

    // Second add: the original line is bumped to quantity 2 and a fresh
    // discounted line is appended.
    let second = add_from_catalog(&mut cart, &catalog, "Laptop", 1);
    assert_eq!(
        second.to_string(),
        "1 Laptop(s) added to the cart with discounted price: $900.00\n\
         Quantity updated for Laptop to 2"
    );
    assert_eq!(cart.items().len(), 2);
    assert_eq!(cart.items()[0].quantity, 2);
    assert!((cart.items()[0].price - 1000.0).abs() < 1e-9);
    assert_eq!(cart.items()[1].quantity, 1);
    assert!((cart.items()[1].price - 900.0).abs() < 1e-9);

    // Billing discounts every line again: 0.9*1000*2 + 0.9*900*1 = 2610.
    let total = cart.calculate_total_bill().unwrap();
    assert!((total - 2610.0).abs() < 1e-9);
    assert_eq!(format_price(total), "$2610.00");
}

#[test]
fn test_catalog_lookup_feeds_cart_lines() {
    let catalog = Catalog::with_defaults();
    let mut cart = cart_with_ten_percent_off();

    add_from_catalog(&mut cart, &catalog, "headphones", 4);

    // The line snapshots the catalog entry's canonical name and price.
    assert_eq!(cart.items()[0].name, "Headphones");
    assert!((cart.items()[0].price - 50.0).abs() < 1e-9);
    assert_eq!(cart.items()[0].quantity, 4);

    // The catalog template itself is untouched.
    assert_eq!(catalog.find_by_name("Headphones").unwrap().quantity, 1);
}

#[test]
fn test_update_and_not_found_reporting() {
    let catalog = Catalog::with_defaults();
    let mut cart = cart_with_ten_percent_off();
    add_from_catalog(&mut cart, &catalog, "Laptop", 2);

    let updated = cart.update_quantity("LAPTOP", 7).unwrap();
    assert_eq!(updated.to_string(), "Quantity updated for Laptop to 7");

    let err = cart.update_quantity("Headphones", 1).unwrap_err();
    assert_eq!(err.to_string(), "Product not found in the cart.");
    assert_eq!(cart.items().len(), 1);
}

#[test]
fn test_partial_then_full_removal() {
    let catalog = Catalog::with_defaults();
    let mut cart = cart_with_ten_percent_off();
    add_from_catalog(&mut cart, &catalog, "Headphones", 5);

    // Partial removal: the menu turns "remove 2 of 5" into a quantity update.
    let index = cart.find_line("Headphones").unwrap();
    let remaining = cart.items()[index].quantity - 2;
    cart.update_quantity("Headphones", remaining).unwrap();
    assert_eq!(cart.items()[index].quantity, 3);

    // Full removal drops the line.
    let removed = cart.remove_line(index).unwrap();
    assert_eq!(removed.name, "Headphones");
    assert!(cart.items().is_empty());
}

#[test]
fn test_aggregated_display_combines_duplicate_lines() {
    let catalog = Catalog::with_defaults();
    let mut cart = cart_with_ten_percent_off();

    add_from_catalog(&mut cart, &catalog, "Laptop", 1);
    add_from_catalog(&mut cart, &catalog, "Headphones", 2);
    add_from_catalog(&mut cart, &catalog, "Laptop", 1);

    assert_eq!(
        cart.aggregated_quantities(),
        vec![("Laptop".to_string(), 3), ("Headphones".to_string(), 2)]
    );
}

#[test]
fn test_pricing_without_strategy_is_an_explicit_fault() {
    let mut cart = Cart::new();
    cart.add_to_cart(Product::new("Laptop", 1000.0, true))
        .unwrap();

    assert_eq!(
        cart.add_to_cart(Product::new("Laptop", 1000.0, true))
            .unwrap_err(),
        CartError::NoDiscountStrategy
    );
    assert_eq!(
        cart.calculate_total_bill().unwrap_err(),
        CartError::NoDiscountStrategy
    );
}

use anyhow::Result;
use console::{style, Emoji};
use dialoguer::{theme::ColorfulTheme, Input, Password, Select};
use tracing::{error, info};

use crate::{
    models::user::{validate_password_format, validate_username, RegisterUserRequest},
    services::{Cart, CartError, Catalog, PercentageOffStrategy, UserService, UserServiceError},
    utils::{
        config::Config,
        formatting::{format_cart_table, format_price, format_product_table},
    },
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static CART: Emoji<'_, '_> = Emoji("🛒 ", "");

/// The interactive shopping application: catalog, cart, and user accounts
/// owned in one place and driven by the menu loop.
pub struct CliApp {
    catalog: Catalog,
    cart: Cart,
    users: UserService,
}

impl CliApp {
    pub fn new(config: &Config) -> Self {
        let catalog = Catalog::with_defaults();

        let mut cart = Cart::new();
        cart.set_discount_strategy(Box::new(PercentageOffStrategy::new(
            config.discount_percent,
        )));

        let mut users = UserService::new();
        users.seed_defaults();

        Self {
            catalog,
            cart,
            users,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        println!(
            "{CART}{}",
            style("Welcome to the Shopping System").bold().cyan()
        );

        loop {
            if self.users.is_logged_in() {
                self.main_menu()?;
            } else if !self.welcome_menu()? {
                return Ok(());
            }
        }
    }

    /// Logged-out menu. Returns `false` when the user chose to exit.
    fn welcome_menu(&mut self) -> Result<bool> {
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Welcome to the Shopping System")
            .items(&["Log in", "Create an account", "Exit"])
            .default(0)
            .interact()?;

        match choice {
            0 => self.handle_login()?,
            1 => self.handle_register()?,
            _ => {
                println!("Exiting. Goodbye!");
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn main_menu(&mut self) -> Result<()> {
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Menu")
            .items(&[
                "Display products",
                "Add product to cart",
                "Update cart quantity",
                "Remove product from cart",
                "Display cart",
                "Display total bill",
                "Log out",
            ])
            .default(0)
            .interact()?;

        match choice {
            0 => self.handle_display_products(),
            1 => self.handle_add_to_cart(),
            2 => self.handle_update_quantity(),
            3 => self.handle_remove_from_cart(),
            4 => self.handle_display_cart(),
            5 => self.handle_display_total(),
            _ => self.handle_logout(),
        }
    }

    fn handle_login(&mut self) -> Result<()> {
        let theme = ColorfulTheme::default();

        let username: String = Input::with_theme(&theme)
            .with_prompt("Enter your username")
            .interact_text()?;

        let password: String = Password::with_theme(&theme)
            .with_prompt("Enter your password")
            .interact()?;

        match self.users.login(&username, &password) {
            Ok(user) => {
                println!("{CHECKMARK}Login successful.");
                println!("Welcome back, {}!", style(&user.username).green());
            }
            Err(UserServiceError::AuthenticationFailed) => {
                println!("{CROSS}Invalid username or password. Please try again.");
            }
        }

        Ok(())
    }

    // Single-shot prompts: an invalid field reports its format message and
    // returns to the menu rather than re-prompting.
    fn handle_register(&mut self) -> Result<()> {
        let theme = ColorfulTheme::default();

        let username: String = Input::with_theme(&theme)
            .with_prompt("Enter a username")
            .interact_text()?;

        if !validate_username(&username) {
            println!(
                "{CROSS}Invalid username format. Please use at least 3 characters, \
                 only alphabets, and underscores."
            );
            return Ok(());
        }

        let password: String = Password::with_theme(&theme)
            .with_prompt("Enter a password")
            .interact()?;

        if !validate_password_format(&password) {
            println!(
                "{CROSS}Invalid password format. Please use at least 8 characters with \
                 one uppercase letter, one lowercase letter, one digit, and one special \
                 character."
            );
            return Ok(());
        }

        match RegisterUserRequest::new(username, password) {
            Ok(request) => {
                let user = self.users.register(request);
                println!("{CHECKMARK}User created successfully. Please log in.");
                info!("user {} created", user.username);
            }
            Err(err) => {
                println!("{CROSS}Registration failed: {err}");
                error!("registration failed: {err}");
            }
        }

        Ok(())
    }

    fn handle_display_products(&self) -> Result<()> {
        println!("Products available:");
        println!("{}", format_product_table(self.catalog.list_all()));
        Ok(())
    }

    fn handle_add_to_cart(&mut self) -> Result<()> {
        let name = self.prompt_product_name()?;
        let quantity = self.prompt_quantity()?;

        let Some(product) = self.catalog.find_by_name(&name) else {
            println!("Product not found.");
            return Ok(());
        };
        let line = product.clone().with_quantity(quantity);

        match self.cart.add_to_cart(line) {
            Ok(outcome) => println!("{outcome}"),
            Err(err) => {
                println!("{CROSS}Failed to add to cart: {err}");
                error!("add to cart failed: {err}");
            }
        }

        Ok(())
    }

    fn handle_update_quantity(&mut self) -> Result<()> {
        let name = self.prompt_product_name()?;
        let quantity = self.prompt_quantity()?;

        match self.cart.update_quantity(&name, quantity) {
            Ok(updated) => println!("{updated}"),
            Err(CartError::LineNotFound) => println!("Product not found in the cart."),
            Err(err) => {
                println!("{CROSS}Failed to update quantity: {err}");
                error!("update quantity failed: {err}");
            }
        }

        Ok(())
    }

    fn handle_remove_from_cart(&mut self) -> Result<()> {
        let name = self.prompt_product_name()?;

        let Some(index) = self.cart.find_line(&name) else {
            println!("Product not found in the cart.");
            return Ok(());
        };
        let line = &self.cart.items()[index];
        let line_name = line.name.clone();
        let line_quantity = line.quantity;

        let to_remove = self.prompt_quantity_to_remove(line_quantity)?;

        if to_remove == 0 {
            println!("Invalid quantity to remove.");
        } else if to_remove < line_quantity {
            match self.cart.update_quantity(&line_name, line_quantity - to_remove) {
                Ok(updated) => {
                    println!("{updated}");
                    println!("{to_remove} {line_name}(s) removed from the cart.");
                }
                Err(err) => {
                    println!("{CROSS}Failed to remove from cart: {err}");
                    error!("remove from cart failed: {err}");
                }
            }
        } else if self.cart.remove_line(index).is_some() {
            println!("{line_name} removed from the cart.");
        }

        Ok(())
    }

    fn handle_display_cart(&self) -> Result<()> {
        println!("Cart Items:");
        let entries = self.cart.aggregated_quantities();
        if entries.is_empty() {
            println!("{}", style("(empty)").dim());
        } else {
            println!("{}", format_cart_table(&entries));
        }
        Ok(())
    }

    fn handle_display_total(&self) -> Result<()> {
        match self.cart.calculate_total_bill() {
            Ok(total) => {
                println!("Total Bill: Your total bill is {}.", format_price(total));
            }
            Err(err) => {
                println!("{CROSS}Failed to calculate total bill: {err}");
                error!("total bill failed: {err}");
            }
        }
        Ok(())
    }

    fn handle_logout(&mut self) -> Result<()> {
        self.users.logout();
        println!("{CHECKMARK}Logged out successfully.");
        Ok(())
    }

    /// Prompts until the name matches a catalog product.
    fn prompt_product_name(&self) -> Result<String> {
        let catalog = &self.catalog;
        let name: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Enter the product name")
            .validate_with(|input: &String| -> Result<(), &str> {
                if catalog.find_by_name(input).is_some() {
                    Ok(())
                } else {
                    Err("Product not found. Please enter a valid product name.")
                }
            })
            .interact_text()?;
        Ok(name)
    }

    /// Prompts until a positive integer is entered.
    fn prompt_quantity(&self) -> Result<u32> {
        let quantity = Input::<u32>::with_theme(&ColorfulTheme::default())
            .with_prompt("Enter the quantity")
            .validate_with(|input: &u32| -> Result<(), &str> {
                if *input > 0 {
                    Ok(())
                } else {
                    Err("Quantity should be a positive integer.")
                }
            })
            .interact_text()?;
        Ok(quantity)
    }

    /// Accepts `0..=max`; zero is rejected by the caller afterwards.
    fn prompt_quantity_to_remove(&self, max: u32) -> Result<u32> {
        let quantity = Input::<u32>::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Enter the quantity to remove (max {max})"))
            .validate_with(move |input: &u32| -> Result<(), &str> {
                if *input <= max {
                    Ok(())
                } else {
                    Err("Invalid quantity. Please enter a valid quantity.")
                }
            })
            .interact_text()?;
        Ok(quantity)
    }
}

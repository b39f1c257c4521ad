use clap::Parser;

#[derive(Parser)]
#[command(name = "shopcart-cli")]
#[command(about = "An interactive shopping cart with user accounts and discount pricing")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Discount percentage applied at pricing time, 0-100 (overrides DISCOUNT_PERCENT)
    #[arg(short, long)]
    pub discount: Option<f64>,
}

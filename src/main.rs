use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use shopcart_cli::cli::{Args, CliApp};
use shopcart_cli::utils::Config;

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(discount) = args.discount {
        config.discount_percent = discount;
        config.validate()?;
    }

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("shopcart-cli starting");
    tracing::info!(
        "configuration loaded for {} environment",
        config.environment
    );

    let mut app = CliApp::new(&config);
    app.run()?;

    tracing::info!("shopcart-cli stopped");
    Ok(())
}

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub discount_percent: f64,
    pub log_level: String,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let config = Config {
            discount_percent: env::var("DISCOUNT_PERCENT")
                .unwrap_or("10".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DISCOUNT_PERCENT must be a number"))?,
            log_level: env::var("LOG_LEVEL").unwrap_or("info".to_string()),
            environment: env::var("APP_ENV").unwrap_or("development".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    // The percentage-off strategy does no range checking of its own; the
    // value must be pinned to [0, 100] before it ever reaches the cart.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(0.0..=100.0).contains(&self.discount_percent) {
            return Err(anyhow::anyhow!(
                "DISCOUNT_PERCENT must be between 0 and 100"
            ));
        }

        Ok(())
    }
}

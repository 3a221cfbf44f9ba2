use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Path of the CSV listing table. Overwritten on every scrape.
    pub data_file: PathBuf,
    /// Base URL of the aggregator's bus-tickets search pages.
    pub aggregator_base_url: String,
    /// Per-request timeout for the aggregator fetch.
    pub scrape_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            data_file: env::var("DATA_FILE")
                .unwrap_or_else(|_| "bus_data.csv".to_string())
                .into(),
            aggregator_base_url: env::var("AGGREGATOR_BASE_URL")
                .unwrap_or_else(|_| "https://www.redbus.in/bus-tickets".to_string()),
            scrape_timeout: Duration::from_secs(
                env::var("SCRAPE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .context("SCRAPE_TIMEOUT_SECS must be a number of seconds")?,
            ),
        })
    }
}

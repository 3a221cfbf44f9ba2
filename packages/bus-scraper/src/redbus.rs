//! Aggregator page scraper - local HTTP + HTML parsing
//!
//! This implementation:
//! - Uses reqwest for HTTP requests
//! - Uses scraper crate for extracting listing cards
//!
//! Limitations:
//! - No JavaScript rendering, so only the listings present in the initial
//!   HTML are seen (pages that lazy-load more cards on scroll return a
//!   partial set)

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::extract::{extract_listings, Extraction};
use crate::query::SearchQuery;
use crate::source::BusSource;

/// Scraper for the aggregator's search-results pages.
pub struct RedbusScraper {
    client: reqwest::Client,
    base_url: String,
}

impl RedbusScraper {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        // Use a browser-like User-Agent to avoid bot detection
        let user_agent = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .parse()
                .unwrap(),
        );
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            "en-US,en;q=0.5".parse().unwrap(),
        );
        headers.insert(reqwest::header::CONNECTION, "keep-alive".parse().unwrap());

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("HTTP {} for {}", status, url);
        }

        response
            .text()
            .await
            .context("Failed to read response body")
    }
}

#[async_trait]
impl BusSource for RedbusScraper {
    async fn fetch_listings(&self, query: &SearchQuery) -> Result<Extraction> {
        let url = query.url(&self.base_url)?;
        debug!(url = %url, "Fetching search results");

        let html = self.fetch_html(url.as_str()).await?;
        let extraction = extract_listings(&html, query);

        info!(
            source = %query.source,
            destination = %query.destination,
            date = %query.date,
            listings = extraction.listings.len(),
            skipped = extraction.skipped,
            "Scrape completed"
        );

        Ok(extraction)
    }
}

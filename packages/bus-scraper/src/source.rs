use anyhow::Result;
use async_trait::async_trait;

use crate::extract::Extraction;
use crate::query::SearchQuery;

/// Trait for listing sources (to allow mocking)
#[async_trait]
pub trait BusSource: Send + Sync {
    async fn fetch_listings(&self, query: &SearchQuery) -> Result<Extraction>;
}

use crate::models::Listing;
use crate::scrapers::types::DelayWindow;
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Fetches one page of search results and returns the listings that pass the filters
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch and parse a single result page.
    ///
    /// An exhausted page (no embedded data) is `Ok` with an empty list;
    /// `Err` is reserved for transport failures.
    async fn fetch_page(&self, url: &str) -> Result<Vec<Listing>>;

    /// Get the name of the listing source
    fn source_name(&self) -> &'static str;
}

/// Source of bounded random delays
pub trait Jitter: Send + Sync {
    /// Pick a duration inside `window`
    fn pick(&self, window: DelayWindow) -> Duration;
}

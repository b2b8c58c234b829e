use crate::models::Listing;
use crate::scrapers::extract::{extract_adverts, Extraction};
use crate::scrapers::filter::FilterRules;
use crate::scrapers::parser::parse_listing;
use crate::scrapers::traits::PageFetcher;
use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::seq::IndexedRandom;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Pool the outbound user agent is picked from on every request
pub const USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
];

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE_AT: &str = "de-AT,de;q=0.9,en;q=0.8";

/// willhaben.at result-page fetcher
pub struct WillhabenScraper {
    client: Client,
    filters: FilterRules,
}

impl WillhabenScraper {
    /// Create a scraper with the given inclusion rules and per-request timeout
    pub fn new(filters: FilterRules, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_AT));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, filters })
    }

    fn pick_user_agent() -> &'static str {
        USER_AGENTS
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(USER_AGENTS[0])
    }

    /// Filter and parse the adverts embedded in a result page
    fn listings_from_html(&self, url: &str, html: &str) -> Vec<Listing> {
        let adverts = match extract_adverts(html) {
            Extraction::Adverts(adverts) => adverts,
            Extraction::MissingScript => {
                warn!("No __NEXT_DATA__ found on {}", url);
                return Vec::new();
            }
            Extraction::Malformed(reason) => {
                warn!("Unexpected page data on {}: {}", url, reason);
                return Vec::new();
            }
        };

        let total = adverts.len();
        let listings: Vec<Listing> = adverts
            .iter()
            .filter(|ad| self.filters.should_include(ad))
            .filter_map(parse_listing)
            .collect();

        debug!("{}: {} adverts, {} kept", url, total, listings.len());
        listings
    }
}

#[async_trait]
impl PageFetcher for WillhabenScraper {
    async fn fetch_page(&self, url: &str) -> Result<Vec<Listing>> {
        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, Self::pick_user_agent())
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("Failed to fetch {}: {}", url, response.status());
        }

        let html = response.text().await.context("Failed to read response body")?;
        debug!("Downloaded {} bytes of HTML", html.len());

        Ok(self.listings_from_html(url, &html))
    }

    fn source_name(&self) -> &'static str {
        "willhaben"
    }
}

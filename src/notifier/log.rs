use crate::models::Listing;
use crate::notifier::{digest, Notifier};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Local;
use tracing::info;

/// Prints the digest to stdout
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, listings: &[Listing]) -> Result<()> {
        println!("{}", digest::render(listings, Local::now()));
        info!("Digest printed with {} new listing(s)", listings.len());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

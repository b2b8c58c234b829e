use crate::models::Listing;
use crate::notifier::{digest, Notifier};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Serialize)]
struct Digest<'a> {
    subject: String,
    sent_at: DateTime<Local>,
    count: usize,
    listings: &'a [Listing],
}

/// Writes one pretty-printed JSON file per batch
pub struct JsonDigestNotifier {
    dir: PathBuf,
}

impl JsonDigestNotifier {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[cfg(test)]
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

#[async_trait]
impl Notifier for JsonDigestNotifier {
    async fn notify(&self, listings: &[Listing]) -> Result<()> {
        let sent_at = Local::now();
        let batch = Digest {
            subject: digest::subject(listings.len()),
            sent_at,
            count: listings.len(),
            listings,
        };
        let json = serde_json::to_string_pretty(&batch)?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        let filename = self
            .dir
            .join(format!("{}.json", sent_at.format("%Y%m%d-%H%M%S%.3f")));
        tokio::fs::write(&filename, json)
            .await
            .with_context(|| format!("Failed to write {}", filename.display()))?;

        info!("💾 Saved digest with {} listing(s) to {}", listings.len(), filename.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "json"
    }
}

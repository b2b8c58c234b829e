use crate::config::ScoutConfig;
use crate::models::Listing;
use crate::scrapers::region::{region_name, walk_region, WalkStop};
use crate::scrapers::traits::{Jitter, PageFetcher};
use crate::tracker::DedupTracker;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Runs scrape cycles over every configured region and reports new listings
pub struct CycleOrchestrator {
    fetcher: Box<dyn PageFetcher>,
    jitter: Box<dyn Jitter>,
    config: ScoutConfig,
    tracker: DedupTracker,
    first_run: bool,
}

impl CycleOrchestrator {
    pub fn new(
        fetcher: Box<dyn PageFetcher>,
        jitter: Box<dyn Jitter>,
        config: ScoutConfig,
    ) -> Self {
        Self {
            fetcher,
            jitter,
            config,
            tracker: DedupTracker::new(),
            first_run: true,
        }
    }

    /// Walk every region once and return the listings not seen before.
    ///
    /// The first cycle only indexes what is currently online and always
    /// returns an empty list.
    pub async fn run_cycle(&mut self) -> Vec<Listing> {
        let mut new_listings = Vec::new();
        let regions = self.config.regions.clone();

        for (idx, region_url) in regions.iter().enumerate() {
            if idx > 0 {
                sleep(self.jitter.pick(self.config.region_delay)).await;
            }

            let walk = walk_region(
                self.fetcher.as_ref(),
                self.jitter.as_ref(),
                region_url,
                self.config.pagination,
                self.config.page_delay,
            )
            .await;

            let name = region_name(region_url);
            if let WalkStop::FetchFailed(reason) = &walk.stop {
                warn!("{}: stopped after page {} ({})", name, walk.pages, reason);
            }

            let found = walk.listings.len();
            let mut region_new = 0;
            for listing in walk.listings {
                if self.tracker.observe(&listing.id) && !self.first_run {
                    new_listings.push(listing);
                    region_new += 1;
                }
            }

            if self.first_run {
                info!("{}: {} private, indexing", name, found);
            } else {
                info!("{}: {} private, {} new", name, found, region_new);
            }
        }

        if self.first_run {
            if self.tracker.is_empty() {
                warn!("First run found no listings; check the configured regions");
            }
            info!("First run complete. Indexed {} private listings.", self.tracker.len());
            self.first_run = false;
        }

        new_listings
    }

    /// Randomized wait before the next cycle
    pub fn next_interval(&self) -> Duration {
        self.jitter.pick(self.config.cycle_interval)
    }

    pub fn next_interval_millis(&self) -> u64 {
        self.next_interval().as_millis() as u64
    }

    pub fn is_first_run(&self) -> bool {
        self.first_run
    }

    pub fn known_listings(&self) -> usize {
        self.tracker.len()
    }

    pub fn source_name(&self) -> &'static str {
        self.fetcher.source_name()
    }
}

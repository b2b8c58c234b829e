mod config;
mod models;
mod notifier;
mod orchestrator;
mod scrapers;
mod tracker;

use config::ScoutConfig;
use orchestrator::CycleOrchestrator;
use scrapers::{region::region_name, RandomJitter, WillhabenScraper};
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match ScoutConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Config load error: {:#}", e);
            return Err(e);
        }
    };

    let notifier = match notifier::from_config(&config) {
        Ok(notifier) => notifier,
        Err(e) => {
            error!("Notifier setup error: {:#}", e);
            return Err(e);
        }
    };
    let scraper = WillhabenScraper::new(config.filters, config.request_timeout())?;

    info!("🏠 Willhaben Scout - private listings monitor");
    info!(
        "Monitoring: {}",
        config
            .regions
            .iter()
            .map(|url| region_name(url))
            .collect::<Vec<_>>()
            .join(", ")
    );
    info!("Notifications: {}", notifier.name());

    let mut orchestrator =
        CycleOrchestrator::new(Box::new(scraper), Box::new(RandomJitter), config);

    loop {
        if orchestrator.is_first_run() {
            info!("Indexing current {} listings...", orchestrator.source_name());
        }

        let new_listings = orchestrator.run_cycle().await;

        if !new_listings.is_empty() {
            info!("Found {} new private listing(s)!", new_listings.len());
        }
        if let Err(e) = notifier::deliver(notifier.as_ref(), &new_listings).await {
            error!("Notification via {} failed: {:#}", notifier.name(), e);
        }

        let interval = orchestrator.next_interval_millis();
        info!(
            "Next check in {}s ({} listings known)",
            interval / 1000,
            orchestrator.known_listings()
        );

        tokio::select! {
            _ = tokio::time::sleep(Duration::from_millis(interval)) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                return Ok(());
            }
        }
    }
}

use crate::models::Listing;
use crate::scrapers::traits::{Jitter, PageFetcher};
use crate::scrapers::types::{DelayWindow, PaginationPolicy};
use tokio::time::sleep;
use tracing::{debug, warn};

/// Why a region walk stopped requesting pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkStop {
    /// The page cap was reached
    MaxPages,
    /// A page came back with no listings
    EmptyPage,
    /// A page came back with fewer listings than a full page
    ShortPage,
    /// Fetching a page failed; earlier pages are kept
    FetchFailed(String),
}

/// Listings collected from one region
#[derive(Debug)]
pub struct RegionWalk {
    pub listings: Vec<Listing>,
    pub pages: u32,
    pub stop: WalkStop,
}

/// URL of the given result page; page 1 is the bare region URL
pub fn page_url(region_url: &str, page: u32) -> String {
    if page <= 1 {
        region_url.to_string()
    } else {
        format!("{}?page={}", region_url, page)
    }
}

/// Short region label for logs, e.g. `wien`
pub fn region_name(region_url: &str) -> &str {
    region_url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(region_url)
}

/// Walk the result pages of one region
pub async fn walk_region(
    fetcher: &dyn PageFetcher,
    jitter: &dyn Jitter,
    region_url: &str,
    policy: PaginationPolicy,
    page_delay: DelayWindow,
) -> RegionWalk {
    let mut listings = Vec::new();
    if policy.max_pages == 0 {
        return RegionWalk {
            listings,
            pages: 0,
            stop: WalkStop::MaxPages,
        };
    }

    let mut page = 1;

    let stop = loop {
        let url = page_url(region_url, page);

        let found = match fetcher.fetch_page(&url).await {
            Ok(found) => found,
            Err(e) => {
                warn!("Error on page {}: {:#}", page, e);
                break WalkStop::FetchFailed(e.to_string());
            }
        };

        let count = found.len();
        debug!("{} page {}: {} listings", region_name(region_url), page, count);

        if count == 0 {
            break WalkStop::EmptyPage;
        }

        listings.extend(found);

        if count < policy.full_page_size {
            break WalkStop::ShortPage;
        }
        if page >= policy.max_pages {
            break WalkStop::MaxPages;
        }

        sleep(jitter.pick(page_delay)).await;
        page += 1;
    };

    RegionWalk {
        listings,
        pages: page,
        stop,
    }
}

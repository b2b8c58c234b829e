use crate::models::Listing;
use crate::scrapers::traits::{Jitter, PageFetcher};
use crate::scrapers::types::DelayWindow;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Jitter that never waits
pub struct NoJitter;

impl Jitter for NoJitter {
    fn pick(&self, _window: DelayWindow) -> Duration {
        Duration::ZERO
    }
}

/// Zero-delay jitter that remembers every window it was asked for
#[derive(Clone, Default)]
pub struct RecordingJitter {
    picks: Arc<Mutex<Vec<DelayWindow>>>,
}

impl RecordingJitter {
    pub fn picks(&self) -> Vec<DelayWindow> {
        self.picks.lock().unwrap().clone()
    }
}

impl Jitter for RecordingJitter {
    fn pick(&self, window: DelayWindow) -> Duration {
        self.picks.lock().unwrap().push(window);
        Duration::ZERO
    }
}

/// Fetcher answering from per-URL queues; an exhausted queue yields an empty page
#[derive(Default)]
pub struct ScriptedFetcher {
    pages: Mutex<HashMap<String, VecDeque<Result<Vec<Listing>, String>>>>,
    requested: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, listings: Vec<Listing>) -> Self {
        self.push(url, Ok(listings))
    }

    pub fn failure(self, url: &str, message: &str) -> Self {
        self.push(url, Err(message.to_string()))
    }

    fn push(self, url: &str, response: Result<Vec<Listing>, String>) -> Self {
        self.pages
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(response);
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch_page(&self, url: &str) -> Result<Vec<Listing>> {
        self.requested.lock().unwrap().push(url.to_string());

        let next = self
            .pages
            .lock()
            .unwrap()
            .get_mut(url)
            .and_then(VecDeque::pop_front);

        match next {
            Some(Ok(listings)) => Ok(listings),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Ok(Vec::new()),
        }
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}

pub fn listing(id: &str) -> Listing {
    Listing {
        id: id.to_string(),
        title: format!("Listing {}", id),
        price: "€ 100.000".to_string(),
        location: "Wien".to_string(),
        url: format!("https://www.willhaben.at/iad/{}", id),
        property_type: "Wohnung".to_string(),
        size: "50".to_string(),
        rooms: "2".to_string(),
    }
}

/// `count` listings with ids `{prefix}-0`, `{prefix}-1`, ...
pub fn listings(prefix: &str, count: usize) -> Vec<Listing> {
    (0..count)
        .map(|n| listing(&format!("{}-{}", prefix, n)))
        .collect()
}

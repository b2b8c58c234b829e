use crate::scrapers::traits::Jitter;
use crate::scrapers::types::DelayWindow;
use rand::Rng;
use std::time::Duration;

/// Uniformly random delays from the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomJitter;

impl Jitter for RandomJitter {
    fn pick(&self, window: DelayWindow) -> Duration {
        let (min, max) = window.bounds();
        Duration::from_millis(rand::rng().random_range(min..=max))
    }
}

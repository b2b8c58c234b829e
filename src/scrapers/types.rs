use serde::{Deserialize, Serialize};

/// Inclusive window a randomized delay is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayWindow {
    /// Lower bound (ms)
    pub min_ms: u64,
    /// Upper bound (ms)
    pub max_ms: u64,
}

impl DelayWindow {
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// Bounds ordered low to high, whatever order they were configured in
    pub fn bounds(&self) -> (u64, u64) {
        if self.min_ms <= self.max_ms {
            (self.min_ms, self.max_ms)
        } else {
            (self.max_ms, self.min_ms)
        }
    }
}

/// When to stop walking the result pages of a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationPolicy {
    /// Hard cap on pages requested per region
    pub max_pages: u32,
    /// A page with fewer listings than this is the last one
    pub full_page_size: usize,
}

impl Default for PaginationPolicy {
    fn default() -> Self {
        Self {
            max_pages: 5,
            full_page_size: 25,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_window_is_normalised() {
        let window = DelayWindow::new(5_000, 2_000);
        assert_eq!(window.bounds(), (2_000, 5_000));
        assert_eq!(DelayWindow::new(7, 7).bounds(), (7, 7));
    }
}

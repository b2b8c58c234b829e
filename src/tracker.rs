use std::collections::HashSet;

/// Listing ids seen during this process lifetime
#[derive(Debug, Default)]
pub struct DedupTracker {
    known: HashSet<String>,
}

impl DedupTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id`, returning `true` only the first time it is seen
    pub fn observe(&mut self, id: &str) -> bool {
        if self.known.contains(id) {
            return false;
        }
        self.known.insert(id.to_string())
    }

    #[cfg(test)]
    pub fn contains(&self, id: &str) -> bool {
        self.known.contains(id)
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

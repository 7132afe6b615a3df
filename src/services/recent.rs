//! Recent searches
//!
//! A short most-recent-first list of queries, offered back to clients as
//! suggestions. Re-running a query moves it to the front instead of
//! duplicating it.

use std::collections::VecDeque;
use tokio::sync::RwLock;

use crate::config::MAX_RECENT_SEARCHES;

/// Suggestions present before anyone has searched
pub const DEFAULT_RECENT_SEARCHES: [&str; 4] = [
    "machine learning models for text classification",
    "computer vision tools for object detection",
    "open source repositories for natural language processing",
    "audio processing models for speech recognition",
];

/// Bounded, deduplicated list of recent queries
pub struct RecentSearches {
    entries: RwLock<VecDeque<String>>,
    capacity: usize,
}

impl RecentSearches {
    /// Empty list holding at most `capacity` queries, clamped to
    /// `1..=MAX_RECENT_SEARCHES`
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_RECENT_SEARCHES);
        Self {
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// List pre-filled with [`DEFAULT_RECENT_SEARCHES`]
    pub fn seeded(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_RECENT_SEARCHES);
        let entries = DEFAULT_RECENT_SEARCHES
            .iter()
            .take(capacity)
            .map(|s| s.to_string())
            .collect();
        Self {
            entries: RwLock::new(entries),
            capacity,
        }
    }

    /// Put `query` at the front, dropping any older copy and the overflow
    pub async fn record(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        let mut entries = self.entries.write().await;
        entries.retain(|existing| existing != query);
        entries.push_front(query.to_string());
        entries.truncate(self.capacity);
    }

    /// Snapshot, most recent first
    pub async fn list(&self) -> Vec<String> {
        self.entries.read().await.iter().cloned().collect()
    }
}

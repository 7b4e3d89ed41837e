use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// A generated summary and when it was produced
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCacheEntry {
    pub summary: String,
    pub generated_at: DateTime<Utc>,
}

/// In-memory summary table keyed by article key.
///
/// Lives as long as its owner; nothing is written to disk. The lock is only
/// held for the map operation itself, never across network calls.
#[derive(Debug, Default)]
pub struct SummaryCache {
    entries: RwLock<HashMap<String, SummaryCacheEntry>>,
}

impl SummaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &str) -> Option<SummaryCacheEntry> {
        self.entries.read().await.get(key).cloned()
    }

    /// Store a summary, replacing any previous entry for the key
    pub async fn insert(&self, key: &str, summary: String) {
        let entry = SummaryCacheEntry {
            summary,
            generated_at: Utc::now(),
        };
        self.entries.write().await.insert(key.to_string(), entry);
    }

    pub async fn remove(&self, key: &str) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::sanitizer::{SanitizationPolicy, sanitize};

pub const DEFAULT_HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub source_lang: String,
    pub target_lang: String,
    pub model: String,
    pub input_html: String,
    pub output_html: String,
}

/// Bounded in-memory history, newest entry first.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    entries: Arc<RwLock<VecDeque<HistoryEntry>>>,
    limit: usize,
}

impl HistoryStore {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(limit))),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn record(&self, entry: HistoryEntry) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.push_front(entry);
        entries.truncate(self.limit);
        debug!(len = entries.len(), "recorded history entry");
    }

    /// Snapshot for display. Stored HTML is sanitized again on the way out.
    pub fn list(&self, policy: &SanitizationPolicy) -> Vec<HistoryEntry> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries
            .iter()
            .map(|entry| HistoryEntry {
                input_html: sanitize(&entry.input_html, policy),
                output_html: sanitize(&entry.output_html, policy),
                ..entry.clone()
            })
            .collect()
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

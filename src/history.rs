use std::collections::VecDeque;

use crate::models::HistoryEntry;

/// Default number of entries kept before the oldest are evicted
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Bounded, append-only log of query attempts.
///
/// Stored oldest-first; every read returns newest-first.
#[derive(Debug, Clone)]
pub struct QueryHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for QueryHistory {
    fn default() -> Self {
        QueryHistory::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl QueryHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry, evicting from the front once over capacity
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// All entries, most recent first
    pub fn all(&self) -> Vec<HistoryEntry> {
        self.entries.iter().rev().cloned().collect()
    }

    /// Up to `limit` successful entries, most recent first
    pub fn recent_successful(&self, limit: usize) -> Vec<HistoryEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| e.success)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Page through entries whose query text contains `search`
    /// (case-insensitive), most recent first
    pub fn search(&self, search: Option<&str>, limit: usize, offset: usize) -> Vec<HistoryEntry> {
        let needle = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        self.entries
            .iter()
            .rev()
            .filter(|e| match &needle {
                Some(needle) => e.query.to_lowercase().contains(needle.as_str()),
                None => true,
            })
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn get(&self, entry_id: &str) -> Option<HistoryEntry> {
        self.entries.iter().find(|e| e.id == entry_id).cloned()
    }

    /// Drop a single entry. Returns false if it was already gone.
    pub fn remove(&mut self, entry_id: &str) -> bool {
        match self.entries.iter().position(|e| e.id == entry_id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

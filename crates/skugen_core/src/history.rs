use std::collections::VecDeque;

/// Number of generated SKUs kept by default.
pub const HISTORY_CAPACITY: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub title: String,
    pub sku: String,
    /// RFC 3339 UTC timestamp of when the SKU was generated.
    pub recorded_at: String,
}

/// Append-only log of generated SKUs, bounded to the most recent entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuild a history from stored entries (oldest first), keeping the newest ones.
    pub fn from_entries(entries: impl IntoIterator<Item = HistoryEntry>, capacity: usize) -> Self {
        let mut history = Self::with_capacity(capacity);
        for entry in entries {
            history.push(entry);
        }
        history
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Up to `limit` entries, newest first.
    pub fn recent(&self, limit: usize) -> Vec<&HistoryEntry> {
        self.entries.iter().rev().take(limit).collect()
    }

    pub fn latest_for_title(&self, title: &str) -> Option<&HistoryEntry> {
        let title = title.trim();
        self.entries.iter().rev().find(|entry| entry.title == title)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use skugen_core::{History, HistoryEntry};
use skugen_logging::{skugen_debug, skugen_warn};
use thiserror::Error;

use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read history {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse history {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("failed to serialize history: {0}")]
    Serialize(#[from] ron::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedEntry {
    title: String,
    sku: String,
    recorded_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedHistory {
    entries: Vec<PersistedEntry>,
}

/// File-backed history log. The file holds entries oldest first.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    capacity: usize,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the log; a missing file is an empty history.
    pub fn load(&self) -> Result<History, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(History::with_capacity(self.capacity));
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let persisted: PersistedHistory =
            ron::from_str(&content).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        let entries = persisted.entries.into_iter().map(|entry| HistoryEntry {
            title: entry.title,
            sku: entry.sku,
            recorded_at: entry.recorded_at,
        });
        let history = History::from_entries(entries, self.capacity);
        skugen_debug!("Loaded {} history entries from {:?}", history.len(), self.path);
        Ok(history)
    }

    pub fn save(&self, history: &History) -> Result<(), StoreError> {
        let persisted = PersistedHistory {
            entries: history
                .entries()
                .map(|entry| PersistedEntry {
                    title: entry.title.clone(),
                    sku: entry.sku.clone(),
                    recorded_at: entry.recorded_at.clone(),
                })
                .collect(),
        };

        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(&persisted, pretty)?;
        AtomicFileWriter::new().write(&self.path, &content)?;
        skugen_debug!("Saved {} history entries to {:?}", history.len(), self.path);
        Ok(())
    }

    /// Append one entry and persist; returns the updated log.
    ///
    /// A log that cannot be parsed is replaced. A log that cannot be read is
    /// left alone and the read error is returned.
    pub fn append(&self, entry: HistoryEntry) -> Result<History, StoreError> {
        let mut history = match self.load() {
            Ok(history) => history,
            Err(err @ StoreError::Parse { .. }) => {
                skugen_warn!("{}; starting a new history log", err);
                History::with_capacity(self.capacity)
            }
            Err(err) => return Err(err),
        };
        history.push(entry);
        self.save(&history)?;
        Ok(history)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.save(&History::with_capacity(self.capacity))
    }
}

//! JSON file-based history backend.
//!
//! The whole history is held in memory and rewritten on every change using an
//! atomic write (write to a temp file, then rename), so a crash never leaves a
//! half-written file behind.

use crate::domain::{OmniSearchError, Result};
use crate::storage::backend::HistoryStore;
use crate::storage::models::QueryRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// On-disk container format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HistoryData {
    /// Format version for future migrations.
    version: u32,

    /// Records keyed by [`QueryRecord::key`].
    #[serde(default)]
    queries: HashMap<String, QueryRecord>,
}

impl Default for HistoryData {
    fn default() -> Self {
        Self {
            version: 1,
            queries: HashMap::new(),
        }
    }
}

/// JSON file history backend.
///
/// `Send` but not `Sync`; it lives on the worker thread only.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "queries": {
///     "rust async": {
///       "query": "Rust async",
///       "count": 3,
///       "first_searched": 1700000000,
///       "last_searched": 1700050000
///     }
///   }
/// }
/// ```
pub struct JsonHistoryStore {
    file_path: PathBuf,
    data: HistoryData,
    dirty: bool,
}

impl JsonHistoryStore {
    /// Opens the history file, creating parent directories as needed.
    ///
    /// A missing file is an empty history.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, or the file exists
    /// but cannot be read or parsed.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON history");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty history");
            HistoryData::default()
        };

        tracing::debug!(query_count = data.queries.len(), "history initialized");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    fn load_from_file(path: &Path) -> Result<HistoryData> {
        let contents = std::fs::read_to_string(path)?;
        let data: HistoryData = serde_json::from_str(&contents)
            .map_err(|e| OmniSearchError::Storage(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(version = data.version, queries = data.queries.len(), "loaded history");
        Ok(data)
    }

    /// Writes the history to disk if it changed since the last save.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the temp-file write, or the rename fails.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| OmniSearchError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "history saved");
        Ok(())
    }
}

impl HistoryStore for JsonHistoryStore {
    fn record(&mut self, query: &str, timestamp: i64) -> Result<QueryRecord> {
        let _span = tracing::debug_span!("json_record_query", query = %query, timestamp = timestamp).entered();

        let key = QueryRecord::key(query);
        if key.is_empty() {
            return Err(OmniSearchError::Storage("refusing to record a blank query".to_string()));
        }

        let text = query.trim();
        let record = self
            .data
            .queries
            .entry(key)
            .and_modify(|existing| {
                text.clone_into(&mut existing.query);
                existing.count = existing.count.saturating_add(1);
                existing.last_searched = existing.last_searched.max(timestamp);
            })
            .or_insert_with(|| QueryRecord::new(text, timestamp))
            .clone();

        self.dirty = true;
        self.save_to_file()?;

        tracing::debug!(count = record.count, "query recorded");
        Ok(record)
    }

    fn all(&self) -> Result<Vec<QueryRecord>> {
        Ok(self.data.queries.values().cloned().collect())
    }

    fn clear(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("json_clear_history", count = self.data.queries.len()).entered();

        self.data.queries.clear();
        self.dirty = true;
        self.save_to_file()
    }
}

impl Drop for JsonHistoryStore {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty history on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonHistoryStore {
        JsonHistoryStore::new(dir.path().join("nested").join("history.json")).unwrap()
    }

    #[test]
    fn case_variants_share_a_record() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        store.record("rust async", 100).unwrap();
        let record = store.record("  Rust Async ", 200).unwrap();

        assert_eq!(record.count, 2);
        assert_eq!(record.query, "Rust Async");
        assert_eq!(record.first_searched, 100);
        assert_eq!(record.last_searched, 200);
        assert_eq!(store.all().unwrap().len(), 1);
    }

    #[test]
    fn blank_queries_are_rejected() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        assert!(matches!(store.record("   ", 1), Err(OmniSearchError::Storage(_))));
        assert!(store.all().unwrap().is_empty());
    }

    #[test]
    fn history_survives_reopening() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = store_in(&dir);
            store.record("climate data", 10).unwrap();
        }

        let store = store_in(&dir);
        let records = store.all().unwrap();
        assert_eq!(records, vec![QueryRecord::new("climate data", 10)]);
        assert!(!dir.path().join("nested").join("history.tmp").exists());
    }

    #[test]
    fn clear_empties_the_file() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.record("a", 1).unwrap();
        store.clear().unwrap();
        drop(store);

        assert!(store_in(&dir).all().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(JsonHistoryStore::new(path), Err(OmniSearchError::Storage(_))));
    }
}

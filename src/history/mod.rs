//! Recognition History
//!
//! A bounded, most-recent-first list of past recognition sessions. Entries
//! come from two places: text-only records persisted by the server (no boxes,
//! no thumbnail) and sessions recorded locally right after a recognition call
//! (with the uploaded image, kept only for the lifetime of the view).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::{HistoryRecord, OcrService};
use crate::error::ClientResult;
use crate::recognition::RecognitionResult;

/// Number of entries retained by default
pub const DEFAULT_CAPACITY: usize = 10;

/// One past recognition session; never mutated after creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    /// Data URI of the uploaded image, empty for server records
    pub thumbnail: String,
    pub result: RecognitionResult,
}

impl HistoryEntry {
    /// Rebuild an entry from a server record
    pub fn from_record(record: &HistoryRecord) -> Self {
        let timestamp = match DateTime::parse_from_rfc3339(&record.created_at) {
            Ok(created) => created.timestamp_millis(),
            Err(e) => {
                warn!(
                    "History record {} has unreadable timestamp {:?}: {}",
                    record.id, record.created_at, e
                );
                0
            }
        };

        Self {
            id: record.id.to_string(),
            timestamp,
            thumbnail: String::new(),
            result: RecognitionResult::text_only(record.text.clone()),
        }
    }

    pub fn has_thumbnail(&self) -> bool {
        !self.thumbnail.is_empty()
    }

    /// First line of the recognized text, for list labels
    pub fn preview(&self, max_chars: usize) -> String {
        let line = self.result.full_text.lines().next().unwrap_or("").trim();
        if line.chars().count() > max_chars {
            let cut: String = line.chars().take(max_chars).collect();
            format!("{}...", cut)
        } else {
            line.to_string()
        }
    }
}

/// Data needed to re-display a past session
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedEntry {
    pub result: RecognitionResult,
    pub thumbnail: String,
}

/// Bounded history of recognition sessions
#[derive(Debug, Clone)]
pub struct HistoryCache {
    entries: Vec<HistoryEntry>,
    capacity: usize,
    local_seq: u64,
}

impl Default for HistoryCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl HistoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache holding at most `capacity` entries (minimum one)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
            local_seq: 0,
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
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

    /// Fetch the server history and replace the whole collection with it
    pub async fn load_remote(
        &mut self,
        service: &dyn OcrService,
        token: &str,
    ) -> ClientResult<&[HistoryEntry]> {
        let fetched = service.fetch_history(token).await;
        self.apply_remote(fetched)?;
        Ok(&self.entries)
    }

    /// Apply a completed history fetch; on failure the collection is untouched
    pub fn apply_remote(&mut self, fetched: ClientResult<Vec<HistoryRecord>>) -> ClientResult<usize> {
        let records = fetched?;
        self.entries = records
            .iter()
            .take(self.capacity)
            .map(HistoryEntry::from_record)
            .collect();

        info!(
            "Loaded {} history entries ({} on server)",
            self.entries.len(),
            records.len()
        );
        Ok(self.entries.len())
    }

    /// Record a just-completed recognition at the head of the list
    pub fn record_local(&mut self, thumbnail: String, result: RecognitionResult) -> &HistoryEntry {
        self.record_local_at(thumbnail, result, Utc::now().timestamp_millis())
    }

    /// Record with an explicit timestamp
    pub fn record_local_at(
        &mut self,
        thumbnail: String,
        result: RecognitionResult,
        timestamp: i64,
    ) -> &HistoryEntry {
        self.local_seq += 1;
        let entry = HistoryEntry {
            id: format!("{}-{}", timestamp, self.local_seq),
            timestamp,
            thumbnail,
            result,
        };

        self.entries.insert(0, entry);
        // Local inserts always land at the head, so the tail is the oldest
        self.entries.truncate(self.capacity);
        &self.entries[0]
    }

    /// Delete the server history, then empty the local collection
    pub async fn clear_all(&mut self, service: &dyn OcrService, token: &str) -> ClientResult<()> {
        let outcome = service.clear_history(token).await;
        self.apply_clear(outcome)
    }

    /// Apply a completed server deletion; only success empties the collection
    pub fn apply_clear(&mut self, outcome: ClientResult<()>) -> ClientResult<()> {
        match outcome {
            Ok(()) => {
                info!("Cleared {} history entries", self.entries.len());
                self.entries.clear();
                Ok(())
            }
            Err(e) => {
                warn!("History clear failed, keeping local entries: {}", e);
                Err(e)
            }
        }
    }

    /// Look up an entry for re-display
    pub fn select(&self, id: &str) -> Option<SelectedEntry> {
        self.entries.iter().find(|e| e.id == id).map(|entry| SelectedEntry {
            result: entry.result.clone(),
            thumbnail: entry.thumbnail.clone(),
        })
    }
}

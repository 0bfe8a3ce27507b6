//! Sled-based history and favourites store.
//!
//! Every completed summary lands here, keyed by a hash of its URL, so past
//! summaries can be listed, favourited and pruned from the CLI.

use crate::summary::SummaryResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("database error: {0}")]
    Db(#[from] sled::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("no stored summary for: {0}")]
    NotFound(String),
}

/// A stored summary with its history metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSummary {
    /// The source URL
    pub url: String,
    /// When the summary was created
    pub created_at: DateTime<Utc>,
    /// Whether the user pinned this summary
    #[serde(default)]
    pub favourite: bool,
    /// The summary itself
    pub result: SummaryResult,
}

impl StoredSummary {
    pub fn new(result: SummaryResult) -> Self {
        Self {
            url: result.url.clone(),
            created_at: Utc::now(),
            favourite: false,
            result,
        }
    }
}

/// History of past summaries, keyed by URL hash
pub struct History {
    db: sled::Db,
}

impl History {
    /// Open or create the history store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, HistoryError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Record a summary, replacing any earlier one for the same URL.
    /// Favourite status survives the replacement.
    pub fn store(&self, result: &SummaryResult) -> Result<(), HistoryError> {
        let key = Self::hash_url(&result.url);
        let mut stored = StoredSummary::new(result.clone());
        if let Some(previous) = self.get(&result.url)? {
            stored.favourite = previous.favourite;
        }
        let value = serde_json::to_vec(&stored)?;
        self.db.insert(key.as_bytes(), value)?;
        self.db.flush()?;
        Ok(())
    }

    /// Retrieve a stored summary by URL
    pub fn get(&self, url: &str) -> Result<Option<StoredSummary>, HistoryError> {
        let key = Self::hash_url(url);
        match self.db.get(key.as_bytes())? {
            Some(data) => {
                let stored: StoredSummary = serde_json::from_slice(&data)?;
                Ok(Some(stored))
            }
            None => Ok(None),
        }
    }

    /// List all stored summaries, newest first
    pub fn list_all(&self) -> Result<Vec<StoredSummary>, HistoryError> {
        let mut results = Vec::new();
        for item in self.db.iter() {
            let (_key, value) = item?;
            let stored: StoredSummary = serde_json::from_slice(&value)?;
            results.push(stored);
        }
        results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(results)
    }

    /// List favourites only, newest first
    pub fn favourites(&self) -> Result<Vec<StoredSummary>, HistoryError> {
        let mut results = self.list_all()?;
        results.retain(|stored| stored.favourite);
        Ok(results)
    }

    /// Flip the favourite flag for a URL, returning the new state
    pub fn toggle_favourite(&self, url: &str) -> Result<bool, HistoryError> {
        let mut stored = self
            .get(url)?
            .ok_or_else(|| HistoryError::NotFound(url.to_string()))?;
        stored.favourite = !stored.favourite;

        let key = Self::hash_url(url);
        let value = serde_json::to_vec(&stored)?;
        self.db.insert(key.as_bytes(), value)?;
        self.db.flush()?;
        Ok(stored.favourite)
    }

    /// Delete a stored summary by URL
    pub fn delete(&self, url: &str) -> Result<bool, HistoryError> {
        let key = Self::hash_url(url);
        let existed = self.db.remove(key.as_bytes())?.is_some();
        self.db.flush()?;
        Ok(existed)
    }

    /// Remove every stored summary
    pub fn clear(&self) -> Result<(), HistoryError> {
        self.db.clear()?;
        self.db.flush()?;
        Ok(())
    }

    /// Number of stored summaries
    pub fn count(&self) -> usize {
        self.db.len()
    }

    fn hash_url(url: &str) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        let mut hasher = DefaultHasher::new();
        url.hash(&mut hasher);
        format!("{:x}", hasher.finish())
    }
}

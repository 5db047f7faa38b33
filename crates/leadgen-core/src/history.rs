//! Recent searches, newest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::leads::Lead;
use crate::search::SearchParams;
use crate::store::KeyValueStore;
use crate::StoreError;

/// Store key the history is persisted under.
pub const HISTORY_KEY: &str = "leadgen_history";

pub const DEFAULT_HISTORY_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub params: SearchParams,
    pub leads: Vec<Lead>,
}

#[derive(Debug, Clone)]
pub struct SearchHistory {
    items: Vec<HistoryItem>,
    limit: usize,
}

impl SearchHistory {
    /// An empty history holding at most `limit` items (at least one).
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            items: Vec::new(),
            limit: limit.max(1),
        }
    }

    #[must_use]
    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Records a completed search at the front, dropping the oldest entries
    /// beyond the limit.
    pub fn record(&mut self, params: SearchParams, leads: Vec<Lead>) -> &HistoryItem {
        let item = HistoryItem {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            params,
            leads,
        };
        self.items.insert(0, item);
        self.items.truncate(self.limit);
        &self.items[0]
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Loads the persisted history. A missing or unreadable entry yields an
    /// empty history.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store itself fails.
    pub fn load(store: &dyn KeyValueStore, limit: usize) -> Result<Self, StoreError> {
        let mut history = Self::new(limit);
        let Some(raw) = store.get(HISTORY_KEY)? else {
            return Ok(history);
        };
        match serde_json::from_str::<Vec<HistoryItem>>(&raw) {
            Ok(mut items) => {
                items.truncate(history.limit);
                history.items = items;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse stored history; starting empty");
            }
        }
        Ok(history)
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if serialization or the store write fails.
    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.items).map_err(|e| StoreError::Serialize {
            key: HISTORY_KEY.to_string(),
            source: e,
        })?;
        store.set(HISTORY_KEY, &raw)
    }
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

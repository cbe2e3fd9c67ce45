//! In-memory implementation of CardStore for testing and development

use crate::core::{CardInput, CardRecord, CardStore};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};

/// In-memory card store
///
/// Records are kept in insertion order so that cards created within the same
/// clock tick still list newest first. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryCardStore {
    cards: Arc<RwLock<IndexMap<String, CardRecord>>>,
}

impl InMemoryCardStore {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.cards.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CardStore for InMemoryCardStore {
    async fn insert(&self, record: CardRecord) -> Result<CardRecord> {
        let mut cards = self
            .cards
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        cards.insert(record.id.clone(), record.clone());

        Ok(record)
    }

    async fn list(&self) -> Result<Vec<CardRecord>> {
        let cards = self
            .cards
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        // Reverse insertion order first; the stable sort keeps it for ties.
        let mut records: Vec<CardRecord> = cards.values().rev().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(records)
    }

    async fn get(&self, id: &str) -> Result<Option<CardRecord>> {
        let cards = self
            .cards
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(cards.get(id).cloned())
    }

    async fn update(
        &self,
        id: &str,
        patch: &CardInput,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<CardRecord>> {
        let mut cards = self
            .cards
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(cards.get_mut(id).map(|record| {
            record.apply(patch, updated_at);
            record.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut cards = self
            .cards
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(cards.shift_remove(id).is_some())
    }
}

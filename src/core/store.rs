//! Storage trait for card records

use crate::core::card::{CardInput, CardRecord};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Document store holding card records
///
/// Implementations only persist and retrieve. Id assignment, timestamps and
/// masking belong to [`CardService`](crate::core::service::CardService).
/// "Not found" is reported as `None`/`false`, never as an error.
#[async_trait]
pub trait CardStore: Send + Sync {
    /// Persist a new record
    async fn insert(&self, record: CardRecord) -> Result<CardRecord>;

    /// All records, newest `created_at` first
    async fn list(&self) -> Result<Vec<CardRecord>>;

    /// Get a record by id
    async fn get(&self, id: &str) -> Result<Option<CardRecord>>;

    /// Replace the fields present in `patch` and set `updated_at`.
    ///
    /// Returns the record as stored after the update.
    async fn update(
        &self,
        id: &str,
        patch: &CardInput,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<CardRecord>>;

    /// Delete a record. Returns whether it existed.
    async fn delete(&self, id: &str) -> Result<bool>;
}

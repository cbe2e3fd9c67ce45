//! MongoDB storage backend using the official MongoDB async driver.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag:
//! ```toml
//! [dependencies]
//! card-vault = { version = "0.1", features = ["mongodb_backend"] }
//! ```
//!
//! # Storage model
//!
//! All cards live in one collection (default `cards`). The record `id` is
//! mapped to MongoDB's `_id`, the other fields keep their camelCase wire
//! names, and `createdAt`/`updatedAt` are stored as BSON dates so that the
//! newest-first sort is chronological.

use crate::core::card::{CARD_NUMBER, CARDHOLDER_NAME, CVV, EXPIRY_DATE};
use crate::core::{CardInput, CardRecord, CardStore};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::Database;
use mongodb::bson::{self, Document, doc};
use mongodb::options::ReturnDocument;

/// Default collection name
pub const DEFAULT_COLLECTION: &str = "cards";

const CREATED_AT: &str = "createdAt";
const UPDATED_AT: &str = "updatedAt";

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

fn to_bson_date(dt: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(dt.timestamp_millis())
}

fn from_bson_date(dt: bson::DateTime) -> Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(dt.timestamp_millis())
        .ok_or_else(|| anyhow!("Timestamp out of range: {}", dt))
}

fn record_to_document(record: &CardRecord) -> Document {
    doc! {
        "_id": record.id.as_str(),
        CARD_NUMBER: record.card_number.as_str(),
        CARDHOLDER_NAME: record.cardholder_name.as_str(),
        EXPIRY_DATE: record.expiry_date.as_str(),
        CVV: record.cvv.as_str(),
        CREATED_AT: to_bson_date(record.created_at),
        UPDATED_AT: to_bson_date(record.updated_at),
    }
}

fn document_to_record(doc: &Document) -> Result<CardRecord> {
    let text = |key: &str| {
        doc.get_str(key)
            .map(str::to_string)
            .map_err(|e| anyhow!("Invalid card document field '{}': {}", key, e))
    };
    let date = |key: &str| {
        doc.get_datetime(key)
            .map_err(|e| anyhow!("Invalid card document field '{}': {}", key, e))
            .and_then(|dt| from_bson_date(*dt))
    };

    Ok(CardRecord {
        id: text("_id")?,
        card_number: text(CARD_NUMBER)?,
        cardholder_name: text(CARDHOLDER_NAME)?,
        expiry_date: text(EXPIRY_DATE)?,
        cvv: text(CVV)?,
        created_at: date(CREATED_AT)?,
        updated_at: date(UPDATED_AT)?,
    })
}

/// `$set` body for the fields present in `patch`
fn patch_to_set(patch: &CardInput, updated_at: DateTime<Utc>) -> Document {
    let mut set = doc! { UPDATED_AT: to_bson_date(updated_at) };
    let fields = [
        (CARD_NUMBER, &patch.card_number),
        (CARDHOLDER_NAME, &patch.cardholder_name),
        (EXPIRY_DATE, &patch.expiry_date),
        (CVV, &patch.cvv),
    ];
    for (key, value) in fields {
        if let Some(v) = value {
            set.insert(key, v.as_str());
        }
    }
    set
}

// ---------------------------------------------------------------------------
// MongoCardStore
// ---------------------------------------------------------------------------

/// Card store backed by MongoDB.
///
/// # Example
///
/// ```rust,ignore
/// use mongodb::Client;
/// use card_vault::storage::MongoCardStore;
///
/// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
/// let store = MongoCardStore::new(client.database("card_vault"));
/// ```
#[derive(Clone, Debug)]
pub struct MongoCardStore {
    database: Database,
    collection: String,
}

impl MongoCardStore {
    /// Create a store using the default `cards` collection
    pub fn new(database: Database) -> Self {
        Self::with_collection(database, DEFAULT_COLLECTION)
    }

    /// Create a store on a named collection
    pub fn with_collection(database: Database, collection: impl Into<String>) -> Self {
        Self {
            database,
            collection: collection.into(),
        }
    }

    /// Connect to `uri` and open `database`
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self> {
        let client = mongodb::Client::with_uri_str(uri)
            .await
            .map_err(|e| anyhow!("Failed to connect to MongoDB: {}", e))?;
        Ok(Self::with_collection(client.database(database), collection))
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection(&self.collection)
    }
}

#[async_trait]
impl CardStore for MongoCardStore {
    async fn insert(&self, record: CardRecord) -> Result<CardRecord> {
        self.collection()
            .insert_one(record_to_document(&record))
            .await
            .map_err(|e| anyhow!("Failed to create card: {}", e))?;

        // Read back so callers see what was stored (millisecond timestamps)
        let stored = self
            .collection()
            .find_one(doc! { "_id": record.id.as_str() })
            .await
            .map_err(|e| anyhow!("Failed to read back created card: {}", e))?
            .ok_or_else(|| anyhow!("Card not found after insert"))?;

        document_to_record(&stored)
    }

    async fn list(&self) -> Result<Vec<CardRecord>> {
        let cursor = self
            .collection()
            .find(doc! {})
            .sort(doc! { CREATED_AT: -1 })
            .await
            .map_err(|e| anyhow!("Failed to list cards: {}", e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect cards: {}", e))?;

        docs.iter().map(document_to_record).collect()
    }

    async fn get(&self, id: &str) -> Result<Option<CardRecord>> {
        let doc = self
            .collection()
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| anyhow!("Failed to get card: {}", e))?;

        doc.as_ref().map(document_to_record).transpose()
    }

    async fn update(
        &self,
        id: &str,
        patch: &CardInput,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<CardRecord>> {
        let updated = self
            .collection()
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": patch_to_set(patch, updated_at) },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| anyhow!("Failed to update card: {}", e))?;

        updated.as_ref().map(document_to_record).transpose()
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| anyhow!("Failed to delete card: {}", e))?;

        Ok(result.deleted_count > 0)
    }
}

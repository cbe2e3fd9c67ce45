//! Record store adapter
//!
//! [`CardService`] sits between the HTTP handlers and a [`CardStore`]. It
//! validates input, assigns ids, stamps timestamps and masks every record it
//! hands back. Nothing above this layer ever sees a full card number.

use crate::core::card::{CardInput, DeletedCard, MaskedCard};
use crate::core::error::CardError;
use crate::core::query::{CardPage, ListQuery};
use crate::core::store::CardStore;
use crate::core::validation::{Completeness, validate_card};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Card operations over an explicitly supplied store
#[derive(Clone)]
pub struct CardService {
    store: Arc<dyn CardStore>,
}

impl CardService {
    pub fn new(store: Arc<dyn CardStore>) -> Self {
        Self { store }
    }

    /// Build from a concrete store
    pub fn from_store(store: impl CardStore + 'static) -> Self {
        Self::new(Arc::new(store))
    }

    /// Validate and persist a new card
    pub async fn create(&self, input: CardInput) -> Result<MaskedCard, CardError> {
        let validation = validate_card(&input, Completeness::Full);
        if !validation.is_valid {
            return Err(validation.into());
        }

        let id = Uuid::new_v4().to_string();
        let record = input
            .into_record(id, Utc::now())
            .ok_or_else(|| CardError::Internal("incomplete card after validation".to_string()))?;

        let stored = self.store.insert(record).await?;
        tracing::debug!(id = %stored.id, "card created");
        Ok(stored.masked())
    }

    /// Every card, newest first, then searched and paginated per `query`
    pub async fn list(&self, query: &ListQuery) -> Result<CardPage, CardError> {
        let records = self.store.list().await?;
        tracing::debug!(count = records.len(), "cards listed");
        Ok(query.apply(records.iter().map(|r| r.masked()).collect()))
    }

    /// A single card, or `None` if the id is unknown
    pub async fn get(&self, id: &str) -> Result<Option<MaskedCard>, CardError> {
        let record = self.store.get(id).await?;
        Ok(record.map(|r| r.masked()))
    }

    /// Replace the present fields of a card and refresh `updatedAt`
    pub async fn update(
        &self,
        id: &str,
        patch: CardInput,
    ) -> Result<Option<MaskedCard>, CardError> {
        let validation = validate_card(&patch, Completeness::Partial);
        if !validation.is_valid {
            return Err(validation.into());
        }

        let updated = self.store.update(id, &patch, Utc::now()).await?;
        if updated.is_some() {
            tracing::debug!(id, "card updated");
        }
        Ok(updated.map(|r| r.masked()))
    }

    /// Remove a card
    pub async fn delete(&self, id: &str) -> Result<Option<DeletedCard>, CardError> {
        if self.store.delete(id).await? {
            tracing::debug!(id, "card deleted");
            Ok(Some(DeletedCard::new(id)))
        } else {
            Ok(None)
        }
    }
}

//! Card record types
//!
//! Three shapes of the same card flow through the crate:
//!
//! - [`CardInput`]: what a caller submits. Every field is optional so the same
//!   type carries both full create payloads and partial update payloads.
//! - [`CardRecord`]: what the store persists, card number in full.
//! - [`MaskedCard`]: the only shape that leaves the server. Built exclusively
//!   through [`CardRecord::masked`].

use crate::core::mask::mask_card_number;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field names as they appear on the wire
pub const CARD_NUMBER: &str = "cardNumber";
pub const CARDHOLDER_NAME: &str = "cardholderName";
pub const EXPIRY_DATE: &str = "expiryDate";
pub const CVV: &str = "cvv";

/// Candidate card data submitted by a caller (create or partial update)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardholder_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvv: Option<String>,
}

impl CardInput {
    /// Build a complete input from the four fields
    pub fn new(
        card_number: impl Into<String>,
        cardholder_name: impl Into<String>,
        expiry_date: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            card_number: Some(card_number.into()),
            cardholder_name: Some(cardholder_name.into()),
            expiry_date: Some(expiry_date.into()),
            cvv: Some(cvv.into()),
        }
    }

    /// Read an input out of an arbitrary JSON body.
    ///
    /// Strings are taken as-is and numbers become their decimal text. `null`
    /// and missing keys are absent. Any other JSON type is kept as its JSON
    /// text so that the format rules reject it.
    pub fn from_json(body: &Value) -> Self {
        let field = |name: &str| match body.get(name) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(other) => Some(other.to_string()),
        };

        Self {
            card_number: field(CARD_NUMBER),
            cardholder_name: field(CARDHOLDER_NAME),
            expiry_date: field(EXPIRY_DATE),
            cvv: field(CVV),
        }
    }

    /// True when no field is present
    pub fn is_empty(&self) -> bool {
        self.card_number.is_none()
            && self.cardholder_name.is_none()
            && self.expiry_date.is_none()
            && self.cvv.is_none()
    }

    /// Convert a fully validated input into a new record.
    ///
    /// Returns `None` if any field is missing.
    pub fn into_record(self, id: String, now: DateTime<Utc>) -> Option<CardRecord> {
        Some(CardRecord {
            id,
            card_number: self.card_number?,
            cardholder_name: self.cardholder_name?,
            expiry_date: self.expiry_date?,
            cvv: self.cvv?,
            created_at: now,
            updated_at: now,
        })
    }
}

/// A persisted card entry. Holds the full card number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub id: String,
    pub card_number: String,
    pub cardholder_name: String,
    pub expiry_date: String,
    pub cvv: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CardRecord {
    /// Replace every field present in `patch` and refresh `updated_at`
    pub fn apply(&mut self, patch: &CardInput, updated_at: DateTime<Utc>) {
        if let Some(v) = &patch.card_number {
            self.card_number = v.clone();
        }
        if let Some(v) = &patch.cardholder_name {
            self.cardholder_name = v.clone();
        }
        if let Some(v) = &patch.expiry_date {
            self.expiry_date = v.clone();
        }
        if let Some(v) = &patch.cvv {
            self.cvv = v.clone();
        }
        self.updated_at = updated_at;
    }

    /// The outward representation of this record
    pub fn masked(&self) -> MaskedCard {
        MaskedCard {
            id: self.id.clone(),
            card_number: mask_card_number(&self.card_number),
            cardholder_name: self.cardholder_name.clone(),
            expiry_date: self.expiry_date.clone(),
            cvv: self.cvv.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A card as returned to callers, number redacted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskedCard {
    pub id: String,
    pub card_number: String,
    pub cardholder_name: String,
    pub expiry_date: String,
    pub cvv: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Confirmation returned by a successful delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedCard {
    pub id: String,
    pub deleted: bool,
}

impl DeletedCard {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            deleted: true,
        }
    }
}

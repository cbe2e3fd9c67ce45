//! Card validation shared by the server handlers and the HTTP client
//!
//! [`validate_card`] checks all four fields independently and reports one
//! message per failing field. It never stops at the first failing field.

pub mod normalize;
pub mod validators;

use crate::core::card::{CARD_NUMBER, CARDHOLDER_NAME, CVV, CardInput, EXPIRY_DATE};
use chrono::{Datelike, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Which fields must be present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completeness {
    /// Every field is required (create)
    Full,
    /// Absent fields are skipped, present ones are checked (update)
    Partial,
}

/// Outcome of validating a [`CardInput`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Field name (wire spelling) to message
    pub errors: BTreeMap<String, String>,
}

impl ValidationResult {
    fn from_errors(errors: BTreeMap<String, String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Message recorded for a field, if any
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }
}

/// Validate against the current UTC year
pub fn validate_card(input: &CardInput, completeness: Completeness) -> ValidationResult {
    validate_card_at(input, completeness, Utc::now().year())
}

/// Validate with an explicit current year
pub fn validate_card_at(
    input: &CardInput,
    completeness: Completeness,
    current_year: i32,
) -> ValidationResult {
    let mut errors = BTreeMap::new();

    let mut check = |field: &str,
                     value: &Option<String>,
                     required: &str,
                     rule: &dyn Fn(&str) -> Result<(), String>| {
        let outcome = match value.as_deref() {
            None if completeness == Completeness::Partial => Ok(()),
            None | Some("") => Err(required.to_string()),
            Some(v) => rule(v),
        };
        if let Err(message) = outcome {
            errors.insert(field.to_string(), message);
        }
    };

    check(
        CARD_NUMBER,
        &input.card_number,
        validators::CARD_NUMBER_REQUIRED,
        &validators::card_number,
    );
    check(
        CARDHOLDER_NAME,
        &input.cardholder_name,
        validators::NAME_REQUIRED,
        &validators::cardholder_name,
    );
    check(
        EXPIRY_DATE,
        &input.expiry_date,
        validators::EXPIRY_REQUIRED,
        &|v| validators::expiry_date(v, current_year),
    );
    check(CVV, &input.cvv, validators::CVV_REQUIRED, &validators::cvv);

    ValidationResult::from_errors(errors)
}

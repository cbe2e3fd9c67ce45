//! Shared test harness for card store backends
//!
//! Provides record/input builders plus two macro-generated suites:
//! `card_store_tests!` for the `CardStore` contract and
//! `rest_integration_tests!` for full HTTP round-trips over a store.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//!
//! card_store_tests!(InMemoryCardStore::new());
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod card_store_tests;
#[macro_use]
pub mod rest_tests;

use card_vault::core::{CardInput, CardRecord};
use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

pub const VISA: &str = "4111111111111111";
pub const MASKED_VISA: &str = "41**********1111";

/// Fixed instant so stored timestamps compare exactly (millisecond precision)
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
}

/// A complete record created `offset_secs` after [`base_time`]
pub fn record(name: &str, offset_secs: i64) -> CardRecord {
    let created_at = base_time() + Duration::seconds(offset_secs);
    CardRecord {
        id: Uuid::new_v4().to_string(),
        card_number: VISA.to_string(),
        cardholder_name: name.to_string(),
        expiry_date: "12/27".to_string(),
        cvv: "123".to_string(),
        created_at,
        updated_at: created_at,
    }
}

/// A valid create payload
pub fn valid_input(name: &str) -> CardInput {
    CardInput::new(VISA, name, "12/27", "123")
}

/// The same payload as wire JSON
pub fn valid_json(name: &str) -> serde_json::Value {
    serde_json::json!({
        "cardNumber": VISA,
        "cardholderName": name,
        "expiryDate": "12/27",
        "cvv": "123"
    })
}

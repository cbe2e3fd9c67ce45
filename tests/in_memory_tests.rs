//! Integration tests for InMemoryCardStore using the storage test harness.
//!
//! Invokes `card_store_tests!` and `rest_integration_tests!` to validate
//! that InMemoryCardStore conforms to the CardStore contract.

#[macro_use]
mod storage_harness;

use card_vault::core::CardStore;
use card_vault::storage::InMemoryCardStore;
use storage_harness::*;

card_store_tests!(InMemoryCardStore::new());
rest_integration_tests!(InMemoryCardStore::new());

/// Records inserted with identical timestamps still list newest first
#[tokio::test]
async fn test_same_timestamp_lists_by_insertion() {
    let store = InMemoryCardStore::new();
    let mut first = record("FIRST", 0);
    let mut second = record("SECOND", 0);
    first.created_at = base_time();
    second.created_at = base_time();

    store.insert(first).await.unwrap();
    store.insert(second).await.unwrap();

    let listed = store.list().await.unwrap();
    assert_eq!(listed[0].cardholder_name, "SECOND");
    assert_eq!(listed[1].cardholder_name, "FIRST");
}

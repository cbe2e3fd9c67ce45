//! Macro-generated test suite for `CardStore` contract validation.
//!
//! # Generated Tests
//!
//! - `test_insert_and_get` — insert then retrieve, all fields intact
//! - `test_get_nonexistent` — unknown id returns None
//! - `test_list_empty` — empty store lists nothing
//! - `test_list_newest_first` — ordering by creation time, descending
//! - `test_update_present_fields_only` — absent fields are kept
//! - `test_update_empty_patch_refreshes_timestamp`
//! - `test_update_nonexistent` — returns None
//! - `test_delete_existing` — then get returns None
//! - `test_delete_nonexistent` — returns false
//! - `test_concurrent_inserts` — parallel inserts from spawned tasks

/// Generate the `CardStore` conformance suite.
///
/// `$factory` is re-evaluated for each test. For the concurrent test the
/// store must also be `Clone + 'static`.
#[macro_export]
macro_rules! card_store_tests {
    ($factory:expr) => {
        mod card_store_contract_tests {
            use super::*;
            use card_vault::core::{CardInput, CardStore};
            use chrono::Duration;

            #[tokio::test]
            async fn test_insert_and_get() {
                let store = $factory;
                let card = record("ANA PEREZ", 0);

                let inserted = store.insert(card.clone()).await.unwrap();
                assert_eq!(inserted, card);

                let fetched = store.get(&card.id).await.unwrap().unwrap();
                assert_eq!(fetched, card);
                assert_eq!(fetched.card_number, VISA);
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let store = $factory;
                assert!(store.get("no-such-card").await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_list_empty() {
                let store = $factory;
                assert!(store.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_list_newest_first() {
                let store = $factory;
                let oldest = record("OLDEST", 0);
                let newest = record("NEWEST", 20);
                let middle = record("MIDDLE", 10);

                for card in [&oldest, &newest, &middle] {
                    store.insert(card.clone()).await.unwrap();
                }

                let names: Vec<String> = store
                    .list()
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|c| c.cardholder_name)
                    .collect();
                assert_eq!(names, vec!["NEWEST", "MIDDLE", "OLDEST"]);
            }

            #[tokio::test]
            async fn test_update_present_fields_only() {
                let store = $factory;
                let card = record("ANA PEREZ", 0);
                store.insert(card.clone()).await.unwrap();

                let patch = CardInput {
                    cvv: Some("9876".to_string()),
                    ..Default::default()
                };
                let later = base_time() + Duration::minutes(5);

                let updated = store.update(&card.id, &patch, later).await.unwrap().unwrap();
                assert_eq!(updated.cvv, "9876");
                assert_eq!(updated.cardholder_name, card.cardholder_name);
                assert_eq!(updated.card_number, card.card_number);
                assert_eq!(updated.expiry_date, card.expiry_date);
                assert_eq!(updated.created_at, card.created_at);
                assert_eq!(updated.updated_at, later);

                let fetched = store.get(&card.id).await.unwrap().unwrap();
                assert_eq!(fetched, updated);
            }

            #[tokio::test]
            async fn test_update_empty_patch_refreshes_timestamp() {
                let store = $factory;
                let card = record("ANA PEREZ", 0);
                store.insert(card.clone()).await.unwrap();

                let later = base_time() + Duration::hours(1);
                let updated = store
                    .update(&card.id, &CardInput::default(), later)
                    .await
                    .unwrap()
                    .unwrap();

                assert_eq!(updated.cvv, card.cvv);
                assert_eq!(updated.updated_at, later);
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let store = $factory;
                let result = store
                    .update("missing", &CardInput::default(), base_time())
                    .await
                    .unwrap();
                assert!(result.is_none());
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let store = $factory;
                let card = record("ANA PEREZ", 0);
                store.insert(card.clone()).await.unwrap();

                assert!(store.delete(&card.id).await.unwrap());
                assert!(store.get(&card.id).await.unwrap().is_none());
                assert!(store.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let store = $factory;
                assert!(!store.delete("missing").await.unwrap());
            }

            #[tokio::test]
            async fn test_concurrent_inserts() {
                let store = $factory;
                let mut handles = Vec::new();

                for i in 0..10 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store.insert(record("CONCURRENT", i)).await.unwrap()
                    }));
                }
                for handle in handles {
                    handle.await.unwrap();
                }

                assert_eq!(store.list().await.unwrap().len(), 10);
            }
        }
    };
}

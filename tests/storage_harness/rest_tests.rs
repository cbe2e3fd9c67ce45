//! REST integration test macro for card store backends.
//!
//! The `rest_integration_tests!` macro drives a store through the complete
//! HTTP stack: JSON → router → handler → CardService → store → JSON.
//!
//! # Generated Tests
//!
//! - `test_rest_create` — POST 201, masked envelope
//! - `test_rest_get_matches_create` — GET returns the same masked card
//! - `test_rest_list_newest_first` — GET / with count
//! - `test_rest_list_pagination` — page/limit slice and metadata
//! - `test_rest_list_search` — holder-name substring filter
//! - `test_rest_update_partial` — PUT keeps absent fields
//! - `test_rest_update_validation_before_lookup` — 400 wins over 404
//! - `test_rest_update_not_found`
//! - `test_rest_delete` — DELETE 200, then GET 404
//! - `test_rest_full_number_never_returned`

/// Generate a REST integration test suite for a card store.
///
/// `$store_factory` must produce an `impl CardStore + 'static`.
#[macro_export]
macro_rules! rest_integration_tests {
    ($store_factory:expr) => {
        mod rest_integration_tests {
            use super::*;
            use axum::http::StatusCode;
            use axum_test::TestServer;
            use card_vault::server::ServerBuilder;
            use serde_json::{Value, json};
            use std::time::Duration;

            async fn make_server() -> TestServer {
                let router = ServerBuilder::new()
                    .with_store($store_factory)
                    .build()
                    .unwrap();
                TestServer::try_new(router).unwrap()
            }

            /// Create a card and return its `data` object. Sleeps briefly so
            /// consecutive cards get distinct creation timestamps.
            async fn create(server: &TestServer, name: &str) -> Value {
                let response = server.post("/").json(&valid_json(name)).await;
                response.assert_status(StatusCode::CREATED);
                tokio::time::sleep(Duration::from_millis(5)).await;
                response.json::<Value>()["data"].clone()
            }

            #[tokio::test]
            async fn test_rest_create() {
                let server = make_server().await;

                let response = server.post("/").json(&valid_json("ANA PEREZ")).await;
                response.assert_status(StatusCode::CREATED);

                let body: Value = response.json();
                assert_eq!(body["message"], "Tarjeta creada exitosamente");
                let data = &body["data"];
                assert_eq!(data["cardNumber"], MASKED_VISA);
                assert_eq!(data["cardholderName"], "ANA PEREZ");
                assert_eq!(data["expiryDate"], "12/27");
                assert_eq!(data["cvv"], "123");
                assert_eq!(data["createdAt"], data["updatedAt"]);
                uuid::Uuid::parse_str(data["id"].as_str().unwrap()).unwrap();
            }

            #[tokio::test]
            async fn test_rest_get_matches_create() {
                let server = make_server().await;
                let created = create(&server, "ANA PEREZ").await;
                let id = created["id"].as_str().unwrap();

                let response = server.get(&format!("/{id}")).await;
                response.assert_status_ok();

                let body: Value = response.json();
                assert_eq!(body["message"], "Tarjeta obtenida exitosamente");
                assert_eq!(body["data"], created);
            }

            #[tokio::test]
            async fn test_rest_list_newest_first() {
                let server = make_server().await;
                create(&server, "PRIMERO").await;
                create(&server, "SEGUNDO").await;
                create(&server, "TERCERO").await;

                let response = server.get("/").await;
                response.assert_status_ok();

                let body: Value = response.json();
                assert_eq!(body["message"], "Tarjetas obtenidas exitosamente");
                assert_eq!(body["count"], 3);
                assert!(body.get("pagination").is_none());

                let names: Vec<&str> = body["data"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|c| c["cardholderName"].as_str().unwrap())
                    .collect();
                assert_eq!(names, vec!["TERCERO", "SEGUNDO", "PRIMERO"]);
            }

            #[tokio::test]
            async fn test_rest_list_pagination() {
                let server = make_server().await;
                for name in ["A", "B", "C", "D", "E", "F", "G", "H"] {
                    create(&server, name).await;
                }

                let response = server.get("/?page=2&limit=6").await;
                response.assert_status_ok();

                let body: Value = response.json();
                assert_eq!(body["count"], 2);
                assert_eq!(body["data"][0]["cardholderName"], "B");
                assert_eq!(body["data"][1]["cardholderName"], "A");
                assert_eq!(
                    body["pagination"],
                    json!({
                        "page": 2,
                        "limit": 6,
                        "total": 8,
                        "totalPages": 2,
                        "hasNext": false,
                        "hasPrev": true
                    })
                );
            }

            #[tokio::test]
            async fn test_rest_list_search() {
                let server = make_server().await;
                create(&server, "ANA PEREZ").await;
                create(&server, "LUIS GOMEZ").await;
                create(&server, "MARIANA RUIZ").await;

                let body: Value = server.get("/?search=ana").await.json();
                assert_eq!(body["count"], 2);
                assert_eq!(body["data"][0]["cardholderName"], "MARIANA RUIZ");
                assert_eq!(body["data"][1]["cardholderName"], "ANA PEREZ");

                let body: Value = server.get("/?search=zzz").await.json();
                assert_eq!(body["count"], 0);
            }

            #[tokio::test]
            async fn test_rest_update_partial() {
                let server = make_server().await;
                let created = create(&server, "ANA PEREZ").await;
                let id = created["id"].as_str().unwrap();

                let response = server
                    .put(&format!("/{id}"))
                    .json(&json!({ "cardholderName": "ANA MARIA" }))
                    .await;
                response.assert_status_ok();

                let body: Value = response.json();
                assert_eq!(body["message"], "Tarjeta actualizada exitosamente");
                assert_eq!(body["data"]["cardholderName"], "ANA MARIA");
                assert_eq!(body["data"]["cardNumber"], MASKED_VISA);
                assert_eq!(body["data"]["cvv"], "123");
                assert_eq!(body["data"]["createdAt"], created["createdAt"]);
                assert_ne!(body["data"]["updatedAt"], created["updatedAt"]);
            }

            #[tokio::test]
            async fn test_rest_update_validation_before_lookup() {
                let server = make_server().await;

                let response = server
                    .put("/does-not-exist")
                    .json(&json!({ "cvv": "12" }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);

                let body: Value = response.json();
                assert_eq!(body["error"], "Validación fallida");
                assert_eq!(body["details"]["cvv"], "El CVV debe tener 3 o 4 dígitos");
            }

            #[tokio::test]
            async fn test_rest_update_not_found() {
                let server = make_server().await;

                let response = server
                    .put("/does-not-exist")
                    .json(&json!({ "cvv": "1234" }))
                    .await;
                response.assert_status_not_found();

                let body: Value = response.json();
                assert_eq!(body["error"], "Tarjeta no encontrada");
                assert_eq!(
                    body["message"],
                    "No se encontró una tarjeta con el ID: does-not-exist"
                );
            }

            #[tokio::test]
            async fn test_rest_delete() {
                let server = make_server().await;
                let created = create(&server, "ANA PEREZ").await;
                let id = created["id"].as_str().unwrap();

                let response = server.delete(&format!("/{id}")).await;
                response.assert_status_ok();

                let body: Value = response.json();
                assert_eq!(body["message"], "Tarjeta eliminada exitosamente");
                assert_eq!(body["data"], json!({ "id": id, "deleted": true }));

                server.get(&format!("/{id}")).await.assert_status_not_found();
                server.delete(&format!("/{id}")).await.assert_status_not_found();
            }

            #[tokio::test]
            async fn test_rest_full_number_never_returned() {
                let server = make_server().await;
                let created = create(&server, "ANA PEREZ").await;
                let id = created["id"].as_str().unwrap();

                let responses = [
                    server.get("/").await.text(),
                    server.get(&format!("/{id}")).await.text(),
                    server
                        .put(&format!("/{id}"))
                        .json(&json!({ "cvv": "999" }))
                        .await
                        .text(),
                ];
                for text in responses {
                    assert!(!text.contains(VISA), "full card number leaked: {text}");
                }
            }
        }
    };
}

//! # card-vault
//!
//! A small REST service that stores payment-card records and never returns a
//! card number in full.
//!
//! ## Features
//!
//! - **Validation**: field-keyed Spanish messages for card number, holder
//!   name, expiry date and CVV
//! - **Masking**: every card leaving the server is masked to `41**********1111`
//! - **Pluggable storage**: in-memory store, or MongoDB behind the
//!   `mongodb_backend` feature
//! - **Search and pagination** on the card list
//! - **Typed client** behind the `client` feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use card_vault::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     ServerBuilder::new()
//!         .with_store(InMemoryCardStore::new())
//!         .with_base_path("/cards")
//!         .serve("127.0.0.1:3000")
//!         .await
//! }
//! ```

#[cfg(feature = "client")]
pub mod client;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    pub use crate::core::{
        ApiResponse, CardError, CardInput, CardPage, CardRecord, CardService, CardStore,
        Completeness, DeletedCard, ErrorResponse, ListQuery, MaskedCard, PaginationMeta,
        ValidationResult, mask_card_number, validate_card,
    };

    pub use crate::config::{AppConfig, StorageBackend};
    pub use crate::server::{AppState, ServerBuilder, build_card_routes};
    pub use crate::storage::InMemoryCardStore;

    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoCardStore;

    #[cfg(feature = "client")]
    pub use crate::client::{CardClient, CardList, ClientError};

    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
}

//! card-vault server binary
//!
//! Reads `card-vault.yaml` (or the file named by `CARD_VAULT_CONFIG`),
//! opens the configured store and serves until Ctrl+C or SIGTERM.

use anyhow::Result;
use card_vault::config::{AppConfig, StorageBackend};
use card_vault::core::CardStore;
use card_vault::server::ServerBuilder;
use card_vault::storage::InMemoryCardStore;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))?;
    fmt().with_env_filter(filter).init();

    let store = open_store(&config).await?;
    tracing::info!(
        backend = ?config.storage.backend,
        base_path = %config.server.base_path,
        "starting card-vault"
    );

    ServerBuilder::new()
        .with_store_arc(store)
        .with_base_path(config.server.base_path.clone())
        .serve(&config.server.addr())
        .await
}

async fn open_store(config: &AppConfig) -> Result<Arc<dyn CardStore>> {
    match config.storage.backend {
        StorageBackend::InMemory => Ok(Arc::new(InMemoryCardStore::new())),
        #[cfg(feature = "mongodb_backend")]
        StorageBackend::Mongodb => {
            let store = card_vault::storage::MongoCardStore::connect(
                &config.storage.uri,
                &config.storage.database,
                &config.storage.collection,
            )
            .await?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "mongodb_backend"))]
        StorageBackend::Mongodb => {
            anyhow::bail!("storage backend 'mongodb' requires the mongodb_backend feature")
        }
    }
}

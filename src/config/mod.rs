//! Configuration loading and management
//!
//! Configuration comes from a YAML file; every key is optional.
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 8080
//!   base_path: /cards
//! storage:
//!   backend: mongodb
//!   uri: mongodb://localhost:27017
//!   database: card_vault
//!   collection: cards
//! logging:
//!   filter: card_vault=debug,tower_http=info
//! ```

use crate::server::builder::normalize_base_path;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Env var naming the YAML file to load
pub const CONFIG_PATH_ENV: &str = "CARD_VAULT_CONFIG";
pub const HOST_ENV: &str = "CARD_VAULT_HOST";
pub const PORT_ENV: &str = "CARD_VAULT_PORT";
pub const DEFAULT_CONFIG_PATH: &str = "card-vault.yaml";
pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Prefix the card routes are mounted under
    pub base_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            base_path: "/".to_string(),
        }
    }
}

impl ServerConfig {
    /// `host:port`, ready for binding
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    InMemory,
    Mongodb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Connection string, only read by the mongodb backend
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::InMemory,
            uri: DEFAULT_MONGODB_URI.to_string(),
            database: "card_vault".to_string(),
            collection: "cards".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // An empty document deserializes as null
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `CARD_VAULT_CONFIG` (or `card-vault.yaml`), then apply env
    /// overrides. A missing default file yields the defaults; a missing file
    /// named explicitly is an error.
    pub fn load() -> Result<Self> {
        let explicit = std::env::var(CONFIG_PATH_ENV).ok();
        let path = explicit.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        let mut config = if explicit.is_some() || Path::new(path).exists() {
            Self::from_yaml_file(path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides(
            std::env::var(HOST_ENV).ok(),
            std::env::var(PORT_ENV).ok(),
        )?;
        Ok(config)
    }

    /// Override host and port with values read from the environment
    pub fn apply_env_overrides(&mut self, host: Option<String>, port: Option<String>) -> Result<()> {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port
                .parse()
                .with_context(|| format!("{PORT_ENV} must be a port number, got '{port}'"))?;
        }
        Ok(())
    }

    /// Check the values serde cannot check
    pub fn validate(&self) -> Result<()> {
        normalize_base_path(&self.server.base_path)?;

        if self.storage.backend == StorageBackend::Mongodb {
            if !cfg!(feature = "mongodb_backend") {
                bail!("storage backend 'mongodb' requires the mongodb_backend feature");
            }
            if self.storage.uri.trim().is_empty() {
                bail!("storage backend 'mongodb' requires a non-empty storage.uri");
            }
        }
        Ok(())
    }
}

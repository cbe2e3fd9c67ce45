//! ServerBuilder for fluent API to build the card HTTP server

use super::handlers::AppState;
use super::router::{build_card_routes, mount};
use crate::core::service::CardService;
use crate::core::store::CardStore;
use anyhow::{Result, anyhow, bail};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the card server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryCardStore::new())
///     .with_base_path("/cards")
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn CardStore>>,
    base_path: String,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder mounted at `/`
    pub fn new() -> Self {
        Self {
            store: None,
            base_path: "/".to_string(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the card store (required)
    pub fn with_store(mut self, store: impl CardStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set an already shared card store
    pub fn with_store_arc(mut self, store: Arc<dyn CardStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Mount the card routes under a prefix such as `/cards`
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Add routes outside the card table, merged at the root
    ///
    /// Custom routes must not define their own fallback.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the router with tracing and CORS layers applied
    pub fn build(self) -> Result<Router> {
        let store = self
            .store
            .ok_or_else(|| anyhow!("a card store is required, call with_store()"))?;
        let base_path = normalize_base_path(&self.base_path)?;

        let state = AppState {
            service: CardService::new(store),
        };

        let mut app = mount(build_card_routes(state), &base_path);
        for routes in self.custom_routes {
            app = app.merge(routes);
        }

        Ok(app
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new()
    ///     .with_store(InMemoryCardStore::new())
    ///     .serve("127.0.0.1:3000").await?;
    /// ```
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `""`, `"/"` become `/`; `cards/` becomes `/cards`.
pub fn normalize_base_path(path: &str) -> Result<String> {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        return Ok("/".to_string());
    }

    if trimmed
        .split('/')
        .any(|segment| segment.is_empty() || segment.contains(['{', '}', '*']))
    {
        bail!("invalid base path '{path}'");
    }

    Ok(format!("/{trimmed}"))
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

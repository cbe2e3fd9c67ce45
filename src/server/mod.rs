//! HTTP server for the card API
//!
//! `ServerBuilder` wires a [`CardStore`](crate::core::CardStore) into the
//! card routes, the health check and the tracing/CORS layers.

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
pub use router::build_card_routes;

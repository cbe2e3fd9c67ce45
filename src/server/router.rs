//! Card route table
//!
//! | method | path   | handler     |
//! |--------|--------|-------------|
//! | POST   | `/`    | create      |
//! | GET    | `/`    | list        |
//! | GET    | `/{id}`| get         |
//! | PUT    | `/{id}`| update      |
//! | DELETE | `/{id}`| delete      |
//!
//! Every other method/path combination answers "route not found". Empty path
//! segments are dropped before dispatch, so `/{id}/` and `//{id}` reach the
//! same handler as `/{id}`.

use crate::server::handlers::{
    AppState, create_card, delete_card, get_card, health_check, list_cards, route_not_found,
    update_card,
};
use axum::Router;
use axum::extract::Request;
use axum::http::Uri;
use axum::routing::get;
use tower::Layer;
use tower::util::MapRequestLayer;

/// Build the card routes, relative to wherever they are mounted
pub fn build_card_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_cards).post(create_card))
        .route(
            "/{id}",
            get(get_card).put(update_card).delete(delete_card),
        )
        .method_not_allowed_fallback(route_not_found)
        .fallback(route_not_found)
        .with_state(state)
}

/// Build the liveness check route
pub fn build_health_routes() -> Router {
    Router::new().route("/healthz", get(health_check))
}

/// Mount card routes under `base_path` next to the health route.
///
/// `base_path` must already be normalized: `/` or `/segment[/segment...]`
/// without a trailing slash.
pub fn mount(card_routes: Router, base_path: &str) -> Router {
    let app = if base_path == "/" {
        card_routes
    } else {
        Router::new().nest(base_path, card_routes)
    };

    let app = app.merge(build_health_routes()).fallback(route_not_found);

    // Routing happens inside the wrapped router, after the path is rewritten;
    // the outer router records the untouched `OriginalUri` for error messages.
    Router::new().fallback_service(MapRequestLayer::new(collapse_empty_segments).layer(app))
}

/// Rewrite `/a//b/` to `/a/b`, keeping the query string
fn collapse_empty_segments(mut req: Request) -> Request {
    let path = req.uri().path();
    if !path.contains("//") && (path == "/" || !path.ends_with('/')) {
        return req;
    }

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let path_and_query = match req.uri().query() {
        Some(query) => format!("/{}?{}", segments.join("/"), query),
        None => format!("/{}", segments.join("/")),
    };

    let mut parts = req.uri().clone().into_parts();
    let Ok(path_and_query) = path_and_query.parse() else {
        return req;
    };
    parts.path_and_query = Some(path_and_query);
    if let Ok(uri) = Uri::from_parts(parts) {
        *req.uri_mut() = uri;
    }
    req
}

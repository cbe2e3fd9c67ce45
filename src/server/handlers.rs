//! HTTP handlers for card operations
//!
//! Handlers are thin: they extract the request, call [`CardService`] and wrap
//! the result in the success envelope. Every failure is a [`CardError`].

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, OriginalUri, Path, Query, Request, State, rejection::QueryRejection},
    http::{Method, StatusCode},
};
use serde_json::{Value, json};

use crate::core::card::{CardInput, DeletedCard, MaskedCard};
use crate::core::error::CardError;
use crate::core::query::ListQuery;
use crate::core::response::{
    ApiResponse, CARD_CREATED, CARD_DELETED, CARD_FETCHED, CARD_UPDATED, CARDS_LISTED,
};
use crate::core::service::CardService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: CardService,
}

/// Card fields read from a JSON request body
///
/// An empty body is read as `{}` so that it fails validation field by field
/// rather than as malformed JSON. The `Content-Type` header is not required.
pub struct CardBody(pub CardInput);

impl<S> FromRequest<S> for CardBody
where
    S: Send + Sync,
{
    type Rejection = CardError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| CardError::InvalidJson {
                message: e.body_text(),
            })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(CardBody(CardInput::default()));
        }

        let value: Value = serde_json::from_slice(&bytes).map_err(|e| CardError::InvalidJson {
            message: e.to_string(),
        })?;

        Ok(CardBody(CardInput::from_json(&value)))
    }
}

type CardResponse<T> = Result<(StatusCode, Json<ApiResponse<T>>), CardError>;

/// POST / — create a card
pub async fn create_card(
    State(state): State<AppState>,
    CardBody(input): CardBody,
) -> CardResponse<MaskedCard> {
    let card = state.service.create(input).await.inspect_err(log_rejection)?;
    tracing::info!(id = %card.id, "card created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(CARD_CREATED, card)),
    ))
}

/// GET / — list cards, newest first
pub async fn list_cards(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> CardResponse<Vec<MaskedCard>> {
    let Query(query) = query.map_err(|e| CardError::InvalidQuery {
        message: e.body_text(),
    })?;

    let page = state.service.list(&query).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::list(CARDS_LISTED, page.cards, page.pagination)),
    ))
}

/// GET /{id} — fetch one card
pub async fn get_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CardResponse<MaskedCard> {
    let card = state
        .service
        .get(&id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok((StatusCode::OK, Json(ApiResponse::new(CARD_FETCHED, card))))
}

/// PUT /{id} — replace the fields present in the body
pub async fn update_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CardBody(patch): CardBody,
) -> CardResponse<MaskedCard> {
    let card = state
        .service
        .update(&id, patch)
        .await
        .inspect_err(log_rejection)?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id = %card.id, "card updated");

    Ok((StatusCode::OK, Json(ApiResponse::new(CARD_UPDATED, card))))
}

/// DELETE /{id} — remove a card
pub async fn delete_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> CardResponse<DeletedCard> {
    let deleted = state
        .service
        .delete(&id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id = %deleted.id, "card deleted");

    Ok((StatusCode::OK, Json(ApiResponse::new(CARD_DELETED, deleted))))
}

/// Any method/path combination outside the dispatch table
pub async fn route_not_found(method: Method, OriginalUri(uri): OriginalUri) -> CardError {
    tracing::warn!(%method, path = uri.path(), "route not found");
    CardError::RouteNotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

/// GET /healthz
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME")
    }))
}

fn not_found(id: String) -> CardError {
    tracing::warn!(%id, "card not found");
    CardError::NotFound { id }
}

fn log_rejection(err: &CardError) {
    if let CardError::Validation { errors } = err {
        tracing::warn!(fields = ?errors.keys().collect::<Vec<_>>(), "card rejected by validation");
    }
}

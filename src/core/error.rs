//! Typed errors for the card HTTP surface
//!
//! Store and library code returns `anyhow::Result`. Handlers convert failures
//! into [`CardError`], which knows its HTTP status and renders the JSON body
//! callers receive.
//!
//! # Example
//!
//! ```rust,ignore
//! async fn get_card(id: String) -> Result<MaskedCard, CardError> {
//!     service.get(&id).await?.ok_or(CardError::NotFound { id })
//! }
//! ```

use crate::core::validation::ValidationResult;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const VALIDATION_FAILED: &str = "Validación fallida";
pub const CARD_NOT_FOUND: &str = "Tarjeta no encontrada";
pub const ROUTE_NOT_FOUND: &str = "Ruta no encontrada";
pub const INVALID_JSON: &str = "JSON inválido";
pub const INVALID_QUERY: &str = "Parámetros de consulta inválidos";
pub const INTERNAL_ERROR: &str = "Error interno del servidor";

/// Every failure a card request can end in
#[derive(Debug, thiserror::Error)]
pub enum CardError {
    /// One or more fields broke a validation rule
    #[error("Validación fallida")]
    Validation { errors: BTreeMap<String, String> },

    /// No card with this id
    #[error("No se encontró una tarjeta con el ID: {id}")]
    NotFound { id: String },

    /// No handler for this method and path
    #[error("La ruta {path} con método {method} no existe")]
    RouteNotFound { method: String, path: String },

    /// Body was not valid JSON
    #[error("{message}")]
    InvalidJson { message: String },

    /// Query string could not be parsed
    #[error("{message}")]
    InvalidQuery { message: String },

    /// Store or other unexpected failure; the message is passed through
    #[error("{0}")]
    Internal(String),
}

/// Error body as serialized on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short error title
    pub error: String,
    /// Human-readable detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Field-keyed validation messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, String>>,
}

impl CardError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CardError::Validation { .. } => StatusCode::BAD_REQUEST,
            CardError::NotFound { .. } => StatusCode::NOT_FOUND,
            CardError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            CardError::InvalidJson { .. } => StatusCode::BAD_REQUEST,
            CardError::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            CardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short title used in the `error` field
    pub fn title(&self) -> &'static str {
        match self {
            CardError::Validation { .. } => VALIDATION_FAILED,
            CardError::NotFound { .. } => CARD_NOT_FOUND,
            CardError::RouteNotFound { .. } => ROUTE_NOT_FOUND,
            CardError::InvalidJson { .. } => INVALID_JSON,
            CardError::InvalidQuery { .. } => INVALID_QUERY,
            CardError::Internal(_) => INTERNAL_ERROR,
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        match self {
            CardError::Validation { errors } => ErrorResponse {
                error: self.title().to_string(),
                message: None,
                details: Some(errors.clone()),
            },
            _ => ErrorResponse {
                error: self.title().to_string(),
                message: Some(self.to_string()),
                details: None,
            },
        }
    }
}

impl From<ValidationResult> for CardError {
    fn from(result: ValidationResult) -> Self {
        CardError::Validation {
            errors: result.errors,
        }
    }
}

impl From<anyhow::Error> for CardError {
    fn from(err: anyhow::Error) -> Self {
        CardError::Internal(err.to_string())
    }
}

impl IntoResponse for CardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let CardError::Internal(message) = &self {
            tracing::error!(error = %message, "card request failed");
        }
        (status, Json(self.to_response())).into_response()
    }
}

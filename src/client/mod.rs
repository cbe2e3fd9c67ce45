//! Typed HTTP client for the card API
//!
//! The client normalizes and validates input with the same rules the server
//! applies, so obviously bad cards never leave the process.
//!
//! ```rust,ignore
//! let client = CardClient::new("http://127.0.0.1:3000");
//! let card = client
//!     .create(&CardInput::new("4111 1111 1111 1111", "ana perez", "12/27", "123"))
//!     .await?;
//! assert_eq!(card.card_number, "41**********1111");
//! ```

use crate::core::card::{CardInput, DeletedCard, MaskedCard};
use crate::core::error::{CARD_NOT_FOUND, ErrorResponse};
use crate::core::query::{ListQuery, PaginationMeta};
use crate::core::response::ApiResponse;
use crate::core::validation::{Completeness, validate_card};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// Client errors
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Rejected by validation, locally or by the server
    #[error("validation failed: {}", describe(.errors))]
    Validation { errors: BTreeMap<String, String> },

    /// 404 that was not about a missing card
    #[error("not found: {message}")]
    NotFound { message: String },

    /// Any other non-success answer
    #[error("api error {status}: {error}")]
    Api {
        status: StatusCode,
        error: String,
        message: Option<String>,
    },

    /// `base_url` cannot take an id segment
    #[error("invalid base url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Transport or decoding failure
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

fn describe(errors: &BTreeMap<String, String>) -> String {
    errors
        .iter()
        .map(|(field, msg)| format!("{field}: {msg}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub type ClientResult<T> = Result<T, ClientError>;

/// A page of cards as returned by `GET /`
#[derive(Debug, Clone, PartialEq)]
pub struct CardList {
    pub cards: Vec<MaskedCard>,
    pub pagination: Option<PaginationMeta>,
}

/// HTTP client bound to one server base URL
#[derive(Debug, Clone)]
pub struct CardClient {
    http: reqwest::Client,
    base_url: String,
}

impl CardClient {
    /// `base_url` includes the mount prefix, e.g. `http://host:3000/cards`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a card after normalizing and validating it locally
    pub async fn create(&self, input: &CardInput) -> ClientResult<MaskedCard> {
        let input = checked(input, Completeness::Full)?;
        let response = self
            .send(Method::POST, &self.collection_url(), Some(&input), None)
            .await?;
        Ok(decode::<MaskedCard>(response).await?.data)
    }

    /// All cards, newest first
    pub async fn list(&self) -> ClientResult<Vec<MaskedCard>> {
        Ok(self.list_with(&ListQuery::default()).await?.cards)
    }

    /// Filtered and/or paginated listing
    pub async fn list_with(&self, query: &ListQuery) -> ClientResult<CardList> {
        let response = self
            .send::<()>(Method::GET, &self.collection_url(), None, Some(query))
            .await?;
        let body = decode::<Vec<MaskedCard>>(response).await?;
        Ok(CardList {
            cards: body.data,
            pagination: body.pagination,
        })
    }

    pub async fn get(&self, id: &str) -> ClientResult<Option<MaskedCard>> {
        let response = self
            .send::<()>(Method::GET, &self.item_url(id)?, None, None)
            .await;
        match optional(response)? {
            Some(response) => Ok(Some(decode::<MaskedCard>(response).await?.data)),
            None => Ok(None),
        }
    }

    /// Update the fields present in `patch`
    pub async fn update(&self, id: &str, patch: &CardInput) -> ClientResult<Option<MaskedCard>> {
        let patch = checked(patch, Completeness::Partial)?;
        let response = self
            .send(Method::PUT, &self.item_url(id)?, Some(&patch), None)
            .await;
        match optional(response)? {
            Some(response) => Ok(Some(decode::<MaskedCard>(response).await?.data)),
            None => Ok(None),
        }
    }

    pub async fn delete(&self, id: &str) -> ClientResult<Option<DeletedCard>> {
        let response = self
            .send::<()>(Method::DELETE, &self.item_url(id)?, None, None)
            .await;
        match optional(response)? {
            Some(response) => Ok(Some(decode::<DeletedCard>(response).await?.data)),
            None => Ok(None),
        }
    }

    /// No trailing slash: a nested mount matches `/cards`, not `/cards/`
    fn collection_url(&self) -> String {
        self.base_url.clone()
    }

    /// The id is percent-encoded as a single path segment
    fn item_url(&self, id: &str) -> ClientResult<String> {
        let invalid = |reason: String| ClientError::InvalidUrl {
            url: self.base_url.clone(),
            reason,
        };
        let mut url = reqwest::Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("not a hierarchical url".to_string()))?
            .pop_if_empty()
            .push(id);
        Ok(url.to_string())
    }

    /// Issue one request; every non-2xx status becomes an error here
    async fn send<B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        query: Option<&ListQuery>,
    ) -> ClientResult<reqwest::Response> {
        let mut request = self.http.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(query) = query {
            request = request.query(query);
        }

        tracing::debug!(%method, url, "card api request");
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: ErrorResponse = response.json().await?;
        tracing::debug!(%status, error = %body.error, "card api error");
        Err(match (status, body) {
            (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    details: Some(errors),
                    ..
                },
            ) => ClientError::Validation { errors },
            (StatusCode::NOT_FOUND, body) => ClientError::NotFound {
                message: if body.error == CARD_NOT_FOUND {
                    CARD_NOT_FOUND.to_string()
                } else {
                    body.message.unwrap_or(body.error)
                },
            },
            (status, body) => ClientError::Api {
                status,
                error: body.error,
                message: body.message,
            },
        })
    }
}

/// Normalize then validate; nothing is sent when this fails
fn checked(input: &CardInput, completeness: Completeness) -> ClientResult<CardInput> {
    let input = input.normalized();
    let result = validate_card(&input, completeness);
    if !result.is_valid {
        return Err(ClientError::Validation {
            errors: result.errors,
        });
    }
    Ok(input)
}

/// A missing card is `None`; a missing route stays an error
fn optional(response: ClientResult<reqwest::Response>) -> ClientResult<Option<reqwest::Response>> {
    match response {
        Ok(response) => Ok(Some(response)),
        Err(ClientError::NotFound { message }) if message == CARD_NOT_FOUND => Ok(None),
        Err(e) => Err(e),
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<ApiResponse<T>> {
    Ok(response.json::<ApiResponse<T>>().await?)
}

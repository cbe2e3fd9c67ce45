//! Success envelope shared by the server and the client

use crate::core::query::PaginationMeta;
use serde::{Deserialize, Serialize};

pub const CARD_CREATED: &str = "Tarjeta creada exitosamente";
pub const CARDS_LISTED: &str = "Tarjetas obtenidas exitosamente";
pub const CARD_FETCHED: &str = "Tarjeta obtenida exitosamente";
pub const CARD_UPDATED: &str = "Tarjeta actualizada exitosamente";
pub const CARD_DELETED: &str = "Tarjeta eliminada exitosamente";

/// `{ message, data, count?, pagination? }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

impl<T> ApiResponse<T> {
    pub fn new(message: &str, data: T) -> Self {
        Self {
            message: message.to_string(),
            data,
            count: None,
            pagination: None,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// A list envelope; `count` is the number of items in `data`
    pub fn list(message: &str, data: Vec<T>, pagination: Option<PaginationMeta>) -> Self {
        Self {
            message: message.to_string(),
            count: Some(data.len()),
            data,
            pagination,
        }
    }
}

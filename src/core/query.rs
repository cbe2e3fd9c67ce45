//! List query parameters: holder-name search and pagination

use crate::core::card::MaskedCard;
use serde::{Deserialize, Serialize};

/// Default page size, matching the card list view
pub const DEFAULT_LIMIT: usize = 6;

/// Upper bound on page size
pub const MAX_LIMIT: usize = 100;

/// Query parameters accepted by `GET /`
///
/// # Example
/// ```text
/// GET /?search=ana
/// GET /?page=2&limit=6
/// GET /?search=perez&page=1
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring of the holder name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Page number (starts at 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,

    /// Items per page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl ListQuery {
    /// Whether the caller asked for a page rather than the whole list
    pub fn is_paginated(&self) -> bool {
        self.page.is_some() || self.limit.is_some()
    }

    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    /// Get limit, clamped to `1..=MAX_LIMIT`
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// The search term, if non-empty, lower-cased. Whitespace is kept and
    /// matched like any other character.
    fn needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// Index of the first item on the requested page
    fn offset(&self) -> usize {
        (self.page() - 1).saturating_mul(self.limit())
    }

    /// Filter then slice an already-ordered list of cards
    pub fn apply(&self, cards: Vec<MaskedCard>) -> CardPage {
        let cards: Vec<MaskedCard> = match self.needle() {
            Some(needle) => cards
                .into_iter()
                .filter(|c| c.cardholder_name.to_lowercase().contains(&needle))
                .collect(),
            None => cards,
        };

        if !self.is_paginated() {
            return CardPage {
                cards,
                pagination: None,
            };
        }

        let page = self.page();
        let limit = self.limit();
        let total = cards.len();

        let cards = cards
            .into_iter()
            .skip(self.offset())
            .take(limit)
            .collect();

        CardPage {
            cards,
            pagination: Some(PaginationMeta::new(page, limit, total)),
        }
    }
}

/// A filtered, possibly paginated slice of cards
#[derive(Debug, Clone)]
pub struct CardPage {
    pub cards: Vec<MaskedCard>,
    pub pagination: Option<PaginationMeta>,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after search)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let limit = limit.max(1);
        let page = page.max(1);
        let total_pages = total.div_ceil(limit);
        let start = (page - 1).saturating_mul(limit);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: start.saturating_add(limit) < total,
            has_prev: page > 1,
        }
    }
}

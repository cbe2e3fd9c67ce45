//! Core module: card types, validation, masking and the store adapter

pub mod card;
pub mod error;
pub mod mask;
pub mod query;
pub mod response;
pub mod service;
pub mod store;
pub mod validation;

pub use card::{CardInput, CardRecord, DeletedCard, MaskedCard};
pub use error::{CardError, ErrorResponse};
pub use mask::mask_card_number;
pub use query::{CardPage, ListQuery, PaginationMeta};
pub use response::ApiResponse;
pub use service::CardService;
pub use store::CardStore;
pub use validation::{Completeness, ValidationResult, validate_card, validate_card_at};

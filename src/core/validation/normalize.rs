//! Input normalization applied before validation on the client side
//!
//! The server stores what it receives; these transforms are the conventions
//! a well-behaved caller follows (upper-case holder names, `MM/YY` expiry).

use crate::core::card::CardInput;

/// Trim the ends and upper-case
pub fn holder_name(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Reformat typed expiry digits as `MM/YY`.
///
/// Non-digits are dropped and at most four digits are kept. A `/` is inserted
/// after the month once a third digit is present.
pub fn expiry(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).take(4).collect();
    if digits.len() >= 3 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    }
}

/// Drop spaces and dashes
pub fn digits(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

impl CardInput {
    /// Apply the caller-side conventions to every present field
    pub fn normalized(&self) -> Self {
        Self {
            card_number: self.card_number.as_deref().map(digits),
            cardholder_name: self.cardholder_name.as_deref().map(holder_name),
            expiry_date: self.expiry_date.as_deref().map(expiry),
            cvv: self.cvv.as_deref().map(digits),
        }
    }
}

//! Per-field card validators
//!
//! Each validator checks one already-present, non-empty value and returns the
//! message for the first rule it breaks. Presence is handled by the caller
//! (see [`super::validate_card_at`]).

use regex::Regex;
use std::sync::OnceLock;

/// Maximum holder name length, in characters
pub const MAX_NAME_LEN: usize = 20;

/// Earliest accepted two-digit expiry year
pub const MIN_EXPIRY_YEAR: u32 = 22;

/// How many years past the current one an expiry may lie
pub const EXPIRY_YEARS_AHEAD: u32 = 5;

pub const CARD_NUMBER_REQUIRED: &str = "El número de tarjeta es requerido";
pub const CARD_NUMBER_FORMAT: &str = "El número de tarjeta debe tener 16 dígitos";
pub const NAME_REQUIRED: &str = "El nombre del titular es requerido";
pub const NAME_CHARACTERS: &str = "El nombre solo puede contener letras";
pub const NAME_TOO_LONG: &str = "El nombre no puede exceder 20 caracteres";
pub const EXPIRY_REQUIRED: &str = "La fecha de vencimiento es requerida";
pub const EXPIRY_FORMAT: &str = "La fecha debe tener formato MM/YY";
pub const EXPIRY_MONTH: &str = "Mes inválido (01-12)";
pub const CVV_REQUIRED: &str = "El CVV es requerido";
pub const CVV_FORMAT: &str = "El CVV debe tener 3 o 4 dígitos";

/// Message for an expiry year outside `[22, max_year]`
pub fn expiry_year_message(max_year: u32) -> String {
    format!("Año inválido ({MIN_EXPIRY_YEAR}-{max_year})")
}

fn card_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{16}$").expect("valid card number regex"))
}

fn name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^[a-záéíóúñü\s]+$").expect("valid holder name regex"))
}

fn expiry_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(0[1-9]|1[0-2])/([0-9]{2})$").expect("valid expiry regex"))
}

fn cvv_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{3,4}$").expect("valid cvv regex"))
}

/// Exactly 16 ASCII digits
pub fn card_number(value: &str) -> Result<(), String> {
    if card_number_regex().is_match(value) {
        Ok(())
    } else {
        Err(CARD_NUMBER_FORMAT.to_string())
    }
}

/// Letters (including common Spanish accents) and whitespace, at most 20 characters
pub fn cardholder_name(value: &str) -> Result<(), String> {
    if !name_regex().is_match(value) {
        return Err(NAME_CHARACTERS.to_string());
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err(NAME_TOO_LONG.to_string());
    }
    Ok(())
}

/// `MM/YY` with month 01-12 and year in `[22, current_year % 100 + 5]`
pub fn expiry_date(value: &str, current_year: i32) -> Result<(), String> {
    let caps = expiry_regex()
        .captures(value)
        .ok_or_else(|| EXPIRY_FORMAT.to_string())?;

    // Both groups are two ASCII digits, so parsing cannot fail.
    let month: u32 = caps[1].parse().unwrap_or(0);
    let year: u32 = caps[2].parse().unwrap_or(0);

    if !(1..=12).contains(&month) {
        return Err(EXPIRY_MONTH.to_string());
    }

    let max_year = current_year.rem_euclid(100) as u32 + EXPIRY_YEARS_AHEAD;
    if year < MIN_EXPIRY_YEAR || year > max_year {
        return Err(expiry_year_message(max_year));
    }

    Ok(())
}

/// 3 or 4 ASCII digits
pub fn cvv(value: &str) -> Result<(), String> {
    if cvv_regex().is_match(value) {
        Ok(())
    } else {
        Err(CVV_FORMAT.to_string())
    }
}

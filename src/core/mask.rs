//! Card number masking

/// Length of a card number the mask applies to
pub const CARD_NUMBER_LEN: usize = 16;

const MASK: &str = "**********";

/// Redact a card number for display, keeping the first 2 and last 4 digits.
///
/// Inputs whose length is not exactly 16 characters are returned unchanged.
///
/// ```
/// use card_vault::core::mask::mask_card_number;
///
/// assert_eq!(mask_card_number("4111222233334444"), "41**********4444");
/// assert_eq!(mask_card_number("123"), "123");
/// ```
pub fn mask_card_number(card_number: &str) -> String {
    let chars: Vec<char> = card_number.chars().collect();
    if chars.len() != CARD_NUMBER_LEN {
        return card_number.to_string();
    }

    let first: String = chars[..2].iter().collect();
    let last: String = chars[CARD_NUMBER_LEN - 4..].iter().collect();
    format!("{first}{MASK}{last}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_sixteen_digits() {
        assert_eq!(mask_card_number("1234567890123456"), "12**********3456");
    }

    #[test]
    fn test_masked_output_keeps_length_and_edges() {
        for n in ["0000000000000000", "5500000000000004", "9876543210987654"] {
            let masked = mask_card_number(n);
            assert_eq!(masked.chars().count(), CARD_NUMBER_LEN);
            assert_eq!(&masked[..2], &n[..2]);
            assert_eq!(&masked[12..], &n[12..]);
            assert_eq!(&masked[2..12], MASK);
        }
    }

    #[test]
    fn test_other_lengths_pass_through() {
        for n in ["", "1", "123", "123456789012345", "12345678901234567"] {
            assert_eq!(mask_card_number(n), n);
        }
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let input = "ñññññññññññññññ1";
        assert_eq!(mask_card_number(input), "ññ**********ñññ1");
    }
}

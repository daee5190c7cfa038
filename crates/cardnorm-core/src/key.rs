//! Canonical card keys.
//!
//! A key is `set-number-variant-grade`, e.g. `base1-004-holo-psa10`, and is
//! the join column shared with the price and catalog stores. It depends on
//! nothing but its four components.

use crate::catalogs::{DEFAULT_VARIANT, RAW_GRADE};

/// Width card numbers are zero-padded to.
pub const NUMBER_WIDTH: usize = 3;

/// Derive the card key for a (set, number, variant, grade) combination.
pub fn card_key(set_code: &str, number: &str, variant: Option<&str>, grade: Option<&str>) -> String {
    let set_part = strip_chars(&set_code.to_lowercase(), |c| c.is_whitespace() || c == '-');
    let number_part = pad_number(number);
    let variant_part = strip_chars(
        &variant.unwrap_or(DEFAULT_VARIANT).to_lowercase(),
        char::is_whitespace,
    );
    let grade_part = strip_chars(&grade.unwrap_or(RAW_GRADE).to_lowercase(), |c| {
        c.is_whitespace() || c == '-' || c == '.'
    });

    format!("{set_part}-{number_part}-{variant_part}-{grade_part}")
}

/// Left-pad a card number with zeros to [`NUMBER_WIDTH`]. Longer input is
/// returned unchanged.
pub fn pad_number(number: &str) -> String {
    let len = number.chars().count();
    if len >= NUMBER_WIDTH {
        return number.to_string();
    }
    let mut padded = "0".repeat(NUMBER_WIDTH - len);
    padded.push_str(number);
    padded
}

fn strip_chars(s: &str, drop: impl Fn(char) -> bool) -> String {
    s.chars().filter(|&c| !drop(c)).collect()
}

use crate::error::NormalizeError;
use crate::types::ParsedCard;

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_NUMBER: u32 = 1;
pub const MAX_NUMBER: u32 = 999;

/// Invariant checks on the winning card, independent of the per-pattern
/// extraction checks.
pub fn validate(card: &ParsedCard) -> Result<(), NormalizeError> {
    let violation = |reason: String| NormalizeError::InvariantViolation {
        title: card.raw_title().to_string(),
        reason,
    };

    if card.name().chars().count() < MIN_NAME_LEN {
        return Err(violation(format!("invalid card name: {:?}", card.name())));
    }

    if card.set_code().is_empty() {
        return Err(violation("missing set code".into()));
    }

    let number = card.number();
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(violation(format!("invalid card number: {number:?}")));
    }

    match number.parse::<u32>() {
        Ok(n) if (MIN_NUMBER..=MAX_NUMBER).contains(&n) => Ok(()),
        _ => Err(violation(format!("card number out of range: {number}"))),
    }
}

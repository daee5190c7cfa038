use crate::types::PatternMatch;

pub const COMPLETE_MATCH_BONUS: f64 = 0.10;
pub const GRADE_BONUS: f64 = 0.05;
pub const VARIANT_BONUS: f64 = 0.05;
pub const SHORT_NAME_PENALTY: f64 = 0.20;
pub const SHORT_NAME_LEN: usize = 3;

/// Confidence of a candidate built from `groups`, starting from the
/// pattern's base confidence. Capped at 1.0; there is no lower bound.
pub fn score(base_confidence: f64, groups: &PatternMatch, cleaned_title: &str) -> f64 {
    let mut confidence = base_confidence;

    if groups.name.is_some() && groups.set.is_some() && groups.number.is_some() {
        confidence += COMPLETE_MATCH_BONUS;
    }

    let title = cleaned_title.to_lowercase();
    if groups.grade.is_some() || title.contains("psa") || title.contains("bgs") {
        confidence += GRADE_BONUS;
    }

    if groups.variant.is_some() {
        confidence += VARIANT_BONUS;
    }

    let name_len = groups.name.as_deref().map_or(0, |n| n.chars().count());
    if name_len < SHORT_NAME_LEN {
        confidence -= SHORT_NAME_PENALTY;
    }

    confidence.min(1.0)
}

//! Built-in lint rules.

pub mod alias_collision;
pub mod grade_format;
pub mod invalid_regex;
pub mod pattern_confidence;
pub mod pattern_groups;

pub use alias_collision::AliasCollisionRule;
pub use grade_format::GradeFormatRule;
pub use invalid_regex::InvalidRegexRule;
pub use pattern_confidence::PatternConfidenceRule;
pub use pattern_groups::PatternGroupsRule;

use regex::{Regex, RegexBuilder};

/// Compile a rule regex the way the engine does. Rules that do not compile are
/// reported by `invalid-regex` and skipped everywhere else.
pub(crate) fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

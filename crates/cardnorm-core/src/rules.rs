//! Ordered, first-match-wins rule lists for variants and grades.

use regex::{Regex, RegexBuilder};

use crate::catalogs::RAW_GRADE;
use crate::error::RuleError;
use crate::types::{GradeRule, VariantRule};

/// Compile a rule-table regex. All rule patterns match case-insensitively.
pub(crate) fn compile(pattern: &str, table: &'static str, index: usize) -> Result<Regex, RuleError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| RuleError::InvalidRegex {
            table,
            index,
            source,
        })
}

// ---------------------------------------------------------------------------
// Variants
// ---------------------------------------------------------------------------

pub struct VariantNormalizer {
    rules: Vec<(Regex, String)>,
}

impl VariantNormalizer {
    pub fn new(rules: &[VariantRule]) -> Result<Self, RuleError> {
        let rules = rules
            .iter()
            .enumerate()
            .map(|(i, r)| Ok((compile(&r.pattern, "variant_patterns", i)?, r.normalized.clone())))
            .collect::<Result<Vec<_>, RuleError>>()?;
        Ok(Self { rules })
    }

    /// Map raw variant text to its canonical label. Text no rule recognises
    /// is kept, lowercased; blank text has no variant.
    pub fn normalize(&self, raw: Option<&str>) -> Option<String> {
        let raw = raw?.trim().to_lowercase();
        if raw.is_empty() {
            return None;
        }
        self.rules
            .iter()
            .find(|(re, _)| re.is_match(&raw))
            .map(|(_, label)| label.clone())
            .or(Some(raw))
    }
}

// ---------------------------------------------------------------------------
// Grades
// ---------------------------------------------------------------------------

struct CompiledGradeRule {
    regex: Regex,
    company: String,
    format: String,
}

pub struct GradeExtractor {
    rules: Vec<CompiledGradeRule>,
}

impl GradeExtractor {
    pub fn new(rules: &[GradeRule]) -> Result<Self, RuleError> {
        let rules = rules
            .iter()
            .enumerate()
            .map(|(i, r)| {
                Ok(CompiledGradeRule {
                    regex: compile(&r.pattern, "grade_patterns", i)?,
                    company: r.company.clone(),
                    format: r.format.clone(),
                })
            })
            .collect::<Result<Vec<_>, RuleError>>()?;
        Ok(Self { rules })
    }

    /// Grade label for `text`, e.g. `PSA 10`. Defaults to `raw`.
    pub fn extract(&self, text: &str) -> String {
        for rule in &self.rules {
            let Some(caps) = rule.regex.captures(text) else {
                continue;
            };
            if rule.company.eq_ignore_ascii_case(RAW_GRADE) {
                return RAW_GRADE.to_string();
            }
            let score = caps.get(1).map_or("", |m| m.as_str());
            return rule.format.replace("{score}", score);
        }
        RAW_GRADE.to_string()
    }
}

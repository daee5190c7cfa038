//! Rule: grade-format
//!
//! Company grade rules should carry the score through: a `{score}`
//! placeholder in the format and a capture group in the pattern.

use cardnorm_core::catalogs::RAW_GRADE;
use cardnorm_core::types::RuleTables;

use super::compile;
use crate::{LintDiagnostic, LintRule, LintSeverity};

pub struct GradeFormatRule;

impl LintRule for GradeFormatRule {
    fn id(&self) -> &str {
        "grade-format"
    }

    fn description(&self) -> &str {
        "Grade rules for a grading company should format the captured score"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Warning
    }

    fn check(&self, tables: &RuleTables) -> Vec<LintDiagnostic> {
        let mut diagnostics = Vec::new();

        for (i, rule) in tables.patterns.grade_patterns.iter().enumerate() {
            if rule.company.eq_ignore_ascii_case(RAW_GRADE) {
                continue;
            }
            let location = format!("grade_patterns[{i}]");

            if !rule.format.contains("{score}") {
                diagnostics.push(self.diagnostic(
                    "patterns",
                    location.clone(),
                    format!(
                        "{} grade format \"{}\" has no {{score}} placeholder",
                        rule.company, rule.format
                    ),
                ));
            }

            if let Ok(re) = compile(&rule.pattern) {
                if re.captures_len() < 2 {
                    diagnostics.push(self.diagnostic(
                        "patterns",
                        location,
                        format!(
                            "{} grade pattern has no capture group, so the score is always empty",
                            rule.company
                        ),
                    ));
                }
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardnorm_core::types::GradeRule;

    fn tables(rules: Vec<GradeRule>) -> RuleTables {
        let mut tables = RuleTables::default();
        tables.patterns.grade_patterns = rules;
        tables
    }

    #[test]
    fn detects_missing_placeholder() {
        let results = GradeFormatRule.check(&tables(vec![GradeRule {
            pattern: r"\bpsa\s*(\d+)".into(),
            company: "PSA".into(),
            format: "PSA".into(),
        }]));
        assert_eq!(results.len(), 1);
        assert!(results[0].message.contains("{score}"));
    }

    #[test]
    fn detects_missing_capture() {
        let results = GradeFormatRule.check(&tables(vec![GradeRule {
            pattern: r"\bgem mint\b".into(),
            company: "PSA".into(),
            format: "PSA {score}".into(),
        }]));
        assert_eq!(results.len(), 1);
        assert!(results[0].message.contains("no capture group"));
    }

    #[test]
    fn raw_rules_are_exempt() {
        let results = GradeFormatRule.check(&tables(vec![GradeRule {
            pattern: r"\bungraded\b".into(),
            company: "raw".into(),
            format: String::new(),
        }]));
        assert!(results.is_empty());
    }
}

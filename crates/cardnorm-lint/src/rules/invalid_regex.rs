//! Rule: invalid-regex
//!
//! Every pattern in every table must compile, or the whole rule set is
//! rejected at load time.

use cardnorm_core::types::RuleTables;

use super::compile;
use crate::{LintDiagnostic, LintRule, LintSeverity};

pub struct InvalidRegexRule;

impl LintRule for InvalidRegexRule {
    fn id(&self) -> &str {
        "invalid-regex"
    }

    fn description(&self) -> &str {
        "Rule patterns must be valid regular expressions"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Error
    }

    fn check(&self, tables: &RuleTables) -> Vec<LintDiagnostic> {
        let catalog = &tables.patterns;
        let tables: [(&str, Vec<&str>); 4] = [
            (
                "cleaning_patterns",
                catalog.cleaning_patterns.iter().map(|r| r.pattern.as_str()).collect(),
            ),
            (
                "title_patterns",
                catalog.title_patterns.iter().map(|r| r.pattern.as_str()).collect(),
            ),
            (
                "variant_patterns",
                catalog.variant_patterns.iter().map(|r| r.pattern.as_str()).collect(),
            ),
            (
                "grade_patterns",
                catalog.grade_patterns.iter().map(|r| r.pattern.as_str()).collect(),
            ),
        ];

        let mut diagnostics = Vec::new();
        for (table, patterns) in tables {
            for (i, pattern) in patterns.into_iter().enumerate() {
                if let Err(e) = compile(pattern) {
                    let reason = e.to_string().lines().last().unwrap_or_default().to_string();
                    diagnostics.push(self.diagnostic(
                        "patterns",
                        format!("{table}[{i}]"),
                        format!("Pattern does not compile: {reason}"),
                    ));
                }
            }
        }
        diagnostics
    }
}

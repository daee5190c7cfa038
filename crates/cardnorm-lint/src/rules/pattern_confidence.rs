//! Rule: pattern-confidence
//!
//! Flags title patterns whose base confidence is outside [0, 1] or so low
//! that even with every bonus they cannot reach the acceptance floor.

use cardnorm_core::catalogs::{MIN_CONFIDENCE, REQUIRED_GROUPS};
use cardnorm_core::scoring::{COMPLETE_MATCH_BONUS, GRADE_BONUS, VARIANT_BONUS};
use cardnorm_core::types::RuleTables;

use super::compile;
use crate::{LintDiagnostic, LintRule, LintSeverity};

pub struct PatternConfidenceRule;

impl LintRule for PatternConfidenceRule {
    fn id(&self) -> &str {
        "pattern-confidence"
    }

    fn description(&self) -> &str {
        "Title pattern confidences must be in [0, 1] and able to reach the acceptance floor"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Warning
    }

    fn check(&self, tables: &RuleTables) -> Vec<LintDiagnostic> {
        let mut diagnostics = Vec::new();

        for (i, pattern) in tables.patterns.title_patterns.iter().enumerate() {
            let location = format!("title_patterns[{i}]");

            if !(0.0..=1.0).contains(&pattern.confidence) {
                diagnostics.push(self.diagnostic(
                    "patterns",
                    location,
                    format!(
                        "Title pattern \"{}\" has confidence {} outside [0, 1]",
                        pattern.name, pattern.confidence
                    ),
                ));
                continue;
            }

            let Ok(re) = compile(&pattern.pattern) else {
                continue;
            };
            let groups: Vec<&str> = re.capture_names().flatten().collect();
            if !REQUIRED_GROUPS.iter().all(|g| groups.contains(g)) {
                continue;
            }

            // same order of additions as the scorer
            let mut best = pattern.confidence + COMPLETE_MATCH_BONUS;
            best += GRADE_BONUS;
            if groups.contains(&"variant") {
                best += VARIANT_BONUS;
            }
            let best = best.min(1.0);

            if best < MIN_CONFIDENCE {
                diagnostics.push(self.diagnostic(
                    "patterns",
                    location,
                    format!(
                        "Title pattern \"{}\" can reach at most {best:.2}, below the {MIN_CONFIDENCE} floor",
                        pattern.name
                    ),
                ));
            }
        }

        diagnostics
    }
}

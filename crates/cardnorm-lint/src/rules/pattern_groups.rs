//! Rule: pattern-groups
//!
//! Title patterns must define the `name`, `set` and `number` groups; groups
//! outside the known set are ignored by the engine and usually a typo.

use std::collections::HashSet;

use cardnorm_core::catalogs::{KNOWN_GROUPS, REQUIRED_GROUPS};
use cardnorm_core::types::RuleTables;

use super::compile;
use crate::{LintDiagnostic, LintRule, LintSeverity};

pub struct PatternGroupsRule;

impl LintRule for PatternGroupsRule {
    fn id(&self) -> &str {
        "pattern-groups"
    }

    fn description(&self) -> &str {
        "Title patterns must capture name, set and number and only use known groups"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Error
    }

    fn check(&self, tables: &RuleTables) -> Vec<LintDiagnostic> {
        let mut diagnostics = Vec::new();
        let mut seen_names: HashSet<&str> = HashSet::new();

        for (i, pattern) in tables.patterns.title_patterns.iter().enumerate() {
            let location = format!("title_patterns[{i}]");

            if !seen_names.insert(pattern.name.as_str()) {
                diagnostics.push(self.diagnostic(
                    "patterns",
                    location.clone(),
                    format!("Title pattern name \"{}\" is used more than once", pattern.name),
                ));
            }

            let Ok(re) = compile(&pattern.pattern) else {
                continue;
            };
            let groups: Vec<&str> = re.capture_names().flatten().collect();

            for required in REQUIRED_GROUPS {
                if !groups.contains(&required) {
                    diagnostics.push(self.diagnostic(
                        "patterns",
                        location.clone(),
                        format!(
                            "Title pattern \"{}\" has no \"{required}\" group and can never produce a card",
                            pattern.name
                        ),
                    ));
                }
            }

            for group in groups.iter().filter(|g| !KNOWN_GROUPS.contains(*g)) {
                diagnostics.push(self.diagnostic(
                    "patterns",
                    location.clone(),
                    format!(
                        "Title pattern \"{}\" uses unknown group \"{group}\", which is ignored",
                        pattern.name
                    ),
                ));
            }
        }

        diagnostics
    }
}

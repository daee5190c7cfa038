//! Rule: alias-collision
//!
//! A set code or alias listed by more than one set resolves to whichever
//! set comes last, silently shadowing the earlier one.

use std::collections::HashMap;

use cardnorm_core::types::RuleTables;

use crate::{LintDiagnostic, LintRule, LintSeverity};

pub struct AliasCollisionRule;

impl LintRule for AliasCollisionRule {
    fn id(&self) -> &str {
        "alias-collision"
    }

    fn description(&self) -> &str {
        "Set codes and aliases should belong to exactly one set"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Warning
    }

    fn check(&self, tables: &RuleTables) -> Vec<LintDiagnostic> {
        let mut diagnostics = Vec::new();
        let mut owners: HashMap<String, &str> = HashMap::new();

        for (i, set) in tables.sets.iter().enumerate() {
            let keys = std::iter::once((format!("sets[{i}].code"), &set.code)).chain(
                set.aliases
                    .iter()
                    .enumerate()
                    .map(|(j, a)| (format!("sets[{i}].aliases[{j}]"), a)),
            );

            for (location, raw) in keys {
                let key = raw.trim().to_lowercase();
                if key.is_empty() {
                    continue;
                }
                match owners.insert(key.clone(), set.code.as_str()) {
                    Some(previous) if previous != set.code => {
                        diagnostics.push(self.diagnostic(
                            "sets",
                            location,
                            format!(
                                "\"{key}\" is listed by sets \"{previous}\" and \"{}\"; it resolves to \"{}\"",
                                set.code, set.code
                            ),
                        ));
                    }
                    _ => {}
                }
            }
        }

        diagnostics
    }
}

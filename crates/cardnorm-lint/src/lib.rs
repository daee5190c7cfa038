//! Rule-table linter for cardnorm.
//!
//! Catches malformed rule tables (uncompilable regexes, title patterns that
//! can never produce a card, colliding set aliases) before they are loaded
//! into a `Normalizer`.

mod rules;

use cardnorm_core::types::RuleTables;
pub use rules::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Lint severity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LintSeverity {
    Error,
    Warning,
    Info,
}

impl LintSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            LintSeverity::Error => "error",
            LintSeverity::Warning => "warning",
            LintSeverity::Info => "info",
        }
    }
}

// ---------------------------------------------------------------------------
// Lint diagnostic
// ---------------------------------------------------------------------------

/// One finding. `document` is `sets` or `patterns`; `location` points into it,
/// e.g. `title_patterns[3]` or `sets[12].aliases[0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintDiagnostic {
    pub rule: String,
    pub severity: LintSeverity,
    pub document: String,
    pub location: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Lint rule trait
// ---------------------------------------------------------------------------

pub trait LintRule: Send + Sync {
    /// Unique rule identifier (e.g., "alias-collision").
    fn id(&self) -> &str;

    fn description(&self) -> &str;

    fn default_severity(&self) -> LintSeverity;

    fn check(&self, tables: &RuleTables) -> Vec<LintDiagnostic>;

    fn diagnostic(&self, document: &str, location: String, message: String) -> LintDiagnostic {
        LintDiagnostic {
            rule: self.id().into(),
            severity: self.default_severity(),
            document: document.into(),
            location,
            message,
        }
    }
}

// ---------------------------------------------------------------------------
// Lint configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    Off,
    #[default]
    Warn,
    Error,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LintConfig {
    #[serde(default)]
    pub rules: HashMap<String, RuleLevel>,
}

impl LintConfig {
    pub fn is_enabled(&self, rule_id: &str) -> bool {
        !matches!(self.rules.get(rule_id), Some(RuleLevel::Off))
    }

    /// Configured severity for a rule, or its default.
    pub fn severity_for(&self, rule: &dyn LintRule) -> LintSeverity {
        match self.rules.get(rule.id()) {
            Some(RuleLevel::Error) => LintSeverity::Error,
            Some(RuleLevel::Warn) | Some(RuleLevel::Off) => LintSeverity::Warning,
            None => rule.default_severity(),
        }
    }
}

// ---------------------------------------------------------------------------
// Linter engine
// ---------------------------------------------------------------------------

pub struct Linter {
    rules: Vec<Box<dyn LintRule>>,
    config: LintConfig,
}

impl Linter {
    pub fn new(config: LintConfig) -> Self {
        Self {
            rules: builtin_rules(),
            config,
        }
    }

    pub fn rules(&self) -> &[Box<dyn LintRule>] {
        &self.rules
    }

    /// Run all enabled rules against the tables.
    pub fn lint(&self, tables: &RuleTables) -> Vec<LintDiagnostic> {
        let mut diagnostics = Vec::new();

        for rule in &self.rules {
            if self.config.is_enabled(rule.id()) {
                let severity = self.config.severity_for(rule.as_ref());
                let mut results = rule.check(tables);
                for d in &mut results {
                    d.severity = severity.clone();
                }
                diagnostics.extend(results);
            }
        }

        diagnostics
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new(LintConfig::default())
    }
}

fn builtin_rules() -> Vec<Box<dyn LintRule>> {
    vec![
        Box::new(InvalidRegexRule),
        Box::new(PatternGroupsRule),
        Box::new(PatternConfidenceRule),
        Box::new(AliasCollisionRule),
        Box::new(GradeFormatRule),
    ]
}

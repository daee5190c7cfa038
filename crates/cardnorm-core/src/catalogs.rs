use std::collections::HashSet;
use std::sync::LazyLock;

use crate::error::RuleError;
use crate::types::{PatternCatalog, RuleTables, SetEntry};

/// Minimum token-sort similarity (0-100) for a fuzzy set match.
pub const SET_MATCH_THRESHOLD: u8 = 80;

/// Minimum confidence a winning candidate needs to be returned.
pub const MIN_CONFIDENCE: f64 = 0.5;

/// Grade of an ungraded card, and the company tag that forces it.
pub const RAW_GRADE: &str = "raw";

/// Key segment used when a card has no variant.
pub const DEFAULT_VARIANT: &str = "base";

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Named groups a title pattern may define.
pub static KNOWN_GROUPS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut s = HashSet::new();
    s.insert("name");
    s.insert("number");
    s.insert("total");
    s.insert("set");
    s.insert("variant");
    s.insert("grade");
    s.insert("condition");
    s
});

/// Groups without which a title pattern can never produce a candidate.
pub const REQUIRED_GROUPS: [&str; 3] = ["name", "set", "number"];

const BUILTIN_SETS: &str = include_str!("../rules/sets.json");
const BUILTIN_PATTERNS: &str = include_str!("../rules/patterns.json");

impl RuleTables {
    /// Rule tables shipped with the crate.
    pub fn builtin() -> Result<Self, RuleError> {
        Self::from_json(BUILTIN_SETS, BUILTIN_PATTERNS)
    }

    /// Load the set registry and pattern catalog from their two JSON documents.
    pub fn from_json(sets_json: &str, patterns_json: &str) -> Result<Self, RuleError> {
        let sets: Vec<SetEntry> =
            serde_json::from_str(sets_json).map_err(|source| RuleError::Parse {
                document: "sets",
                source,
            })?;
        let patterns: PatternCatalog =
            serde_json::from_str(patterns_json).map_err(|source| RuleError::Parse {
                document: "patterns",
                source,
            })?;
        Ok(Self { sets, patterns })
    }

    /// Load a combined `{ "sets": [...], "patterns": {...} }` document.
    pub fn from_combined_json(json: &str) -> Result<Self, RuleError> {
        serde_json::from_str(json).map_err(|source| RuleError::Parse {
            document: "rules",
            source,
        })
    }
}

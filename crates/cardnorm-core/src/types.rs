use serde::{Deserialize, Serialize};

use crate::key::card_key;

// ---------------------------------------------------------------------------
// Rule table documents (sets.json / patterns.json)
// ---------------------------------------------------------------------------

/// One canonical product release and the free-text spellings that refer to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetEntry {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningRule {
    pub pattern: String,
    #[serde(default)]
    pub replacement: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitlePattern {
    pub name: String,
    pub pattern: String,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

fn default_confidence() -> f64 {
    0.5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantRule {
    pub pattern: String,
    pub normalized: String,
}

/// `company` is either a grading company id or the sentinel `raw`.
/// `format` receives the first captured group in place of `{score}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRule {
    pub pattern: String,
    pub company: String,
    #[serde(default)]
    pub format: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternCatalog {
    #[serde(default)]
    pub cleaning_patterns: Vec<CleaningRule>,
    #[serde(default)]
    pub title_patterns: Vec<TitlePattern>,
    #[serde(default)]
    pub variant_patterns: Vec<VariantRule>,
    #[serde(default)]
    pub grade_patterns: Vec<GradeRule>,
}

/// Everything a [`crate::Normalizer`] is built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleTables {
    #[serde(default)]
    pub sets: Vec<SetEntry>,
    #[serde(default)]
    pub patterns: PatternCatalog,
}

// ---------------------------------------------------------------------------
// Per-pattern match record
// ---------------------------------------------------------------------------

/// Named groups captured by one title pattern. Groups the pattern does not
/// define, did not take part in the match, or captured as empty are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatternMatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

/// Why a title pattern did not yield a candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    NoMatch,
    EmptyName { raw: Option<String> },
    UnresolvedSet { raw: Option<String> },
    InvalidNumber { raw: Option<String> },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::NoMatch => write!(f, "no match"),
            Rejection::EmptyName { raw } => {
                write!(f, "no usable name in {:?}", raw.as_deref().unwrap_or(""))
            }
            Rejection::UnresolvedSet { raw } => {
                write!(f, "could not resolve set {:?}", raw.as_deref().unwrap_or(""))
            }
            Rejection::InvalidNumber { raw } => {
                write!(f, "invalid card number {:?}", raw.as_deref().unwrap_or(""))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Structured identity of one listing. Built once per successful
/// normalization; `card_key` is derived at construction and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedCard {
    name: String,
    set_code: String,
    number: String,
    variant: Option<String>,
    grade: Option<String>,
    confidence: f64,
    card_key: String,
    raw_title: String,
    pattern: String,
}

impl ParsedCard {
    pub fn new(
        name: impl Into<String>,
        set_code: impl Into<String>,
        number: impl Into<String>,
        variant: Option<String>,
        grade: Option<String>,
    ) -> Self {
        let name = name.into();
        let set_code = set_code.into();
        let number = number.into();
        let card_key = card_key(&set_code, &number, variant.as_deref(), grade.as_deref());
        Self {
            name,
            set_code,
            number,
            variant,
            grade,
            confidence: 0.0,
            card_key,
            raw_title: String::new(),
            pattern: String::new(),
        }
    }

    pub(crate) fn with_provenance(
        mut self,
        confidence: f64,
        raw_title: &str,
        pattern: &str,
    ) -> Self {
        self.confidence = confidence;
        self.raw_title = raw_title.to_string();
        self.pattern = pattern.to_string();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_code(&self) -> &str {
        &self.set_code
    }

    /// Card number, zero-padded to three digits when produced by the matcher.
    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    pub fn grade(&self) -> Option<&str> {
        self.grade.as_deref()
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn card_key(&self) -> &str {
        &self.card_key
    }

    pub fn raw_title(&self) -> &str {
        &self.raw_title
    }

    /// Name of the title pattern that produced this card.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

// ---------------------------------------------------------------------------
// Explain trace
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AttemptOutcome {
    Candidate {
        confidence: f64,
        card_key: String,
    },
    Rejected {
        rejection: Rejection,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternAttempt {
    pub pattern: String,
    pub position: usize,
    pub base_confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<PatternMatch>,
    pub outcome: AttemptOutcome,
}

/// Full trace of one normalization: the cleaned title, what every pattern
/// did with it, and the final outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub title: String,
    pub cleaned: String,
    pub attempts: Vec<PatternAttempt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<ParsedCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

use thiserror::Error;

/// Failure to turn a title into a [`crate::ParsedCard`]. Every variant carries
/// the original title so callers can route it to review without extra context.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    #[error("empty or blank title")]
    Input { title: String },

    #[error("could not parse title with sufficient confidence: {title} ({reason})")]
    Normalization { title: String, reason: String },

    /// The winning candidate broke a result invariant. Points at a malformed
    /// rule rather than malformed input.
    #[error("parsed card for {title} failed validation: {reason}")]
    InvariantViolation { title: String, reason: String },
}

impl NormalizeError {
    /// Stable machine-readable tag used in JSON envelopes.
    pub fn kind(&self) -> &'static str {
        match self {
            NormalizeError::Input { .. } => "input",
            NormalizeError::Normalization { .. } => "normalization",
            NormalizeError::InvariantViolation { .. } => "invariant_violation",
        }
    }

    pub fn title(&self) -> &str {
        match self {
            NormalizeError::Input { title }
            | NormalizeError::Normalization { title, .. }
            | NormalizeError::InvariantViolation { title, .. } => title,
        }
    }
}

/// Rule tables that cannot be loaded or compiled.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid regex in {table}[{index}]: {source}")]
    InvalidRegex {
        table: &'static str,
        index: usize,
        #[source]
        source: regex::Error,
    },

    #[error("title pattern \"{name}\" has confidence {confidence} outside [0, 1]")]
    InvalidConfidence { name: String, confidence: f64 },

    #[error("invalid {document} document: {source}")]
    Parse {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

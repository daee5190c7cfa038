//! FFI-oriented JSON API for cross-language bindings.
//!
//! All functions take string inputs and return a JSON envelope
//! `{ "success": bool, "data"?: ..., "error"?: string, "kind"?: string }`.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::NormalizeError;
use crate::key::card_key;
use crate::matcher::Normalizer;
use crate::types::RuleTables;

static BUILTIN: LazyLock<Result<Normalizer, String>> =
    LazyLock::new(|| Normalizer::builtin().map_err(|e| e.to_string()));

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct KeyComponents {
    pub set_code: String,
    pub number: String,
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(default)]
    pub grade: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FfiResult<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Error category for normalization failures (`input`, `normalization`,
    /// `invariant_violation`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
}

struct Failure {
    message: String,
    kind: Option<&'static str>,
}

impl Failure {
    fn plain(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: None,
        }
    }
}

impl From<NormalizeError> for Failure {
    fn from(e: NormalizeError) -> Self {
        Self {
            message: e.to_string(),
            kind: Some(e.kind()),
        }
    }
}

fn envelope<T: Serialize>(result: Result<T, Failure>) -> String {
    let ffi_result = match result {
        Ok(data) => FfiResult {
            success: true,
            data: Some(data),
            error: None,
            kind: None,
        },
        Err(f) => FfiResult {
            success: false,
            data: None,
            error: Some(f.message),
            kind: f.kind,
        },
    };
    serde_json::to_string(&ffi_result).unwrap_or_else(|e| {
        serde_json::json!({
            "success": false,
            "error": format!("JSON serialization error: {e}"),
        })
        .to_string()
    })
}

fn guarded<T: Serialize>(f: impl FnOnce() -> Result<T, Failure>) -> String {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => envelope(result),
        Err(_) => envelope::<()>(Err(Failure::plain("Internal normalizer panic"))),
    }
}

fn builtin() -> Result<&'static Normalizer, Failure> {
    BUILTIN
        .as_ref()
        .map_err(|e| Failure::plain(format!("Built-in rules failed to load: {e}")))
}

// ---------------------------------------------------------------------------
// Public FFI functions
// ---------------------------------------------------------------------------

/// Normalize one title with the built-in rule tables.
///
/// Output `data`: the parsed card.
pub fn normalize_to_json(title: &str) -> String {
    guarded(|| Ok(builtin()?.normalize(title)?))
}

/// Normalize a batch of titles with the built-in rule tables.
///
/// Input: JSON array of strings.
/// Output `data`: array with a card or `null` per input title.
pub fn normalize_many_to_json(titles_json: &str) -> String {
    let titles: Vec<String> = match serde_json::from_str(titles_json) {
        Ok(t) => t,
        Err(e) => return envelope::<()>(Err(Failure::plain(format!("Invalid input JSON: {e}")))),
    };
    guarded(|| Ok(builtin()?.normalize_many(&titles)))
}

/// Normalize one title with caller-supplied rule tables.
///
/// Input: `{ "sets": [...], "patterns": {...} }`. The tables are compiled on
/// every call; long-lived hosts should hold a `Normalizer` instead.
pub fn normalize_with_rules_to_json(title: &str, rules_json: &str) -> String {
    guarded(|| {
        let tables =
            RuleTables::from_combined_json(rules_json).map_err(|e| Failure::plain(e.to_string()))?;
        let normalizer = Normalizer::new(&tables).map_err(|e| Failure::plain(e.to_string()))?;
        Ok(normalizer.normalize(title)?)
    })
}

/// Compute a card key.
///
/// Input: `{ "set_code", "number", "variant"?, "grade"? }`.
/// Output `data`: the key string.
pub fn card_key_to_json(components_json: &str) -> String {
    let c: KeyComponents = match serde_json::from_str(components_json) {
        Ok(c) => c,
        Err(e) => return envelope::<()>(Err(Failure::plain(format!("Invalid input JSON: {e}")))),
    };
    envelope::<String>(Ok(card_key(
        &c.set_code,
        &c.number,
        c.variant.as_deref(),
        c.grade.as_deref(),
    )))
}

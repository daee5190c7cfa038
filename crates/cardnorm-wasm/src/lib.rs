//! cardnorm WASM bindings.
//!
//! JavaScript-callable wrappers over the JSON FFI surface. Every function
//! returns `{ success: boolean, data?: ..., error?: string, kind?: string }`.

use cardnorm_core::{
    card_key_to_json, normalize_many_to_json, normalize_to_json, normalize_with_rules_to_json,
};
use wasm_bindgen::prelude::*;

/// Normalize one listing title with the built-in rules.
///
/// @param title - raw marketplace title
/// @returns JSON envelope with the parsed card as `data`
#[wasm_bindgen(js_name = "normalize")]
pub fn wasm_normalize(title: &str) -> String {
    normalize_to_json(title)
}

/// @param titles_json - JSON array of titles
/// @returns JSON envelope with an array of cards (or `null` per failed title)
#[wasm_bindgen(js_name = "normalizeMany")]
pub fn wasm_normalize_many(titles_json: &str) -> String {
    normalize_many_to_json(titles_json)
}

/// Normalize with caller-supplied rule tables. The tables are compiled on
/// every call.
///
/// @param title - raw marketplace title
/// @param rules_json - `{ sets: [...], patterns: {...} }`
#[wasm_bindgen(js_name = "normalizeWithRules")]
pub fn wasm_normalize_with_rules(title: &str, rules_json: &str) -> String {
    normalize_with_rules_to_json(title, rules_json)
}

/// @param components_json - `{ set_code, number, variant?, grade? }`
/// @returns JSON envelope with the key string as `data`
#[wasm_bindgen(js_name = "cardKey")]
pub fn wasm_card_key(components_json: &str) -> String {
    card_key_to_json(components_json)
}

pub mod catalogs;
pub mod cleaner;
pub mod error;
pub mod ffi;
pub mod key;
pub mod matcher;
pub mod resolver;
pub mod rules;
pub mod scoring;
pub mod types;
pub mod validator;

pub use catalogs::{ENGINE_VERSION, MIN_CONFIDENCE, SET_MATCH_THRESHOLD};
pub use cleaner::{normalize_name, TitleCleaner};
pub use error::{NormalizeError, RuleError};
pub use ffi::{card_key_to_json, normalize_many_to_json, normalize_to_json, normalize_with_rules_to_json};
pub use key::{card_key, pad_number};
pub use matcher::Normalizer;
pub use resolver::{token_sort_ratio, SetMatch, SetResolver};
pub use types::*;
pub use validator::validate;

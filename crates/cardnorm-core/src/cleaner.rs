use regex::Regex;
use std::sync::LazyLock;

use crate::error::RuleError;
use crate::rules::compile;
use crate::types::CleaningRule;

static RE_NAME_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:pokemon|card)\b").unwrap());

/// Legacy marker for delta-species cards.
const DELTA_MARKER: char = 'δ';

struct CompiledCleaningRule {
    regex: Regex,
    replacement: String,
}

/// Ordered text substitutions that turn a raw title into the search string
/// every title pattern runs against.
pub struct TitleCleaner {
    rules: Vec<CompiledCleaningRule>,
}

impl TitleCleaner {
    pub fn new(rules: &[CleaningRule]) -> Result<Self, RuleError> {
        let rules = rules
            .iter()
            .enumerate()
            .map(|(i, r)| {
                Ok(CompiledCleaningRule {
                    regex: compile(&r.pattern, "cleaning_patterns", i)?,
                    replacement: r.replacement.clone(),
                })
            })
            .collect::<Result<Vec<_>, RuleError>>()?;
        Ok(Self { rules })
    }

    /// Lowercase, trim, then apply every rule in order, each to the previous
    /// rule's output.
    pub fn clean(&self, title: &str) -> String {
        let mut cleaned = title.trim().to_lowercase();
        for rule in &self.rules {
            cleaned = rule
                .regex
                .replace_all(&cleaned, rule.replacement.as_str())
                .into_owned();
        }
        cleaned.trim().to_string()
    }
}

/// Canonical display form of a captured card name: noise tokens dropped,
/// whitespace collapsed, the delta marker spelled out, each word capitalised.
pub fn normalize_name(raw: &str) -> String {
    let stripped = RE_NAME_NOISE.replace_all(raw, "");
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    let expanded = collapsed.replace(DELTA_MARKER, " Delta");
    expanded
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(pattern: &str, replacement: &str) -> CleaningRule {
        CleaningRule {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }

    #[test]
    fn clean_lowercases_and_trims() {
        let cleaner = TitleCleaner::new(&[]).unwrap();
        assert_eq!(cleaner.clean("  Charizard PSA 10 "), "charizard psa 10");
    }

    #[test]
    fn clean_applies_rules_in_order() {
        let cleaner = TitleCleaner::new(&[rule(r"#\s+", "#"), rule(r"#(\d)", "no.$1")]).unwrap();
        assert_eq!(cleaner.clean("Pikachu # 58"), "pikachu no.58");

        let reversed = TitleCleaner::new(&[rule(r"#(\d)", "no.$1"), rule(r"#\s+", "#")]).unwrap();
        assert_eq!(reversed.clean("Pikachu # 58"), "pikachu #58");
    }

    #[test]
    fn clean_is_identity_without_matches() {
        let cleaner = TitleCleaner::new(&[rule(r"\btcg\b", "")]).unwrap();
        assert_eq!(cleaner.clean("mew promo #8"), "mew promo #8");
    }

    #[test]
    fn clean_trims_after_rules() {
        let cleaner = TitleCleaner::new(&[rule(r"\b(?:19|20)\d{2}\b", " ")]).unwrap();
        assert_eq!(cleaner.clean("Charizard 1999"), "charizard");
    }

    #[test]
    fn name_title_cased() {
        assert_eq!(normalize_name("dark charizard"), "Dark Charizard");
        assert_eq!(normalize_name("team rocket's  mewtwo"), "Team Rocket's Mewtwo");
    }

    #[test]
    fn name_drops_noise_tokens() {
        assert_eq!(normalize_name("pokemon charizard card"), "Charizard");
        assert_eq!(normalize_name("pokemon card"), "");
        assert_eq!(normalize_name("cardinal"), "Cardinal");
    }

    #[test]
    fn name_expands_delta_marker() {
        assert_eq!(normalize_name("pikachu δ"), "Pikachu Delta");
        assert_eq!(normalize_name("latiasδ"), "Latias Delta");
    }
}

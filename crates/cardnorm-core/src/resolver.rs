use std::collections::HashMap;

use rapidfuzz::fuzz;

use crate::catalogs::SET_MATCH_THRESHOLD;
use crate::types::SetEntry;

/// Best fuzzy candidate for a raw set string.
#[derive(Debug, Clone, PartialEq)]
pub struct SetMatch<'a> {
    pub key: &'a str,
    pub code: &'a str,
    pub score: u8,
}

/// Exact and fuzzy lookup from free-text set names to canonical set codes.
///
/// Every code and alias is indexed lowercased. Keys keep the position of
/// their first appearance; a key listed by two sets maps to the later one.
pub struct SetResolver {
    keys: Vec<(String, String)>,
    exact: HashMap<String, usize>,
}

impl SetResolver {
    pub fn new(sets: &[SetEntry]) -> Self {
        let mut keys: Vec<(String, String)> = Vec::new();
        let mut exact: HashMap<String, usize> = HashMap::new();

        for set in sets {
            let names = std::iter::once(&set.code).chain(set.aliases.iter());
            for name in names {
                let key = name.trim().to_lowercase();
                if key.is_empty() {
                    continue;
                }
                match exact.get(&key) {
                    Some(&i) => keys[i].1 = set.code.clone(),
                    None => {
                        exact.insert(key.clone(), keys.len());
                        keys.push((key, set.code.clone()));
                    }
                }
            }
        }

        Self { keys, exact }
    }

    /// Number of indexed keys (codes plus aliases).
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Resolve free text to a set code: exact key first, then the closest key
    /// by token-sort similarity if it reaches [`SET_MATCH_THRESHOLD`].
    pub fn resolve(&self, raw: &str) -> Option<&str> {
        let raw = raw.trim().to_lowercase();
        if raw.is_empty() {
            return None;
        }
        if let Some(&i) = self.exact.get(&raw) {
            return Some(&self.keys[i].1);
        }
        self.best_match(&raw)
            .filter(|m| m.score >= SET_MATCH_THRESHOLD)
            .map(|m| m.code)
    }

    /// Highest-scoring indexed key regardless of threshold. The first key in
    /// index order wins ties.
    pub fn best_match(&self, raw: &str) -> Option<SetMatch<'_>> {
        let query = sort_tokens(raw);
        let mut best: Option<SetMatch<'_>> = None;
        for (key, code) in &self.keys {
            let score = sorted_ratio(&query, &sort_tokens(key));
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(SetMatch { key, code, score });
            }
        }
        best
    }
}

/// Similarity (0-100) of two strings after dropping non-ASCII characters,
/// lowercasing, replacing other non-alphanumerics with spaces and sorting
/// their tokens. Word order does not matter; either side empty scores 0.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    sorted_ratio(&sort_tokens(a), &sort_tokens(b))
}

fn sorted_ratio(a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    (fuzz::ratio(a.chars(), b.chars()) * 100.0).round() as u8
}

fn sort_tokens(s: &str) -> String {
    let processed: String = s
        .chars()
        .filter(char::is_ascii)
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect();
    let mut tokens: Vec<&str> = processed.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(code: &str, aliases: &[&str]) -> SetEntry {
        SetEntry {
            code: code.into(),
            name: None,
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn resolver() -> SetResolver {
        SetResolver::new(&[
            set("base1", &["Base Set", "base"]),
            set("base2", &["jungle"]),
            set("base4", &["base set 2"]),
            set("base5", &["team rocket"]),
            set("xy12", &["xy evolutions", "evolutions"]),
        ])
    }

    #[test]
    fn exact_alias() {
        let r = resolver();
        assert_eq!(r.resolve("base set"), Some("base1"));
        assert_eq!(r.resolve("  Base Set "), Some("base1"));
        assert_eq!(r.resolve("Evolutions"), Some("xy12"));
    }

    #[test]
    fn code_is_its_own_alias() {
        assert_eq!(resolver().resolve("BASE2"), Some("base2"));
    }

    #[test]
    fn near_miss_resolves() {
        let r = resolver();
        assert_eq!(r.resolve("base sett"), Some("base1"));
        assert_eq!(r.resolve("jungel"), Some("base2"));
        assert_eq!(r.resolve("rocket team"), Some("base5"));
    }

    #[test]
    fn unrelated_fails() {
        let r = resolver();
        assert_eq!(r.resolve("unknown set"), None);
        assert_eq!(r.resolve("charizard"), None);
        assert_eq!(r.resolve(""), None);
    }

    #[test]
    fn duplicate_alias_takes_later_code() {
        let r = SetResolver::new(&[set("a1", &["promo"]), set("b1", &["promo"])]);
        assert_eq!(r.resolve("promo"), Some("b1"));
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn ratio_ignores_order_and_punctuation() {
        assert_eq!(token_sort_ratio("Path Champion's", "champion's path"), 100);
        assert_eq!(token_sort_ratio("base set", "set base"), 100);
        assert_eq!(token_sort_ratio("base sett", "base set"), 94);
        assert_eq!(token_sort_ratio("", "base"), 0);
    }

    #[test]
    fn ratio_scores_near_misses() {
        assert_eq!(token_sort_ratio("jungel", "jungle"), 83);
        assert_eq!(token_sort_ratio("neo genisis", "genesis neo"), 91);
        assert_eq!(token_sort_ratio("evolving skys", "evolving skies"), 89);
    }

    #[test]
    fn ratio_drops_non_ascii() {
        assert_eq!(token_sort_ratio("pokémon", "pokmon"), 100);
        assert_eq!(token_sort_ratio("Pokémon Go", "go pokmon"), 100);
        assert_eq!(token_sort_ratio("ééé", "base"), 0);
    }

    #[test]
    fn accented_set_name_resolves_fuzzily() {
        let r = SetResolver::new(&[set("pgo", &["pokemon go"])]);
        assert_eq!(r.resolve("Pokémon GO"), Some("pgo"));
    }

    #[test]
    fn best_match_reports_score() {
        let r = resolver();
        let m = r.best_match("base sett").unwrap();
        assert_eq!(m.key, "base set");
        assert_eq!(m.code, "base1");
        assert_eq!(m.score, 94);
    }
}

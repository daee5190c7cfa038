use regex::{Captures, Regex};
use tracing::{debug, info, warn};

use crate::catalogs::{MIN_CONFIDENCE, RAW_GRADE};
use crate::cleaner::{normalize_name, TitleCleaner};
use crate::error::{NormalizeError, RuleError};
use crate::key::pad_number;
use crate::resolver::SetResolver;
use crate::rules::{compile, GradeExtractor, VariantNormalizer};
use crate::scoring::score;
use crate::types::*;
use crate::validator::validate;

struct CompiledPattern {
    name: String,
    regex: Regex,
    confidence: f64,
}

/// The title normalization engine.
///
/// Built once from a set of [`RuleTables`]; every regex is compiled at
/// construction and nothing is mutated afterwards, so one instance can be
/// shared across threads. To pick up new rules, build a new `Normalizer`.
pub struct Normalizer {
    cleaner: TitleCleaner,
    patterns: Vec<CompiledPattern>,
    sets: SetResolver,
    variants: VariantNormalizer,
    grades: GradeExtractor,
}

impl Normalizer {
    pub fn new(tables: &RuleTables) -> Result<Self, RuleError> {
        let catalog = &tables.patterns;

        let patterns = catalog
            .title_patterns
            .iter()
            .enumerate()
            .map(|(i, p)| {
                if !(0.0..=1.0).contains(&p.confidence) {
                    return Err(RuleError::InvalidConfidence {
                        name: p.name.clone(),
                        confidence: p.confidence,
                    });
                }
                Ok(CompiledPattern {
                    name: p.name.clone(),
                    regex: compile(&p.pattern, "title_patterns", i)?,
                    confidence: p.confidence,
                })
            })
            .collect::<Result<Vec<_>, RuleError>>()?;

        let normalizer = Self {
            cleaner: TitleCleaner::new(&catalog.cleaning_patterns)?,
            patterns,
            sets: SetResolver::new(&tables.sets),
            variants: VariantNormalizer::new(&catalog.variant_patterns)?,
            grades: GradeExtractor::new(&catalog.grade_patterns)?,
        };

        debug!(
            patterns = normalizer.patterns.len(),
            set_keys = normalizer.sets.len(),
            "normalizer ready"
        );
        Ok(normalizer)
    }

    /// Engine over the rule tables shipped with this crate.
    pub fn builtin() -> Result<Self, RuleError> {
        Self::new(&RuleTables::builtin()?)
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub fn set_key_count(&self) -> usize {
        self.sets.len()
    }

    /// Title patterns in priority order.
    pub fn pattern_names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.name.as_str())
    }

    pub fn clean(&self, title: &str) -> String {
        self.cleaner.clean(title)
    }

    pub fn resolve_set(&self, raw: &str) -> Option<&str> {
        self.sets.resolve(raw)
    }

    /// Normalize one listing title.
    pub fn normalize(&self, title: &str) -> Result<ParsedCard, NormalizeError> {
        if title.trim().is_empty() {
            return Err(NormalizeError::Input {
                title: title.to_string(),
            });
        }

        let cleaned = self.cleaner.clean(title);
        let best = self.select(title, &cleaned, |_, _, _| {});
        let card = finish(title, best)?;

        info!(
            card_key = card.card_key(),
            confidence = card.confidence(),
            pattern = card.pattern(),
            "normalized title"
        );
        Ok(card)
    }

    /// Normalize a batch. Output has one entry per input, in order; titles that
    /// fail are logged and come back as `None`.
    pub fn normalize_many<S: AsRef<str>>(&self, titles: &[S]) -> Vec<Option<ParsedCard>> {
        titles
            .iter()
            .map(|title| match self.normalize(title.as_ref()) {
                Ok(card) => Some(card),
                Err(e) => {
                    warn!(kind = e.kind(), "{e}");
                    None
                }
            })
            .collect()
    }

    /// Run the same pipeline as [`Normalizer::normalize`] and report what each
    /// title pattern did along the way.
    pub fn explain(&self, title: &str) -> Explanation {
        if title.trim().is_empty() {
            let err = NormalizeError::Input {
                title: title.to_string(),
            };
            return Explanation {
                title: title.to_string(),
                cleaned: String::new(),
                attempts: Vec::new(),
                card: None,
                error: Some(err.to_string()),
            };
        }

        let cleaned = self.cleaner.clean(title);
        let mut attempts = Vec::with_capacity(self.patterns.len());
        let best = self.select(title, &cleaned, |position, pattern, (groups, outcome)| {
            let outcome = match outcome {
                Ok(card) => AttemptOutcome::Candidate {
                    confidence: card.confidence(),
                    card_key: card.card_key().to_string(),
                },
                Err(rejection) => AttemptOutcome::Rejected {
                    rejection: rejection.clone(),
                },
            };
            attempts.push(PatternAttempt {
                pattern: pattern.name.clone(),
                position,
                base_confidence: pattern.confidence,
                groups: groups.cloned(),
                outcome,
            });
        });

        let (card, error) = match finish(title, best) {
            Ok(card) => (Some(card), None),
            Err(e) => (None, Some(e.to_string())),
        };

        Explanation {
            title: title.to_string(),
            cleaned,
            attempts,
            card,
            error,
        }
    }

    // -----------------------------------------------------------------------
    // Matching
    // -----------------------------------------------------------------------

    /// Try every pattern and keep the candidate with the strictly greatest
    /// confidence. `observe` sees each attempt in catalog order.
    fn select<F>(&self, title: &str, cleaned: &str, mut observe: F) -> Option<ParsedCard>
    where
        F: FnMut(usize, &CompiledPattern, (Option<&PatternMatch>, &Result<ParsedCard, Rejection>)),
    {
        let mut best: Option<ParsedCard> = None;

        for (position, pattern) in self.patterns.iter().enumerate() {
            let Some(caps) = pattern.regex.captures(cleaned) else {
                debug!(pattern = %pattern.name, "no match");
                observe(position, pattern, (None, &Err(Rejection::NoMatch)));
                continue;
            };

            let groups = extract_groups(&caps);
            let outcome = self.build_candidate(pattern, &groups, title, cleaned);
            match &outcome {
                Ok(card) => debug!(
                    pattern = %pattern.name,
                    card_key = card.card_key(),
                    confidence = card.confidence(),
                    "candidate"
                ),
                Err(rejection) => debug!(pattern = %pattern.name, %rejection, "rejected"),
            }
            observe(position, pattern, (Some(&groups), &outcome));

            if let Ok(card) = outcome {
                if best
                    .as_ref()
                    .map_or(true, |b| card.confidence() > b.confidence())
                {
                    best = Some(card);
                }
            }
        }

        best
    }

    fn build_candidate(
        &self,
        pattern: &CompiledPattern,
        groups: &PatternMatch,
        title: &str,
        cleaned: &str,
    ) -> Result<ParsedCard, Rejection> {
        let name = normalize_name(groups.name.as_deref().unwrap_or(""));
        if name.is_empty() {
            return Err(Rejection::EmptyName {
                raw: groups.name.clone(),
            });
        }

        let set_code = groups
            .set
            .as_deref()
            .and_then(|raw| self.sets.resolve(raw))
            .ok_or_else(|| Rejection::UnresolvedSet {
                raw: groups.set.clone(),
            })?;

        let number = match groups.number.as_deref() {
            Some(n) if n.chars().all(|c| c.is_ascii_digit()) => pad_number(n),
            _ => {
                return Err(Rejection::InvalidNumber {
                    raw: groups.number.clone(),
                })
            }
        };

        let variant = self.variants.normalize(groups.variant.as_deref());

        let grade = if groups.condition.is_some() {
            RAW_GRADE.to_string()
        } else {
            self.grades.extract(title)
        };

        let confidence = score(pattern.confidence, groups, cleaned);

        Ok(ParsedCard::new(name, set_code, number, variant, Some(grade))
            .with_provenance(confidence, title, &pattern.name))
    }
}

fn extract_groups(caps: &Captures<'_>) -> PatternMatch {
    let group = |name: &str| {
        caps.name(name)
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    PatternMatch {
        name: group("name"),
        number: group("number"),
        total: group("total"),
        set: group("set"),
        variant: group("variant"),
        grade: group("grade"),
        condition: group("condition"),
    }
}

fn finish(title: &str, best: Option<ParsedCard>) -> Result<ParsedCard, NormalizeError> {
    let card = match best {
        None => {
            return Err(NormalizeError::Normalization {
                title: title.to_string(),
                reason: "no pattern produced a candidate".into(),
            })
        }
        Some(card) if card.confidence() < MIN_CONFIDENCE => {
            return Err(NormalizeError::Normalization {
                title: title.to_string(),
                reason: format!(
                    "best confidence {:.2} is below {MIN_CONFIDENCE}",
                    card.confidence()
                ),
            })
        }
        Some(card) => card,
    };
    validate(&card)?;
    Ok(card)
}

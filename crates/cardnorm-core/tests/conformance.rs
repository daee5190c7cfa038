use cardnorm_core::{card_key, NormalizeError, Normalizer, ParsedCard};
use pretty_assertions::assert_eq;
use std::sync::LazyLock;

static ENGINE: LazyLock<Normalizer> = LazyLock::new(|| Normalizer::builtin().unwrap());

fn normalize(title: &str) -> ParsedCard {
    ENGINE
        .normalize(title)
        .unwrap_or_else(|e| panic!("{title:?} failed: {e}"))
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ===========================================================================
// End-to-end listings
// ===========================================================================

#[test]
fn conformance_graded_hash_listing() {
    let card = normalize("Charizard Base Set #4 PSA 10");
    assert_eq!(card.name(), "Charizard");
    assert_eq!(card.set_code(), "base1");
    assert_eq!(card.number(), "004");
    assert_eq!(card.variant(), None);
    assert_eq!(card.grade(), Some("PSA 10"));
    assert_eq!(card.card_key(), "base1-004-base-psa10");
    assert_eq!(card.raw_title(), "Charizard Base Set #4 PSA 10");
    assert_eq!(card.pattern(), "name_set_hash");
    assert!(approx(card.confidence(), 0.95));
}

#[test]
fn conformance_parenthetical_dash_listing() {
    let card = normalize("Charizard (4/102) - Base Set - Holo Rare - PSA 9");
    assert_eq!(card.name(), "Charizard");
    assert_eq!(card.set_code(), "base1");
    assert_eq!(card.number(), "004");
    assert_eq!(card.variant(), Some("holo"));
    assert_eq!(card.grade(), Some("PSA 9"));
    assert_eq!(card.card_key(), "base1-004-holo-psa9");
    assert_eq!(card.pattern(), "parenthetical_dash");
    assert!(approx(card.confidence(), 1.0));
}

#[test]
fn conformance_condition_means_raw() {
    let card = normalize("Venusaur Base Set #15 Near Mint");
    assert_eq!(card.grade(), Some("raw"));
    assert_eq!(card.card_key(), "base1-015-base-raw");
    assert!(approx(card.confidence(), 0.9));

    let card = normalize("Charizard Base Set #4 PSA 10 Near Mint");
    assert_eq!(card.grade(), Some("raw"));
    assert_eq!(card.card_key(), "base1-004-base-raw");
}

#[test]
fn conformance_noisy_prefix_and_year() {
    let card = normalize("Pokemon Charizard 1998 Base Set Unlimited #004 BGS 9.5");
    assert_eq!(card.name(), "Charizard");
    assert_eq!(card.grade(), Some("BGS 9.5"));
    assert_eq!(card.card_key(), "base1-004-base-bgs95");
}

#[test]
fn conformance_table() {
    let cases = [
        ("Pikachu Jungle #60 PSA 8", "base2-060-base-psa8"),
        ("Blastoise Base Set Holo #2 BGS 9", "base1-002-holo-bgs9"),
        ("Charizard (4/102) [Base Set] Holo Rare", "base1-004-holo-raw"),
        ("Pokemon - Pikachu - 58/102 - Base Set - Common", "base1-058-common-raw"),
        ("Dark Charizard Holo #4 Team Rocket PSA 10", "base5-004-holo-psa10"),
        ("Lugia Neo Genesis 9/111 Holo First Edition", "neo1-009-holo-raw"),
        ("Alakazam (1/102) [Base Set] Holo Rare PSA 10", "base1-001-holo-psa10"),
        ("Pikachu Base Set Reverse Holo #58", "base1-058-reverse-raw"),
        ("Mew Promo #8 PSA 10", "basep-008-base-psa10"),
        ("Pikachu Base Set #25 BGS 9.5", "base1-025-base-bgs95"),
        ("Blastoise Base Set #2 CGC 8", "base1-002-base-cgc8"),
        ("Wartortle Base Set #42", "base1-042-base-raw"),
        ("Umbreon Evolving Skies #215 PSA 10", "swsh7-215-base-psa10"),
        ("Mewtwo Evolutions #51", "xy12-051-base-raw"),
        ("Gyarados Base Set 6/102 Holo PSA 9", "base1-006-holo-psa9"),
        ("Charizard 4/102 Base Set Holo", "base1-004-holo-raw"),
        ("Charizard Base Set #999 PSA 10", "base1-999-base-psa10"),
    ];
    for (title, key) in cases {
        assert_eq!(normalize(title).card_key(), key, "{title}");
    }
}

#[test]
fn conformance_multi_word_name() {
    let card = normalize("Dark Charizard Holo #4 Team Rocket PSA 10");
    assert_eq!(card.name(), "Dark Charizard");
    assert_eq!(card.pattern(), "name_variant_hash_set");
}

#[test]
fn conformance_misspelled_set() {
    let card = normalize("Charizard Base Sett #4 PSA 10");
    assert_eq!(card.set_code(), "base1");
    assert_eq!(card.card_key(), "base1-004-base-psa10");
}

#[test]
fn conformance_trailing_number_is_low_confidence() {
    let card = normalize("Pikachu Jungle 60");
    assert_eq!(card.pattern(), "name_set_trailing_number");
    assert_eq!(card.card_key(), "base2-060-base-raw");
    assert!(approx(card.confidence(), 0.65));
}

// ===========================================================================
// Failures
// ===========================================================================

#[test]
fn conformance_empty_title() {
    assert!(matches!(ENGINE.normalize(""), Err(NormalizeError::Input { .. })));
}

#[test]
fn conformance_unparseable_titles() {
    for title in [
        "Invalid title that should fail",
        "Charizard Unknown Set #4 PSA 10",
        "A #1 B",
        "123 Numbers Only #4 PSA 10",
    ] {
        let err = ENGINE.normalize(title).unwrap_err();
        assert_eq!(err.kind(), "normalization", "{title}");
        assert_eq!(err.title(), title);
    }
}

#[test]
fn conformance_zero_card_number() {
    let err = ENGINE.normalize("Charizard Base Set #0 PSA 10").unwrap_err();
    assert_eq!(err.kind(), "invariant_violation");
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn property_deterministic() {
    let a = normalize("Charizard (4/102) - Base Set - Holo Rare - PSA 9");
    let b = normalize("Charizard (4/102) - Base Set - Holo Rare - PSA 9");
    assert_eq!(a, b);
}

#[test]
fn property_key_matches_fields() {
    for title in [
        "Charizard Base Set #4 PSA 10",
        "Pikachu Base Set Reverse Holo #58",
        "Lugia Neo Genesis 9/111 Holo First Edition",
    ] {
        let card = normalize(title);
        assert_eq!(
            card.card_key(),
            card_key(card.set_code(), card.number(), card.variant(), card.grade())
        );
        assert_eq!(card.number().len(), 3);
        assert!(card.confidence() >= 0.5 && card.confidence() <= 1.0);
    }
}

#[test]
fn property_batch_preserves_order() {
    let titles = [
        "Charizard Base Set #4 PSA 10",
        "",
        "Invalid title that should fail",
        "Pikachu Jungle #60 PSA 8",
    ];
    let out = ENGINE.normalize_many(&titles);
    let keys: Vec<Option<&str>> = out.iter().map(|c| c.as_ref().map(|c| c.card_key())).collect();
    assert_eq!(
        keys,
        vec![
            Some("base1-004-base-psa10"),
            None,
            None,
            Some("base2-060-base-psa8"),
        ]
    );
}

#[test]
fn property_set_resolution() {
    assert_eq!(ENGINE.resolve_set("Base Set"), Some("base1"));
    assert_eq!(ENGINE.resolve_set("base"), Some("base1"));
    assert_eq!(ENGINE.resolve_set("Jungle"), Some("base2"));
    assert_eq!(ENGINE.resolve_set("XY Evolutions"), Some("xy12"));
    assert_eq!(ENGINE.resolve_set("jungel"), Some("base2"));
    assert_eq!(ENGINE.resolve_set("neo genisis"), Some("neo1"));
    assert_eq!(ENGINE.resolve_set("Path Champion's"), Some("swsh35"));
    assert_eq!(ENGINE.resolve_set("evolving skys"), Some("swsh7"));
    assert_eq!(ENGINE.resolve_set("yu-gi-oh legend of blue eyes"), None);
    assert_eq!(ENGINE.resolve_set("charizard"), None);
}

#[test]
fn explain_names_the_winner() {
    let explanation = ENGINE.explain("Charizard Base Set #4 PSA 10");
    assert_eq!(explanation.cleaned, "charizard base set #4 psa 10");
    assert_eq!(explanation.attempts.len(), ENGINE.pattern_count());
    assert_eq!(
        explanation.card.as_ref().map(|c| c.pattern()),
        Some("name_set_hash")
    );
}

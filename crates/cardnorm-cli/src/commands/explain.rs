use std::path::Path;

use cardnorm_core::types::AttemptOutcome;

use crate::build_normalizer;

pub fn run_explain(title: &str, rules: Option<&Path>, format: &str) -> Result<String, String> {
    let normalizer = build_normalizer(rules)?;
    let explanation = normalizer.explain(title);

    if format == "json" {
        return serde_json::to_string_pretty(&explanation)
            .map_err(|e| format!("JSON serialization error: {e}"));
    }

    let mut lines: Vec<String> = vec![
        format!("title:   {}", explanation.title),
        format!("cleaned: {}", explanation.cleaned),
    ];

    for attempt in &explanation.attempts {
        let outcome = match &attempt.outcome {
            AttemptOutcome::Candidate {
                confidence,
                card_key,
            } => format!("candidate {card_key} @ {confidence:.2}"),
            AttemptOutcome::Rejected { rejection } => format!("rejected: {rejection}"),
        };
        lines.push(format!(
            "  [{}] {} ({:.2})  {outcome}",
            attempt.position, attempt.pattern, attempt.base_confidence
        ));
    }

    match (&explanation.card, &explanation.error) {
        (Some(card), _) => lines.push(format!(
            "result:  {} ({}, confidence {:.2}, pattern {})",
            card.card_key(),
            card.name(),
            card.confidence(),
            card.pattern()
        )),
        (None, Some(error)) => lines.push(format!("error:   {error}")),
        (None, None) => {}
    }

    Ok(lines.join("\n"))
}

use std::path::Path;

use crate::build_normalizer;
use crate::reader::read_titles;

pub fn run_normalize(
    titles: &[String],
    input: Option<&Path>,
    rules: Option<&Path>,
    format: &str,
    output_file: Option<&Path>,
) -> Result<String, String> {
    let mut all_titles: Vec<String> = titles.to_vec();
    if let Some(path) = input {
        all_titles.extend(read_titles(path)?);
    }
    if all_titles.is_empty() {
        return Err("No titles given; pass titles as arguments or use --input".into());
    }

    let normalizer = build_normalizer(rules)?;

    let output = match format {
        "human" => {
            let mut lines: Vec<String> = Vec::new();
            let mut ok_count = 0;

            for title in &all_titles {
                match normalizer.normalize(title) {
                    Ok(card) => {
                        ok_count += 1;
                        lines.push(format!(
                            "{}  {} ({:.2}, {})",
                            card.card_key(),
                            card.name(),
                            card.confidence(),
                            card.pattern()
                        ));
                    }
                    Err(e) => lines.push(format!("FAILED  {e}")),
                }
            }

            let total = all_titles.len();
            let title_word = if total == 1 { "title" } else { "titles" };
            lines.push(format!("{ok_count} of {total} {title_word} normalized."));
            lines.join("\n")
        }
        _ => {
            let cards = normalizer.normalize_many(&all_titles);
            serde_json::to_string_pretty(&cards)
                .map_err(|e| format!("JSON serialization error: {e}"))?
        }
    };

    if let Some(out_path) = output_file {
        std::fs::write(out_path, &output)
            .map_err(|e| format!("Failed to write {}: {e}", out_path.display()))?;
        return Ok(format!("Written to {}", out_path.display()));
    }

    Ok(output)
}

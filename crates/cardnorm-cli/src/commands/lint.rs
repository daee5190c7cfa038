use std::path::Path;

use cardnorm_lint::{LintConfig, LintDiagnostic, LintSeverity, Linter};

use crate::reader::load_rules;

/// Lint the rule tables. Returns the rendered report and the number of
/// error-level diagnostics.
pub fn run_lint(rules: Option<&Path>, format: &str) -> Result<(String, usize), String> {
    let tables = load_rules(rules)?;

    let linter = Linter::new(LintConfig::default());
    let results = linter.lint(&tables);
    let error_count = results
        .iter()
        .filter(|d| d.severity == LintSeverity::Error)
        .count();

    let output = match format {
        "json" => serde_json::to_string_pretty(&serde_json::json!({
            "diagnostics": results,
            "summary": {
                "count": results.len(),
                "errors": error_count,
                "sets": tables.sets.len(),
                "title_patterns": tables.patterns.title_patterns.len(),
            }
        }))
        .map_err(|e| format!("JSON serialization error: {e}"))?,
        "sarif" => {
            let sarif = build_sarif(&results, &linter, rules);
            serde_json::to_string_pretty(&sarif)
                .map_err(|e| format!("SARIF serialization error: {e}"))?
        }
        _ => {
            let mut lines: Vec<String> = results
                .iter()
                .map(|d| {
                    format!(
                        "{}:{} {}[{}]: {}",
                        d.document,
                        d.location,
                        d.severity.as_str(),
                        d.rule,
                        d.message
                    )
                })
                .collect();

            let count = results.len();
            let issue_word = if count == 1 { "issue" } else { "issues" };
            lines.push(format!("{count} lint {issue_word} in rule tables."));
            lines.join("\n")
        }
    };

    Ok((output, error_count))
}

fn sarif_level(severity: &LintSeverity) -> &'static str {
    match severity {
        LintSeverity::Error => "error",
        LintSeverity::Warning => "warning",
        LintSeverity::Info => "note",
    }
}

fn build_sarif(
    results: &[LintDiagnostic],
    linter: &Linter,
    rules: Option<&Path>,
) -> serde_json::Value {
    let rule_descriptors: Vec<serde_json::Value> = linter
        .rules()
        .iter()
        .map(|r| {
            serde_json::json!({
                "id": r.id(),
                "shortDescription": { "text": r.description() },
                "defaultConfiguration": { "level": sarif_level(&r.default_severity()) }
            })
        })
        .collect();

    let base = rules.map(|p| p.to_string_lossy().replace('\\', "/"));

    let sarif_results: Vec<serde_json::Value> = results
        .iter()
        .map(|d| {
            let uri = match &base {
                Some(dir) => format!("{dir}/{}", d.document),
                None => d.document.clone(),
            };
            serde_json::json!({
                "ruleId": d.rule,
                "level": sarif_level(&d.severity),
                "message": { "text": d.message },
                "locations": [{
                    "physicalLocation": {
                        "artifactLocation": { "uri": uri }
                    },
                    "logicalLocations": [{ "fullyQualifiedName": d.location }]
                }]
            })
        })
        .collect();

    serde_json::json!({
        "$schema": "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/main/sarif-2.1/schema/sarif-schema-2.1.0.json",
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": "cardnorm-lint",
                    "version": env!("CARGO_PKG_VERSION"),
                    "rules": rule_descriptors
                }
            },
            "results": sarif_results
        }]
    })
}

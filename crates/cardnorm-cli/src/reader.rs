use std::fs;
use std::path::{Path, PathBuf};

use cardnorm_core::types::{PatternCatalog, RuleTables, SetEntry};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

const CONFIG_FILE: &str = "cardnorm.config.yaml";
const RULE_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Rule directory configuration from cardnorm.config.yaml. Paths are
/// relative to the directory holding the config.
#[derive(Debug, Deserialize)]
pub struct RulesConfig {
    pub sets: Option<String>,
    pub patterns: Option<String>,
}

// ---------------------------------------------------------------------------
// Rule tables
// ---------------------------------------------------------------------------

/// Load rule tables from `rules`, or the built-in tables when it is `None`.
///
/// A directory is read through its `cardnorm.config.yaml` if present,
/// otherwise by probing for `sets.*` and `patterns.*`. A single file is read
/// as a combined `{ sets, patterns }` document.
pub fn load_rules(rules: Option<&Path>) -> Result<RuleTables, String> {
    let Some(path) = rules else {
        return RuleTables::builtin().map_err(|e| format!("Built-in rules failed to load: {e}"));
    };

    if !path.exists() {
        return Err(format!("Path does not exist: {}", path.display()));
    }

    if path.is_file() {
        return parse_document(path);
    }

    let config_path = path.join(CONFIG_FILE);
    let (sets_path, patterns_path) = if config_path.exists() {
        let yaml = fs::read_to_string(&config_path)
            .map_err(|e| format!("Failed to read config: {e}"))?;
        let config: RulesConfig =
            serde_yaml::from_str(&yaml).map_err(|e| format!("Invalid YAML config: {e}"))?;
        (
            config.sets.map(|p| path.join(p)),
            config.patterns.map(|p| path.join(p)),
        )
    } else {
        (probe(path, "sets"), probe(path, "patterns"))
    };

    let sets_path =
        sets_path.ok_or_else(|| format!("No sets file found in {}", path.display()))?;
    let patterns_path =
        patterns_path.ok_or_else(|| format!("No patterns file found in {}", path.display()))?;

    debug!(sets = %sets_path.display(), patterns = %patterns_path.display(), "loading rules");

    let sets: Vec<SetEntry> = parse_document(&sets_path)?;
    let patterns: PatternCatalog = parse_document(&patterns_path)?;
    Ok(RuleTables { sets, patterns })
}

fn probe(dir: &Path, stem: &str) -> Option<PathBuf> {
    RULE_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|p| p.is_file())
}

/// Parse a JSON or YAML document, chosen by file extension.
fn parse_document<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .map_err(|e| format!("Invalid YAML in {}: {}", path.display(), e)),
        _ => serde_json::from_str(&content)
            .map_err(|e| format!("Invalid JSON in {}: {}", path.display(), e)),
    }
}

// ---------------------------------------------------------------------------
// Title lists
// ---------------------------------------------------------------------------

/// Read titles from a file (one per line) or from every `*.txt` file under a
/// directory, in path order. Blank lines and `#` comments are skipped.
pub fn read_titles(input_path: &Path) -> Result<Vec<String>, String> {
    if !input_path.exists() {
        return Err(format!("Path does not exist: {}", input_path.display()));
    }

    let paths = if input_path.is_dir() {
        scan_directory(input_path)?
    } else {
        vec![input_path.to_path_buf()]
    };

    let mut titles = Vec::new();
    for path in paths {
        let content = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        titles.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#'))
                .map(str::to_string),
        );
    }

    Ok(titles)
}

fn scan_directory(dir_path: &Path) -> Result<Vec<PathBuf>, String> {
    let pattern = dir_path.join("**/*.txt");
    let pattern_str = pattern.to_string_lossy().replace('\\', "/");
    let entries = glob::glob(&pattern_str).map_err(|e| format!("Invalid glob pattern: {e}"))?;

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => paths.push(path),
            Err(e) => return Err(format!("Glob error: {e}")),
        }
    }
    paths.sort();
    Ok(paths)
}

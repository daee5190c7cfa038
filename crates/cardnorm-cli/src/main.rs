mod commands;
mod reader;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cardnorm_core::{card_key, Normalizer, ENGINE_VERSION};
use reader::load_rules;

#[derive(Parser)]
#[command(
    name = "cardnorm",
    version,
    about = "Trading card title normalizer: turn marketplace listing titles into canonical card keys"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize listing titles and output parsed cards
    Normalize {
        /// Titles to normalize
        titles: Vec<String>,

        /// Read titles from a file (one per line) or a directory of .txt files
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Rule directory or combined rules file (defaults to built-in rules)
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Output format: json (default) or human
        #[arg(long, default_value = "json")]
        format: String,

        /// Write output to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show how every title pattern handles a title
    Explain {
        title: String,

        /// Rule directory or combined rules file (defaults to built-in rules)
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Output format: human (default) or json
        #[arg(long, default_value = "human")]
        format: String,
    },

    /// Print the card key for a set, number, variant and grade
    Key {
        #[arg(long)]
        set: String,

        #[arg(long)]
        number: String,

        #[arg(long)]
        variant: Option<String>,

        #[arg(long)]
        grade: Option<String>,
    },

    /// Compile rule tables and report what was loaded
    Check {
        /// Rule directory or combined rules file (defaults to built-in rules)
        #[arg(long)]
        rules: Option<PathBuf>,
    },

    /// Lint rule tables for quality issues
    Lint {
        /// Rule directory or combined rules file (defaults to built-in rules)
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Output format: human (default), json or sarif
        #[arg(long, default_value = "human")]
        format: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Normalize {
            titles,
            input,
            rules,
            format,
            output,
        } => commands::normalize::run_normalize(
            &titles,
            input.as_deref(),
            rules.as_deref(),
            &format,
            output.as_deref(),
        ),
        Commands::Explain {
            title,
            rules,
            format,
        } => commands::explain::run_explain(&title, rules.as_deref(), &format),
        Commands::Key {
            set,
            number,
            variant,
            grade,
        } => Ok(card_key(&set, &number, variant.as_deref(), grade.as_deref())),
        Commands::Check { rules } => run_check(rules.as_deref()),
        Commands::Lint { rules, format } => {
            match commands::lint::run_lint(rules.as_deref(), &format) {
                Ok((output, error_count)) => {
                    println!("{output}");
                    if error_count > 0 {
                        process::exit(1);
                    }
                    return;
                }
                Err(e) => Err(e),
            }
        }
    };

    match result {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Log to stderr so stdout stays machine-readable. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Build a normalizer from `--rules`, or the built-in tables.
pub fn build_normalizer(rules: Option<&Path>) -> Result<Normalizer, String> {
    let tables = load_rules(rules)?;
    Normalizer::new(&tables).map_err(|e| e.to_string())
}

fn run_check(rules: Option<&Path>) -> Result<String, String> {
    let tables = load_rules(rules)?;
    let normalizer = Normalizer::new(&tables).map_err(|e| e.to_string())?;
    let catalog = &tables.patterns;

    let source = match rules {
        Some(path) => path.display().to_string(),
        None => "built-in rules".to_string(),
    };

    Ok(format!(
        "{source}: {} title patterns, {} sets ({} keys), {} cleaning, {} variant, {} grade rules.\n  \
         patterns: {}\n  \
         engine:   {ENGINE_VERSION}\n\
         OK.",
        normalizer.pattern_count(),
        tables.sets.len(),
        normalizer.set_key_count(),
        catalog.cleaning_patterns.len(),
        catalog.variant_patterns.len(),
        catalog.grade_patterns.len(),
        normalizer.pattern_names().collect::<Vec<_>>().join(", "),
    ))
}

// src/bin/check_lexicon.rs
//
// Validates a lexicon file and optionally shows how it classifies sample names.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use team_grouping_lib::grouping::classify_name;
use team_grouping_lib::lexicon::Lexicon;
use team_grouping_lib::utils::config::GroupingConfig;
use team_grouping_lib::utils::env::load_env;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct CheckArgs {
    /// Lexicon file (overrides LEXICON_PATH)
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Team names to classify with the lexicon
    #[arg(long = "sample")]
    samples: Vec<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = CheckArgs::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(default_level));
    load_env();

    let config = GroupingConfig::from_env().with_overrides(args.lexicon, None);
    let lexicon = Lexicon::from_path(config.lexicon_path())
        .with_context(|| format!("Lexicon {} is not usable", config.lexicon_path().display()))?;
    lexicon.log_summary();

    println!("{}  {}", lexicon.fingerprint(), config.lexicon_path().display());
    println!(
        "  youth={} ladies={} mens={} disability={} color={} abbreviations={} suffixes={}",
        lexicon.youth_keywords().len(),
        lexicon.ladies_keywords().len(),
        lexicon.mens_keywords().len(),
        lexicon.disability_keywords().len(),
        lexicon.color_keywords().len(),
        lexicon.abbreviations().len(),
        lexicon.club_suffixes().len(),
    );

    if !args.samples.is_empty() {
        info!("Classifying {} sample names", args.samples.len());
        for sample in &args.samples {
            let classification = classify_name(sample, &lexicon);
            println!(
                "{:<40} {:<11} {}",
                sample,
                classification.category.as_str(),
                classification.club_key.label()
            );
        }
    }

    Ok(())
}

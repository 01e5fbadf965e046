use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::ProgressBar;
use log::{debug, info, warn};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use team_grouping_lib::lexicon::Lexicon;
use team_grouping_lib::session::source::JsonTeamSource;
use team_grouping_lib::session::{GroupingSession, SessionEvent, SessionStatus};
use team_grouping_lib::utils::config::GroupingConfig;
use team_grouping_lib::utils::env::load_env;
use team_grouping_lib::utils::progress_bars::progress_config::{
    print_env_config_example, ProgressConfig,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct GroupArgs {
    /// Newline-separated team names to group
    #[arg(long)]
    input: Option<PathBuf>,

    /// JSON document mapping league name to its scraped team list
    #[arg(long)]
    scraped: Option<PathBuf>,

    /// Newline-separated replacement teams for leagues that had none
    #[arg(long)]
    manual: Option<PathBuf>,

    /// Lexicon file (overrides LEXICON_PATH)
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Directory for the output files (overrides GROUPING_OUTPUT_DIR)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Print the supported progress environment variables and exit
    #[arg(long)]
    print_env_config: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn describe_event(event: &SessionEvent) -> String {
    match event {
        SessionEvent::Info { message } => message.clone(),
        SessionEvent::Progress { phase, details } => match details {
            Some(details) => format!("{}: {}", phase, details),
            None => phase.clone(),
        },
        SessionEvent::LeagueResolved { league, teams } => {
            format!("✅ {} teams found for {}", teams, league)
        }
        SessionEvent::LeagueUnresolved { league, reason } => format!("❌ {}: {}", league, reason),
        SessionEvent::AwaitingManualInput { leagues } => {
            format!("{} leagues need manual teams", leagues.len())
        }
        SessionEvent::Completed { groups, duplicates } => {
            format!("✅ {} groups, {} exact duplicates", groups, duplicates)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = GroupArgs::parse();

    // Initialize logging and environment
    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(default_level));
    load_env();

    if args.print_env_config {
        print_env_config_example();
        return Ok(());
    }

    info!("Starting team grouping");

    let config = GroupingConfig::from_env().with_overrides(args.lexicon, args.output_dir);
    config.log_config();
    config.validate()?;

    let progress_config = ProgressConfig::from_env();
    info!(
        "Progress tracking: enabled={}, show_events={}",
        progress_config.enabled, progress_config.show_events
    );

    let lexicon = Arc::new(
        Lexicon::from_path(config.lexicon_path()).context("Failed to load lexicon")?,
    );
    lexicon.log_summary();

    let (mut session, mut receiver) = GroupingSession::new(Arc::clone(&lexicon));

    let multi_progress = progress_config.create_multi_progress();
    let spinner: Option<ProgressBar> = multi_progress
        .as_ref()
        .map(|mp| progress_config.create_spinner(mp, "Starting..."));

    // Drain session events on their own task so the session never waits on output.
    let consumer_spinner = spinner.clone();
    let show_events = progress_config.should_show_events();
    let consumer = tokio::spawn(async move {
        let mut received = 0usize;
        while let Some(event) = receiver.recv().await {
            received += 1;
            debug!("Session event: {:?}", event);
            if let SessionEvent::LeagueUnresolved { league, reason } = &event {
                warn!("League unresolved: {} ({})", league, reason);
            }
            if show_events {
                if let Some(pb) = &consumer_spinner {
                    pb.set_message(describe_event(&event));
                }
            }
        }
        received
    });

    if let Some(path) = &args.input {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read team names from {}", path.display()))?;
        session.add_teams(raw.lines());
    }

    if let Some(path) = &args.scraped {
        let source = JsonTeamSource::from_path(path)?;
        let leagues = source.leagues();
        session.collect_from(&source, &leagues);
    }

    if let Some(path) = &args.manual {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manual teams from {}", path.display()))?;
        let added = session.add_manual_teams(&text);
        info!("{} manual teams read from {}", added, path.display());
    }

    match session.status() {
        SessionStatus::NothingCollected => {
            bail!("No teams were collected; pass --input, --scraped or --manual")
        }
        SessionStatus::AwaitingManualInput(leagues) => warn!(
            "{} leagues have no teams and no --manual file was given; grouping without them",
            leagues.len()
        ),
        SessionStatus::Ready => {}
    }

    let result = session.finalize();
    let received = consumer.await.context("Session event consumer failed")?;
    debug!("Consumed {} session events", received);

    if let Some(pb) = &spinner {
        pb.finish_with_message(format!(
            "Grouped into {} groups",
            result.report.grouped.len()
        ));
    }

    let grouped_path = config.grouped_output_path();
    let json = serde_json::to_string_pretty(&result).context("Failed to serialize grouping report")?;
    fs::write(&grouped_path, json)
        .with_context(|| format!("Failed to write {}", grouped_path.display()))?;
    info!("Grouped output saved: {}", grouped_path.display());

    if !result.unresolved_leagues.is_empty() {
        let unresolved_path = config.unresolved_leagues_path();
        let json = serde_json::to_string_pretty(&result.unresolved_leagues)
            .context("Failed to serialize unresolved leagues")?;
        fs::write(&unresolved_path, json)
            .with_context(|| format!("Failed to write {}", unresolved_path.display()))?;
        info!(
            "{} leagues had no teams and were saved to {}",
            result.unresolved_leagues.len(),
            unresolved_path.display()
        );
    }

    println!("Run {}", result.run_id);
    println!("  Groups: {}", result.report.grouped.len());
    println!("  Teams grouped: {}", result.report.total_members());
    println!("  Exact duplicates: {}", result.report.duplicates.len());
    println!("  Unresolved leagues: {}", result.unresolved_leagues.len());
    println!("  Output: {}", grouped_path.display());

    Ok(())
}

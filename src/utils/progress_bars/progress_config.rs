// src/utils/progress_bars/progress_config.rs

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::env;
use std::str::FromStr;
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] {msg}";

/// Terminal progress settings for the grouping binaries
#[derive(Debug, Clone)]
pub struct ProgressConfig {
    /// Draw a spinner at all
    pub enabled: bool,
    /// Spinner tick interval in milliseconds
    pub refresh_rate_ms: u64,
    /// Echo each session event into the spinner message
    pub show_events: bool,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            refresh_rate_ms: 100,
            show_events: true,
        }
    }
}

// Unset or unparsable values fall back to the default.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

impl ProgressConfig {
    /// Reads `PROGRESS_ENABLED`, `PROGRESS_REFRESH_RATE_MS` and `PROGRESS_SHOW_EVENTS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: env_or("PROGRESS_ENABLED", defaults.enabled),
            refresh_rate_ms: env_or("PROGRESS_REFRESH_RATE_MS", defaults.refresh_rate_ms),
            show_events: env_or("PROGRESS_SHOW_EVENTS", defaults.show_events),
        }
    }

    /// Create a MultiProgress instance if progress is enabled, None otherwise
    pub fn create_multi_progress(&self) -> Option<MultiProgress> {
        self.enabled.then(MultiProgress::new)
    }

    /// Adds a ticking spinner to `multi_progress`
    pub fn create_spinner(&self, multi_progress: &MultiProgress, message: &str) -> ProgressBar {
        let spinner = multi_progress.add(ProgressBar::new_spinner());
        if let Ok(style) = ProgressStyle::default_spinner().template(SPINNER_TEMPLATE) {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(Duration::from_millis(self.refresh_rate_ms.max(1)));
        spinner.set_message(message.to_string());
        spinner
    }

    pub fn should_show_events(&self) -> bool {
        self.enabled && self.show_events
    }
}

/// Prints every environment variable the grouping binaries read
pub fn print_env_config_example() {
    println!("# Team grouping configuration");
    println!();
    println!("# Lexicon document (default: keywords.json)");
    println!("export LEXICON_PATH=keywords.json");
    println!();
    println!("# Directory for grouped_output.json / unresolved_leagues.json (default: .)");
    println!("export GROUPING_OUTPUT_DIR=.");
    println!();
    println!("# Draw a spinner while grouping (default: true)");
    println!("export PROGRESS_ENABLED=true");
    println!();
    println!("# Spinner tick interval in milliseconds (default: 100)");
    println!("export PROGRESS_REFRESH_RATE_MS=100");
    println!();
    println!("# Show session events in the spinner (default: true)");
    println!("export PROGRESS_SHOW_EVENTS=true");
    println!();
    println!("# Plain log output only (CI/automated environments):");
    println!("export PROGRESS_ENABLED=false");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_env_values_and_fallbacks() {
        env::set_var("PROGRESS_ENABLED", "false");
        env::set_var("PROGRESS_REFRESH_RATE_MS", "50");
        env::set_var("PROGRESS_SHOW_EVENTS", "not-a-bool");

        let config = ProgressConfig::from_env();
        assert!(!config.enabled);
        assert_eq!(config.refresh_rate_ms, 50);
        assert!(config.show_events);

        // Clean up
        env::remove_var("PROGRESS_ENABLED");
        env::remove_var("PROGRESS_REFRESH_RATE_MS");
        env::remove_var("PROGRESS_SHOW_EVENTS");
    }

    #[test]
    fn test_disabled_config_draws_nothing() {
        let mut config = ProgressConfig::default();
        assert!(config.create_multi_progress().is_some());
        assert!(config.should_show_events());

        config.enabled = false;
        assert!(config.create_multi_progress().is_none());
        assert!(!config.should_show_events());
    }

    #[test]
    fn test_events_can_be_hidden() {
        let config = ProgressConfig {
            show_events: false,
            ..ProgressConfig::default()
        };
        assert!(!config.should_show_events());
    }

    #[test]
    fn test_spinner_carries_message() {
        let config = ProgressConfig::default();
        let multi_progress = MultiProgress::with_draw_target(indicatif::ProgressDrawTarget::hidden());
        let spinner = config.create_spinner(&multi_progress, "Collecting");
        assert_eq!(spinner.message(), "Collecting");
        spinner.finish_and_clear();
    }
}

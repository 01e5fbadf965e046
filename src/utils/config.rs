//! Run configuration for the grouping binaries.
//! Values come from the environment (optionally a `.env` file) and can be
//! overridden from the command line.

use anyhow::{bail, Result};
use log::{debug, info};
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_LEXICON_PATH: &str = "keywords.json";
pub const GROUPED_OUTPUT_FILE: &str = "grouped_output.json";
pub const UNRESOLVED_LEAGUES_FILE: &str = "unresolved_leagues.json";

#[derive(Debug, Clone)]
pub struct GroupingConfig {
    pub lexicon_path: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            lexicon_path: PathBuf::from(DEFAULT_LEXICON_PATH),
            output_dir: PathBuf::from("."),
        }
    }
}

impl GroupingConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let lexicon_path = env::var("LEXICON_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LEXICON_PATH));
        let output_dir = env::var("GROUPING_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        debug!(
            "Grouping config: lexicon={}, output_dir={}",
            lexicon_path.display(),
            output_dir.display()
        );

        Self {
            lexicon_path,
            output_dir,
        }
    }

    /// Applies command-line overrides on top of the environment values
    pub fn with_overrides(mut self, lexicon_path: Option<PathBuf>, output_dir: Option<PathBuf>) -> Self {
        if let Some(path) = lexicon_path {
            self.lexicon_path = path;
        }
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        self
    }

    /// The output directory must exist before any grouping work starts
    pub fn validate(&self) -> Result<()> {
        if !self.output_dir.is_dir() {
            bail!(
                "Output directory {} does not exist",
                self.output_dir.display()
            );
        }
        Ok(())
    }

    pub fn grouped_output_path(&self) -> PathBuf {
        self.output_dir.join(GROUPED_OUTPUT_FILE)
    }

    pub fn unresolved_leagues_path(&self) -> PathBuf {
        self.output_dir.join(UNRESOLVED_LEAGUES_FILE)
    }

    pub fn lexicon_path(&self) -> &Path {
        &self.lexicon_path
    }

    /// Log the current configuration
    pub fn log_config(&self) {
        info!("⚙️  Grouping configuration");
        info!("   Lexicon: {}", self.lexicon_path.display());
        info!("   Output directory: {}", self.output_dir.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_config_from_env() {
        env::remove_var("LEXICON_PATH");
        env::remove_var("GROUPING_OUTPUT_DIR");
        let config = GroupingConfig::from_env();
        assert_eq!(config.lexicon_path, PathBuf::from("keywords.json"));
        assert_eq!(config.output_dir, PathBuf::from("."));

        env::set_var("LEXICON_PATH", "/etc/grouping/keywords.json");
        env::set_var("GROUPING_OUTPUT_DIR", "/tmp/grouping");
        let config = GroupingConfig::from_env();
        assert_eq!(config.lexicon_path, PathBuf::from("/etc/grouping/keywords.json"));
        assert_eq!(
            config.grouped_output_path(),
            PathBuf::from("/tmp/grouping/grouped_output.json")
        );

        // Cleanup
        env::remove_var("LEXICON_PATH");
        env::remove_var("GROUPING_OUTPUT_DIR");
    }

    #[test]
    fn test_overrides_win() {
        let config = GroupingConfig::default()
            .with_overrides(Some(PathBuf::from("custom.json")), None);
        assert_eq!(config.lexicon_path(), Path::new("custom.json"));
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(
            config.unresolved_leagues_path(),
            PathBuf::from("./unresolved_leagues.json")
        );
    }

    #[test]
    fn test_validate_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = GroupingConfig::default().with_overrides(None, Some(dir.path().to_path_buf()));
        assert!(config.validate().is_ok());

        let missing = GroupingConfig::default()
            .with_overrides(None, Some(dir.path().join("does-not-exist")));
        assert!(missing.validate().is_err());
    }
}

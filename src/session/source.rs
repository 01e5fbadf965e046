// src/session/source.rs - Where league team lists come from

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Supplies the team names of one league. An empty list or an error marks
/// the league as unresolved; neither is ever turned into a team name.
pub trait TeamSource {
    fn teams_for_league(&self, league: &str) -> Result<Vec<String>>;
}

/// Offline source over a JSON document mapping league name to team list.
///
/// `null` or `[]` for a league means the lookup found nothing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct JsonTeamSource {
    leagues: BTreeMap<String, Option<Vec<String>>>,
}

impl JsonTeamSource {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scraped teams from {}", path.display()))?;
        let source = Self::from_json_str(&raw)
            .with_context(|| format!("Invalid scraped teams document {}", path.display()))?;
        info!(
            "Loaded scraped teams for {} leagues from {}",
            source.leagues.len(),
            path.display()
        );
        Ok(source)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Failed to parse scraped teams JSON")
    }

    /// League names in document order (alphabetical).
    pub fn leagues(&self) -> Vec<String> {
        self.leagues.keys().cloned().collect()
    }
}

impl TeamSource for JsonTeamSource {
    fn teams_for_league(&self, league: &str) -> Result<Vec<String>> {
        let teams = match self.leagues.get(league) {
            Some(Some(teams)) => teams.clone(),
            Some(None) => Vec::new(),
            None => anyhow::bail!("League '{}' is not present in the scraped data", league),
        };
        debug!("League '{}' has {} scraped teams", league, teams.len());
        Ok(teams)
    }
}

// src/session/mod.rs - One grouping submission: collect, pause for manual input, finalize

pub mod source;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

use crate::grouping::assemble::GroupingReport;
use crate::grouping::group_with_progress;
use crate::lexicon::Lexicon;
use crate::utils::progress_bars::logging::{log_session_completion, log_session_start};
use crate::utils::progress_bars::progress_callback::{ProgressCallback, ProgressTracker};

use self::source::TeamSource;

/// Everything a consumer needs to show a session's progress live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Info { message: String },
    Progress { phase: String, details: Option<String> },
    LeagueResolved { league: String, teams: usize },
    LeagueUnresolved { league: String, reason: String },
    AwaitingManualInput { leagues: Vec<String> },
    Completed { groups: usize, duplicates: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// No teams collected and no league left unresolved.
    NothingCollected,
    /// Some leagues produced no teams and no manual replacement has been given yet.
    AwaitingManualInput(Vec<String>),
    Ready,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub report: GroupingReport,
    pub unresolved_leagues: Vec<String>,
}

pub struct GroupingSession {
    run_id: Uuid,
    started_at: DateTime<Utc>,
    lexicon: Arc<Lexicon>,
    teams: Vec<String>,
    unresolved: Vec<String>,
    manual_submitted: bool,
    events: UnboundedSender<SessionEvent>,
}

impl GroupingSession {
    /// Starts a session. The receiver yields every event the session produces
    /// until the session is finalized or dropped.
    pub fn new(lexicon: Arc<Lexicon>) -> (Self, UnboundedReceiver<SessionEvent>) {
        let (events, receiver) = unbounded_channel();
        let session = Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            lexicon,
            teams: Vec::new(),
            unresolved: Vec::new(),
            manual_submitted: false,
            events,
        };
        debug!("Created grouping session {}", session.run_id);
        (session, receiver)
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn collected_teams(&self) -> &[String] {
        &self.teams
    }

    pub fn unresolved_leagues(&self) -> &[String] {
        &self.unresolved
    }

    fn emit(&self, event: SessionEvent) {
        if self.events.send(event).is_err() {
            debug!("Session {} event dropped: receiver closed", self.run_id);
        }
    }

    fn info(&self, message: impl Into<String>) {
        self.emit(SessionEvent::Info {
            message: message.into(),
        });
    }

    fn progress_callback(&self) -> ProgressCallback {
        let events = self.events.clone();
        Arc::new(move |phase: String, details: Option<String>| {
            let _ = events.send(SessionEvent::Progress { phase, details });
        })
    }

    /// Adds names supplied directly, bypassing any league lookup.
    pub fn add_teams<I, S>(&mut self, teams: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let before = self.teams.len();
        self.teams.extend(teams.into_iter().map(Into::into));
        let added = self.teams.len() - before;
        if added > 0 {
            self.info(format!("{} teams added directly", added));
        }
    }

    /// Looks up every league in `source`. A league with no teams, or whose
    /// lookup failed, is recorded as unresolved instead of aborting the session.
    pub fn collect_from<T: TeamSource + ?Sized>(&mut self, source: &T, leagues: &[String]) {
        log_session_start(&self.run_id.to_string(), leagues.len(), self.teams.len());
        self.info(format!("{} leagues found", leagues.len()));

        let mut tracker = ProgressTracker::new(Some(self.progress_callback()));
        tracker.set_phase("Collecting", None);

        let total = leagues.len();
        for (index, league) in leagues.iter().enumerate() {
            self.info(format!("[{}/{}] Processing league: {}", index + 1, total, league));
            match source.teams_for_league(league) {
                Ok(teams) if teams.is_empty() => {
                    warn!("No teams found for league '{}'", league);
                    self.unresolved.push(league.clone());
                    self.emit(SessionEvent::LeagueUnresolved {
                        league: league.clone(),
                        reason: "No teams found for this league".to_string(),
                    });
                }
                Ok(teams) => {
                    info!("{} teams found for league '{}'", teams.len(), league);
                    self.emit(SessionEvent::LeagueResolved {
                        league: league.clone(),
                        teams: teams.len(),
                    });
                    self.teams.extend(teams);
                }
                Err(e) => {
                    warn!("Failed to collect league '{}': {:#}", league, e);
                    self.unresolved.push(league.clone());
                    self.emit(SessionEvent::LeagueUnresolved {
                        league: league.clone(),
                        reason: format!("Error collecting league: {:#}", e),
                    });
                }
            }
            tracker.update_progress(index + 1, total);
        }

        tracker.finish_phase(&format!(
            "{} teams collected, {} leagues unresolved",
            self.teams.len(),
            self.unresolved.len()
        ));
        debug!("Session {} left phase {}", self.run_id, tracker.current_phase());

        if self.teams.is_empty() && self.unresolved.is_empty() {
            self.info("No teams were collected from any league");
        } else if !self.unresolved.is_empty() {
            self.emit(SessionEvent::AwaitingManualInput {
                leagues: self.unresolved.clone(),
            });
        }
    }

    pub fn status(&self) -> SessionStatus {
        if self.teams.is_empty() && self.unresolved.is_empty() {
            SessionStatus::NothingCollected
        } else if !self.unresolved.is_empty() && !self.manual_submitted {
            SessionStatus::AwaitingManualInput(self.unresolved.clone())
        } else {
            SessionStatus::Ready
        }
    }

    /// Takes newline-separated replacement teams for the unresolved leagues.
    /// Lines are trimmed and blank lines dropped. Returns how many were added.
    pub fn add_manual_teams(&mut self, text: &str) -> usize {
        self.info("Processing manual input...");
        let manual: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        let added = manual.len();
        self.teams.extend(manual);
        self.manual_submitted = true;
        info!("{} manual teams added to session {}", added, self.run_id);
        added
    }

    /// Runs the grouping over everything collected and closes the session.
    pub fn finalize(self) -> SessionReport {
        self.info("Grouping teams...");
        let report = group_with_progress(&self.teams, &self.lexicon, Some(self.progress_callback()));

        let finished_at = Utc::now();
        let duration = (finished_at - self.started_at)
            .to_std()
            .unwrap_or_default();
        log_session_completion(
            &self.run_id.to_string(),
            duration,
            report.grouped.len(),
            report.duplicates.len(),
            &self.unresolved,
        );

        self.emit(SessionEvent::Completed {
            groups: report.grouped.len(),
            duplicates: report.duplicates.len(),
        });

        SessionReport {
            run_id: self.run_id,
            started_at: self.started_at,
            finished_at,
            report,
            unresolved_leagues: self.unresolved,
        }
    }
}

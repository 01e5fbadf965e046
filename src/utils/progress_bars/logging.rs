// src/utils/progress_bars/logging.rs - Logging helpers for grouping runs
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::grouping::category::Category;

#[derive(Clone)]
pub struct GroupingLogger {
    stage_name: &'static str,
    stage_emoji: &'static str,
    start_time: Instant,
}

impl Default for GroupingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupingLogger {
    pub fn new() -> Self {
        Self {
            stage_name: "GROUPING",
            stage_emoji: "🏷️",
            start_time: Instant::now(),
        }
    }

    pub fn log_start(&self, raw_count: usize, lexicon_fingerprint: &str) {
        info!(
            "[{}] {} 🚀 Starting team grouping for {} raw names (lexicon {})",
            self.stage_name, self.stage_emoji, raw_count, lexicon_fingerprint
        );
    }

    pub fn log_phase(&self, phase: &str, details: Option<&str>) {
        let elapsed = self.start_time.elapsed();
        let msg = if let Some(details) = details {
            format!(
                "[{}] {} 🔄 Phase: {} - {} [+{:.1}s]",
                self.stage_name, self.stage_emoji, phase, details, elapsed.as_secs_f32()
            )
        } else {
            format!(
                "[{}] {} 🔄 Phase: {} [+{:.1}s]",
                self.stage_name, self.stage_emoji, phase, elapsed.as_secs_f32()
            )
        };
        info!("{}", msg);
    }

    pub fn log_dedup_results(&self, unique: usize, duplicated_names: usize, blanks_skipped: usize) {
        info!(
            "[{}] {} 📊 {} unique names, {} names repeated exactly",
            self.stage_name, self.stage_emoji, unique, duplicated_names
        );
        if blanks_skipped > 0 {
            self.log_data_quality_issue("blank names skipped", blanks_skipped);
        }
    }

    pub fn log_category_breakdown(&self, counts: &BTreeMap<Category, usize>) {
        let parts: Vec<String> = counts
            .iter()
            .map(|(category, count)| format!("{} {}", category, count))
            .collect();
        info!(
            "[{}] {} 🧭 Categories: {}",
            self.stage_name,
            self.stage_emoji,
            if parts.is_empty() { "none".to_string() } else { parts.join(", ") }
        );
    }

    pub fn log_merge_results(&self, club_buckets: usize, merged_groups: usize) {
        info!(
            "[{}] {} 🔗 Merge: {} club buckets → {} canonical groups ({} merged away)",
            self.stage_name,
            self.stage_emoji,
            club_buckets,
            merged_groups,
            club_buckets.saturating_sub(merged_groups)
        );
    }

    pub fn log_progress_update(&self, current: usize, total: usize) {
        // Only log every 5000 items to avoid spam, but always log milestone percentages
        let should_log = current % 5000 == 0
            || current == total
            || (total >= 100 && current % (total / 10) == 0);

        if should_log && current > 0 {
            let percent = (current as f64 / total as f64) * 100.0;
            debug!(
                "[{}] {} 📊 Progress: {}/{} ({:.1}%)",
                self.stage_name, self.stage_emoji, current, total, percent
            );
        }
    }

    pub fn log_completion(&self, groups: usize, members: usize, duplicates: usize) {
        let duration = self.start_time.elapsed();
        info!(
            "[{}] {} 🎉 COMPLETED: {} groups covering {} names in {:.2?}",
            self.stage_name, self.stage_emoji, groups, members, duration
        );
        if duplicates > 0 {
            info!(
                "[{}] {} 📋 {} exact duplicates reported",
                self.stage_name, self.stage_emoji, duplicates
            );
        }
    }

    pub fn log_data_quality_issue(&self, issue_type: &str, count: usize) {
        if count > 0 {
            warn!(
                "[{}] {} ⚠️  Data quality: {} instances of {}",
                self.stage_name, self.stage_emoji, count, issue_type
            );
        }
    }

    pub fn log_debug(&self, message: &str) {
        debug!("[{}] {} {}", self.stage_name, self.stage_emoji, message);
    }
}

// Session-level logging functions
pub fn log_session_start(run_id: &str, league_count: usize, direct_names: usize) {
    info!("🚀 ===== TEAM GROUPING SESSION STARTING =====");
    info!("📅 Session Run ID: {}", run_id);
    info!("   • {} leagues to collect", league_count);
    info!("   • {} names supplied directly", direct_names);
    info!("================================================");
}

pub fn log_session_completion(
    run_id: &str,
    duration: std::time::Duration,
    groups: usize,
    duplicates: usize,
    unresolved_leagues: &[String],
) {
    info!("🎉 ===== TEAM GROUPING SESSION COMPLETED =====");
    info!("📅 Session Run ID: {}", run_id);
    info!("⏱️  Total Duration: {:.2?}", duration);
    info!("🎯 Groups: {}", groups);
    info!("📋 Exact duplicates: {}", duplicates);
    if unresolved_leagues.is_empty() {
        info!("✅ All leagues resolved");
    } else {
        warn!("⚠️  {} leagues had no teams:", unresolved_leagues.len());
        for league in unresolved_leagues {
            warn!("   • {}", league);
        }
    }
    info!("================================================");
}

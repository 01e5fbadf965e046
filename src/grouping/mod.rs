// src/grouping/mod.rs - Team name grouping pipeline
//
// raw names -> exact-duplicate scan -> clean / categorize / extract per name
// -> club buckets -> merge -> grouped + duplicate tables

pub mod assemble;
pub mod category;
pub mod clean;
pub mod duplicates;
pub mod extract;
pub mod merge;
pub mod normalize;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};

use crate::lexicon::Lexicon;
use crate::utils::progress_bars::logging::GroupingLogger;
use crate::update_progress;
use crate::utils::progress_bars::progress_callback::{ProgressCallback, ProgressTracker};

use self::assemble::{assemble_report, GroupingReport};
use self::category::{categorize, Category};
use self::clean::{clean_club_name, collapse_whitespace};
use self::duplicates::scan_duplicates;
use self::extract::extract_base_club_name;
use self::merge::merge_buckets;
use self::normalize::normalize_club_key;

// Matched against the raw name, before cleaning removes it.
static FC_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(F\.?C\.?)\s+").unwrap());

const CLASSIFY_REPORT_INTERVAL: usize = 100;

/// Bucket identity of a single name before merging.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClubKey {
    pub name: String,
    pub category: Category,
}

impl ClubKey {
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.category)
    }
}

/// Everything decided about one raw name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameClassification {
    pub cleaned: String,
    pub category: Category,
    pub club_name: String,
    /// Club name with any leading "FC"/"F.C." of the raw name restored.
    pub display_name: String,
    pub club_key: ClubKey,
}

/// Classifies one non-blank raw name. Pure in `(raw, lexicon)`.
pub fn classify_name(raw: &str, lexicon: &Lexicon) -> NameClassification {
    let mut cleaned = clean_club_name(raw, lexicon);
    let fell_back = cleaned.is_empty();
    if fell_back {
        // The whole name was club-type tokens ("FC", "A.F.C."). The raw text
        // already carries any FC prefix.
        cleaned = collapse_whitespace(raw);
    }

    let category = categorize(&cleaned, lexicon);
    let stop_keywords = match category {
        Category::Youth => lexicon.youth_keywords(),
        _ => lexicon.combined_keywords(),
    };
    let club_name = extract_base_club_name(
        &cleaned,
        stop_keywords,
        lexicon.combined_keywords(),
        lexicon.club_suffixes(),
    );

    let prefix = if fell_back {
        None
    } else {
        FC_PREFIX.captures(raw).and_then(|caps| caps.get(1))
    };
    let display_name = match prefix {
        Some(prefix) => format!("{} {}", prefix.as_str(), club_name),
        None => club_name.clone(),
    };

    let club_key = ClubKey {
        name: normalize_club_key(&display_name),
        category,
    };

    NameClassification {
        cleaned,
        category,
        club_name,
        display_name,
        club_key,
    }
}

/// Groups raw team names into canonical club/category rows and reports
/// exact duplicates.
pub fn group<S: AsRef<str>>(names: &[S], lexicon: &Lexicon) -> GroupingReport {
    group_with_progress(names, lexicon, None)
}

pub fn group_with_progress<S: AsRef<str>>(
    names: &[S],
    lexicon: &Lexicon,
    progress_callback: Option<ProgressCallback>,
) -> GroupingReport {
    let logger = GroupingLogger::new();
    logger.log_start(names.len(), lexicon.short_fingerprint());

    logger.log_phase("Deduplicating", None);
    update_progress!(progress_callback, "Deduplicating", format!("{} raw names", names.len()));
    let scan = scan_duplicates(names);
    logger.log_dedup_results(
        scan.unique_names.len(),
        scan.duplicates.len(),
        scan.blank_names_skipped,
    );

    let total = scan.unique_names.len();
    let classifying_details = format!("{} unique names", total);
    logger.log_phase("Classifying", Some(classifying_details.as_str()));
    let mut tracker = ProgressTracker::with_interval(progress_callback.clone(), CLASSIFY_REPORT_INTERVAL);
    tracker.set_phase("Classifying", Some(classifying_details.as_str()));
    let mut buckets: HashMap<String, Vec<String>> = HashMap::new();
    let mut category_counts: BTreeMap<Category, usize> = BTreeMap::new();

    for (index, raw) in scan.unique_names.iter().enumerate() {
        let classification = classify_name(raw, lexicon);
        logger.log_debug(&format!(
            "'{}' -> '{}' [{}] as {}",
            raw,
            classification.cleaned,
            classification.category,
            classification.club_key.label()
        ));

        *category_counts.entry(classification.category).or_insert(0) += 1;
        buckets
            .entry(classification.club_key.label())
            .or_default()
            .push(raw.clone());

        tracker.update_progress(index + 1, total);
        logger.log_progress_update(index + 1, total);
    }
    tracker.finish_phase(&format!("{} club buckets", buckets.len()));
    logger.log_category_breakdown(&category_counts);

    let bucket_count = buckets.len();
    logger.log_phase("Merging", Some(format!("{} club buckets", bucket_count).as_str()));
    update_progress!(progress_callback, "Merging", format!("{} club buckets", bucket_count));
    let merged = merge_buckets(buckets);
    logger.log_merge_results(bucket_count, merged.len());

    logger.log_phase("Assembling", None);
    update_progress!(progress_callback, "Assembling");
    let report = assemble_report(lexicon.fingerprint(), merged, scan.duplicates);
    debug_assert_eq!(report.total_members(), total);
    debug!("Grouping produced {} rows", report.grouped.len());

    logger.log_completion(
        report.grouped.len(),
        report.total_members(),
        report.duplicates.len(),
    );
    report
}

// src/grouping/assemble.rs - Output tables

use serde::{Deserialize, Serialize};

use super::duplicates::DuplicateRecord;
use super::merge::GroupBucket;

/// One row of the grouped table: `"<name> (<category>)"`, member count and
/// the members joined with ", ".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedRow {
    pub label: String,
    pub count: usize,
    pub members: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateRow {
    pub name: String,
    pub occurrences: usize,
}

/// Both output tables of one grouping run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingReport {
    /// Fingerprint of the lexicon that produced this report.
    pub lexicon_fingerprint: String,
    pub grouped: Vec<GroupedRow>,
    pub duplicates: Vec<DuplicateRow>,
}

impl GroupingReport {
    /// Sum of member counts across all groups.
    pub fn total_members(&self) -> usize {
        self.grouped.iter().map(|row| row.count).sum()
    }

    pub fn find_group(&self, label: &str) -> Option<&GroupedRow> {
        self.grouped.iter().find(|row| row.label == label)
    }
}

pub fn assemble_report(
    lexicon_fingerprint: &str,
    buckets: Vec<GroupBucket>,
    duplicates: Vec<DuplicateRecord>,
) -> GroupingReport {
    let mut grouped: Vec<GroupedRow> = buckets
        .into_iter()
        .map(|bucket| GroupedRow {
            label: bucket.key.label(),
            count: bucket.members.len(),
            members: bucket.members.join(", "),
        })
        .collect();
    grouped.sort_by(|a, b| a.label.cmp(&b.label));

    let duplicates = duplicates
        .into_iter()
        .filter(|record| record.occurrences > 1)
        .map(|record| DuplicateRow {
            name: record.name,
            occurrences: record.occurrences,
        })
        .collect();

    GroupingReport {
        lexicon_fingerprint: lexicon_fingerprint.to_string(),
        grouped,
        duplicates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::merge::MergeKey;

    #[test]
    fn test_rows_are_labelled_and_joined() {
        let buckets = vec![
            GroupBucket {
                key: MergeKey::from_bucket_label("KINGS (Mens)"),
                members: vec!["Kings".to_string(), "Kings FC".to_string()],
            },
            GroupBucket {
                key: MergeKey::from_bucket_label("CITY (Youth)"),
                members: vec!["City U12".to_string()],
            },
        ];
        let report = assemble_report("abc", buckets, Vec::new());

        assert_eq!(report.grouped[0].label, "CITY (Youth)");
        assert_eq!(report.grouped[1].members, "Kings, Kings FC");
        assert_eq!(report.grouped[1].count, 2);
        assert_eq!(report.total_members(), 3);
        assert!(report.duplicates.is_empty());
        assert_eq!(report.find_group("KINGS (Mens)").map(|r| r.count), Some(2));
    }

    #[test]
    fn test_single_occurrences_are_not_duplicates() {
        let records = vec![
            DuplicateRecord {
                name: "Kings".to_string(),
                occurrences: 3,
            },
            DuplicateRecord {
                name: "City".to_string(),
                occurrences: 1,
            },
        ];
        let report = assemble_report("abc", Vec::new(), records);
        assert_eq!(
            report.duplicates,
            vec![DuplicateRow {
                name: "Kings".to_string(),
                occurrences: 3
            }]
        );
    }
}

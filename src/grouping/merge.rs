// src/grouping/merge.rs - Union of club buckets that share a canonical identity

use log::debug;
use std::collections::BTreeMap;
use std::fmt;

use super::normalize::normalize_club_key;
use crate::lexicon::vocabulary::split_qualifier_tail;

/// Canonical (club, category) identity a bucket is merged under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MergeKey {
    pub name: String,
    /// Empty when the bucket label carried no "(category)" suffix.
    pub category: String,
}

impl MergeKey {
    /// Builds the merge key for a bucket label such as `"KINGS FC (Mens)"`.
    pub fn from_bucket_label(label: &str) -> Self {
        let (club, category) = match label.rsplit_once('(') {
            Some((club, category)) => (
                club.trim(),
                category.trim_end_matches(')').trim().to_string(),
            ),
            None => (label, String::new()),
        };

        let name = match split_qualifier_tail(club) {
            Some((base, tail)) => normalize_club_key(&format!("{}{}", base, tail.unwrap_or(""))),
            None => normalize_club_key(club),
        };

        Self { name, category }
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MergeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.category.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.category)
        }
    }
}

/// Members of one merged group, sorted alphabetically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBucket {
    pub key: MergeKey,
    pub members: Vec<String>,
}

/// Unions buckets whose labels normalize to the same [`MergeKey`].
///
/// Output is ordered by label. The total number of members is unchanged.
pub fn merge_buckets<I>(buckets: I) -> Vec<GroupBucket>
where
    I: IntoIterator<Item = (String, Vec<String>)>,
{
    let mut merged: BTreeMap<String, GroupBucket> = BTreeMap::new();
    for (label, members) in buckets {
        let key = MergeKey::from_bucket_label(&label);
        let merged_label = key.label();
        if merged_label != label {
            debug!("Merging bucket '{}' into '{}'", label, merged_label);
        }
        merged
            .entry(merged_label)
            .or_insert_with(|| GroupBucket {
                key,
                members: Vec::new(),
            })
            .members
            .extend(members);
    }

    merged
        .into_values()
        .map(|mut bucket| {
            bucket.members.sort();
            bucket
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(label: &str, members: &[&str]) -> (String, Vec<String>) {
        (
            label.to_string(),
            members.iter().map(|m| m.to_string()).collect(),
        )
    }

    #[test]
    fn test_parses_category_suffix() {
        let key = MergeKey::from_bucket_label("KINGS FC (Mens)");
        assert_eq!(key.name, "KINGS FC");
        assert_eq!(key.category, "Mens");
        assert_eq!(key.label(), "KINGS FC (Mens)");

        let key = MergeKey::from_bucket_label("Kings United");
        assert_eq!(key.name, "KINGS UNITED");
        assert_eq!(key.category, "");
        assert_eq!(key.label(), "KINGS UNITED");
    }

    #[test]
    fn test_qualifier_survives_merge_key() {
        let key = MergeKey::from_bucket_label("KINGS Reserves (Mens)");
        assert_eq!(key.label(), "KINGS Reserves (Mens)");
    }

    #[test]
    fn test_equivalent_keys_are_unified() {
        let merged = merge_buckets(vec![
            bucket("Kings J.F.C. (Mens)", &["Kings JFC"]),
            bucket("KINGS FC (Mens)", &["Kings FC", "Kings F.C."]),
            bucket("kings f c (Ladies)", &["Kings Ladies"]),
        ]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].key.label(), "KINGS FC (Ladies)");
        assert_eq!(merged[1].key.label(), "KINGS FC (Mens)");
        assert_eq!(merged[1].members, vec!["Kings F.C.", "Kings FC", "Kings JFC"]);
    }

    #[test]
    fn test_member_count_is_preserved() {
        let input = vec![
            bucket("KINGS (Mens)", &["Kings", "Kings FC"]),
            bucket("kings (Mens)", &["kings"]),
            bucket("CITY (Youth)", &["City U12"]),
            bucket("CITY Colts (Youth)", &["City Colts U10"]),
        ];
        let before: usize = input.iter().map(|(_, m)| m.len()).sum();
        let merged = merge_buckets(input);
        let after: usize = merged.iter().map(|b| b.members.len()).sum();
        assert_eq!(before, after);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_output_sorted_by_label() {
        let merged = merge_buckets(vec![
            bucket("ZEBRAS (Mens)", &["Zebras"]),
            bucket("ALPHA (Youth)", &["Alpha U9"]),
            bucket("ALPHA (Ladies)", &["Alpha Ladies"]),
        ]);
        let labels: Vec<String> = merged.iter().map(|b| b.key.label()).collect();
        assert_eq!(labels, vec!["ALPHA (Ladies)", "ALPHA (Youth)", "ZEBRAS (Mens)"]);
    }
}

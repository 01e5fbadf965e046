// src/grouping/duplicates.rs - Exact-duplicate detection on raw names

use std::collections::HashMap;

/// A raw name that occurred more than once, compared byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateRecord {
    pub name: String,
    pub occurrences: usize,
}

#[derive(Debug, Clone, Default)]
pub struct DuplicateScan {
    /// Non-blank names, first occurrence order, no repeats.
    pub unique_names: Vec<String>,
    /// Sorted by occurrences (descending), then name.
    pub duplicates: Vec<DuplicateRecord>,
    pub blank_names_skipped: usize,
}

pub fn scan_duplicates<S: AsRef<str>>(names: &[S]) -> DuplicateScan {
    let mut counts: HashMap<&str, usize> = HashMap::with_capacity(names.len());
    let mut scan = DuplicateScan::default();

    for name in names {
        let name = name.as_ref();
        if name.trim().is_empty() {
            scan.blank_names_skipped += 1;
            continue;
        }
        let count = counts.entry(name).or_insert(0);
        if *count == 0 {
            scan.unique_names.push(name.to_string());
        }
        *count += 1;
    }

    scan.duplicates = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, occurrences)| DuplicateRecord {
            name: name.to_string(),
            occurrences,
        })
        .collect();
    scan.duplicates.sort_by(|a, b| {
        b.occurrences
            .cmp(&a.occurrences)
            .then_with(|| a.name.cmp(&b.name))
    });

    scan
}

// src/lexicon/vocabulary.rs - Compiled keyword sets and the ordered qualifier table

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Qualifier terms that may trail a club name ("Kings Reserves", "Kings U12s").
/// Entries are regex fragments and are tried in this order.
pub const QUALIFIER_TERMS: [&str; 9] = [
    "Junior",
    "Youth",
    r"U\d+",
    "1st",
    "2nd",
    "Reserves",
    "Colts",
    "Development",
    "Rangers",
];

/// Age-group token such as "U12" or "u9s".
pub static AGE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bU\d+").unwrap());

// The qualifier runs to the end of the string once it starts.
static QUALIFIER_SPLIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)^(?P<main>.+?)(?:\s+(?P<qualifier>(?:{}).*)?)?$",
        QUALIFIER_TERMS.join("|")
    ))
    .unwrap()
});

static QUALIFIER_TAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)^(?P<base>.+?)(?P<tail>\s+(?:{}).*)?$",
        QUALIFIER_TERMS.join("|")
    ))
    .unwrap()
});

/// A club name split into its main part and an optional trailing qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualifierSplit<'a> {
    pub main: &'a str,
    pub qualifier: Option<&'a str>,
}

/// Splits `name` at the first whitespace-preceded qualifier term.
///
/// Returns `None` only when nothing matches at all (empty input or input
/// containing a line break).
pub fn split_qualifier(name: &str) -> Option<QualifierSplit<'_>> {
    let caps = QUALIFIER_SPLIT.captures(name)?;
    Some(QualifierSplit {
        main: caps.name("main")?.as_str(),
        qualifier: caps.name("qualifier").map(|m| m.as_str()),
    })
}

/// Like [`split_qualifier`] but keeps the whitespace in front of the
/// qualifier, so `base + tail` always reproduces the input.
pub fn split_qualifier_tail(name: &str) -> Option<(&str, Option<&str>)> {
    let caps = QUALIFIER_TAIL.captures(name)?;
    let base = caps.name("base")?.as_str();
    Some((base, caps.name("tail").map(|m| m.as_str())))
}

/// A set of keywords with case-insensitive token membership and a
/// word-boundary matcher for free text.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    terms: Vec<String>,
    folded: HashSet<String>,
    matcher: Option<Regex>,
}

impl KeywordSet {
    pub fn new(terms: Vec<String>) -> Result<Self> {
        let folded = terms.iter().map(|t| t.to_lowercase()).collect();
        // An empty alternation would match at every word boundary.
        let matcher = if terms.is_empty() {
            None
        } else {
            let alternation = terms
                .iter()
                .map(|t| regex::escape(t))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r"(?i)\b(?:{})\b", alternation);
            Some(Regex::new(&pattern).with_context(|| {
                format!("Failed to compile keyword matcher for {} terms", terms.len())
            })?)
        };
        Ok(Self {
            terms,
            folded,
            matcher,
        })
    }

    /// Union of several sets, keeping the first occurrence of each term.
    pub fn union<'a>(sets: impl IntoIterator<Item = &'a KeywordSet>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut terms = Vec::new();
        for set in sets {
            for term in &set.terms {
                if seen.insert(term.as_str()) {
                    terms.push(term.clone());
                }
            }
        }
        Self::new(terms)
    }

    /// Whole-token membership, ignoring case.
    pub fn contains_token(&self, token: &str) -> bool {
        self.folded.contains(&token.to_lowercase())
    }

    /// True when any term appears in `text` as a whole word, ignoring case.
    pub fn is_mentioned_in(&self, text: &str) -> bool {
        self.matcher
            .as_ref()
            .map_or(false, |matcher| matcher.is_match(text))
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(terms: &[&str]) -> KeywordSet {
        KeywordSet::new(terms.iter().map(|t| t.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_keyword_mentions_respect_word_boundaries() {
        let mens = set(&["Mens", "Vets"]);
        assert!(mens.is_mentioned_in("Kings Mens"));
        assert!(mens.is_mentioned_in("kings MENS sunday"));
        assert!(!mens.is_mentioned_in("Mensa United"));
        assert!(!mens.is_mentioned_in("Kingsvets"));
    }

    #[test]
    fn test_keyword_terms_are_escaped() {
        let odd = set(&["A+B"]);
        assert!(odd.is_mentioned_in("Club A+B Town"));
        assert!(!odd.is_mentioned_in("Club AAB Town"));
    }

    #[test]
    fn test_empty_set_never_matches() {
        let empty = set(&[]);
        assert!(empty.is_empty());
        assert!(!empty.is_mentioned_in("Kings United"));
        assert!(!empty.contains_token("Kings"));
    }

    #[test]
    fn test_token_membership_ignores_case() {
        let colors = set(&["Red", "Blue"]);
        assert!(colors.contains_token("red"));
        assert!(colors.contains_token("BLUE"));
        assert!(!colors.contains_token("Reds"));
    }

    #[test]
    fn test_union_keeps_first_occurrence() {
        let a = set(&["Youth", "Boys"]);
        let b = set(&["Boys", "Mens"]);
        let combined = KeywordSet::union([&a, &b]).unwrap();
        assert_eq!(combined.terms(), &["Youth", "Boys", "Mens"]);
    }

    #[test]
    fn test_age_token() {
        assert!(AGE_TOKEN.is_match("U12"));
        assert!(AGE_TOKEN.is_match("u9s"));
        assert!(AGE_TOKEN.is_match("(U16)"));
        assert!(!AGE_TOKEN.is_match("Under"));
        assert!(!AGE_TOKEN.is_match("FU12"));
    }

    #[test]
    fn test_split_qualifier() {
        let split = split_qualifier("Kings Reserves").unwrap();
        assert_eq!(split.main, "Kings");
        assert_eq!(split.qualifier, Some("Reserves"));

        let split = split_qualifier("Kings United u12s Blue").unwrap();
        assert_eq!(split.main, "Kings United");
        assert_eq!(split.qualifier, Some("u12s Blue"));

        let split = split_qualifier("Kings United").unwrap();
        assert_eq!(split.main, "Kings United");
        assert_eq!(split.qualifier, None);

        // A leading qualifier term is part of the main name.
        let split = split_qualifier("Rangers Kings").unwrap();
        assert_eq!(split.main, "Rangers Kings");
        assert_eq!(split.qualifier, None);

        assert!(split_qualifier("").is_none());
    }

    #[test]
    fn test_split_qualifier_tail_reproduces_input() {
        for name in ["KINGS Colts", "KINGS", "Kings 1st Team", "Kings  Development Squad"] {
            let (base, tail) = split_qualifier_tail(name).unwrap();
            assert_eq!(format!("{}{}", base, tail.unwrap_or("")), name);
        }
        assert_eq!(
            split_qualifier_tail("KINGS Colts"),
            Some(("KINGS", Some(" Colts")))
        );
    }
}

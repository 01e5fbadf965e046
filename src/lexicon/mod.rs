// src/lexicon/mod.rs - Keyword vocabulary driving classification and normalization

use anyhow::{bail, Context, Result};
use log::{debug, info};
use regex::{NoExpand, Regex};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::json;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

pub mod vocabulary;

use vocabulary::{KeywordSet, QUALIFIER_TERMS};

/// The lexicon document as stored on disk. Every field is required.
#[derive(Debug, Clone, Deserialize)]
pub struct LexiconDocument {
    pub youth_keywords: Vec<String>,
    pub mens_keywords: Vec<String>,
    pub ladies_keywords: Vec<String>,
    pub color_keywords: Vec<String>,
    pub disability_keywords: Vec<String>,
    #[serde(deserialize_with = "ordered_pairs")]
    pub abbreviation_map: Vec<(String, String)>,
    pub club_suffixes: Vec<String>,
}

/// Reads a JSON object into `(key, value)` pairs, keeping document order.
fn ordered_pairs<'de, D>(deserializer: D) -> std::result::Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PairsVisitor;

    impl<'de> Visitor<'de> for PairsVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of abbreviation to expansion strings")
        }

        fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((abbreviation, expansion)) = access.next_entry::<String, String>()? {
                pairs.push((abbreviation, expansion));
            }
            Ok(pairs)
        }
    }

    deserializer.deserialize_map(PairsVisitor)
}

/// One abbreviation rule, matched as a whole word ignoring case.
#[derive(Debug, Clone)]
pub struct Abbreviation {
    pub abbreviation: String,
    pub expansion: String,
    pattern: Regex,
}

impl Abbreviation {
    fn new(abbreviation: String, expansion: String) -> Result<Self> {
        let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&abbreviation)))
            .with_context(|| format!("Failed to compile abbreviation '{}'", abbreviation))?;
        Ok(Self {
            abbreviation,
            expansion,
            pattern,
        })
    }

    pub fn expand(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, NoExpand(&self.expansion))
            .into_owned()
    }

    pub fn occurs_in(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Immutable, validated vocabulary shared by every stage of a grouping run.
#[derive(Debug, Clone)]
pub struct Lexicon {
    youth: KeywordSet,
    mens: KeywordSet,
    ladies: KeywordSet,
    color: KeywordSet,
    disability: KeywordSet,
    combined: KeywordSet,
    club_suffixes: KeywordSet,
    abbreviations: Vec<Abbreviation>,
    fingerprint: String,
}

impl Lexicon {
    /// Loads and validates a lexicon file. Any failure is fatal for the run.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon file {}", path.display()))?;
        let lexicon = Self::from_json_str(&raw)
            .with_context(|| format!("Invalid lexicon file {}", path.display()))?;
        info!(
            "📚 Loaded lexicon from {} (fingerprint {})",
            path.display(),
            lexicon.short_fingerprint()
        );
        Ok(lexicon)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let document: LexiconDocument =
            serde_json::from_str(raw).context("Failed to parse lexicon document")?;
        Self::from_document(document)
    }

    pub fn from_document(document: LexiconDocument) -> Result<Self> {
        validate_terms("youth_keywords", &document.youth_keywords)?;
        validate_terms("mens_keywords", &document.mens_keywords)?;
        validate_terms("ladies_keywords", &document.ladies_keywords)?;
        validate_terms("color_keywords", &document.color_keywords)?;
        validate_terms("disability_keywords", &document.disability_keywords)?;
        validate_terms("club_suffixes", &document.club_suffixes)?;

        let fingerprint = fingerprint_document(&document);

        let mut seen = HashSet::new();
        let mut abbreviations = Vec::with_capacity(document.abbreviation_map.len());
        for (abbreviation, expansion) in document.abbreviation_map {
            if abbreviation.trim().is_empty() {
                bail!("abbreviation_map contains a blank abbreviation");
            }
            if !seen.insert(abbreviation.to_lowercase()) {
                bail!("abbreviation_map lists '{}' more than once", abbreviation);
            }
            abbreviations.push(Abbreviation::new(abbreviation, expansion)?);
        }

        // An expansion that reintroduces an abbreviation would never let
        // cleaning settle.
        for rule in &abbreviations {
            if let Some(other) = abbreviations.iter().find(|o| o.occurs_in(&rule.expansion)) {
                bail!(
                    "abbreviation_map expansion '{}' (for '{}') contains abbreviation '{}'",
                    rule.expansion,
                    rule.abbreviation,
                    other.abbreviation
                );
            }
        }

        let youth = KeywordSet::new(document.youth_keywords)?;
        let mens = KeywordSet::new(document.mens_keywords)?;
        let ladies = KeywordSet::new(document.ladies_keywords)?;
        let color = KeywordSet::new(document.color_keywords)?;
        let disability = KeywordSet::new(document.disability_keywords)?;
        let combined = KeywordSet::union([&youth, &mens, &ladies, &color, &disability])?;
        let club_suffixes = KeywordSet::new(document.club_suffixes)?;

        debug!(
            "Lexicon compiled: {} combined keywords, {} abbreviations, {} club suffixes",
            combined.len(),
            abbreviations.len(),
            club_suffixes.len()
        );

        Ok(Self {
            youth,
            mens,
            ladies,
            color,
            disability,
            combined,
            club_suffixes,
            abbreviations,
            fingerprint,
        })
    }

    pub fn youth_keywords(&self) -> &KeywordSet {
        &self.youth
    }

    pub fn mens_keywords(&self) -> &KeywordSet {
        &self.mens
    }

    pub fn ladies_keywords(&self) -> &KeywordSet {
        &self.ladies
    }

    pub fn color_keywords(&self) -> &KeywordSet {
        &self.color
    }

    pub fn disability_keywords(&self) -> &KeywordSet {
        &self.disability
    }

    /// Youth, mens, ladies, color and disability keywords together.
    pub fn combined_keywords(&self) -> &KeywordSet {
        &self.combined
    }

    pub fn club_suffixes(&self) -> &KeywordSet {
        &self.club_suffixes
    }

    /// Abbreviation rules in document order.
    pub fn abbreviations(&self) -> &[Abbreviation] {
        &self.abbreviations
    }

    /// SHA-256 over a canonical form of the vocabulary, including the
    /// built-in qualifier table. Two lexicons with the same fingerprint
    /// group names identically.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn short_fingerprint(&self) -> &str {
        &self.fingerprint[..12]
    }

    pub fn log_summary(&self) {
        info!("📚 Lexicon {}", self.short_fingerprint());
        info!("   Youth keywords: {}", self.youth.len());
        info!("   Ladies keywords: {}", self.ladies.len());
        info!("   Mens keywords: {}", self.mens.len());
        info!("   Disability keywords: {}", self.disability.len());
        info!("   Color keywords: {}", self.color.len());
        info!("   Abbreviations: {}", self.abbreviations.len());
        info!("   Club suffixes: {}", self.club_suffixes.len());
    }
}

fn validate_terms(field: &str, terms: &[String]) -> Result<()> {
    if let Some(position) = terms.iter().position(|t| t.trim().is_empty()) {
        bail!("{} contains a blank entry at position {}", field, position);
    }
    Ok(())
}

fn sorted(terms: &[String]) -> Vec<&str> {
    let mut out: Vec<&str> = terms.iter().map(String::as_str).collect();
    out.sort_unstable();
    out.dedup();
    out
}

fn fingerprint_document(document: &LexiconDocument) -> String {
    let canonical = json!({
        "youth_keywords": sorted(&document.youth_keywords),
        "mens_keywords": sorted(&document.mens_keywords),
        "ladies_keywords": sorted(&document.ladies_keywords),
        "color_keywords": sorted(&document.color_keywords),
        "disability_keywords": sorted(&document.disability_keywords),
        "abbreviation_map": document.abbreviation_map,
        "club_suffixes": sorted(&document.club_suffixes),
        "qualifier_terms": QUALIFIER_TERMS,
    });
    let mut hasher = Sha256::new();
    hasher.update(canonical.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
pub(crate) const TEST_LEXICON_JSON: &str = r#"{
    "youth_keywords": ["Youth", "Juniors", "Academy", "Boys", "Girls"],
    "mens_keywords": ["Mens", "Men", "Vets", "Sunday"],
    "ladies_keywords": ["Ladies", "Women", "Womens"],
    "color_keywords": ["Red", "Blue", "Black", "White"],
    "disability_keywords": ["Disability", "Pan Disability"],
    "abbreviation_map": {"Utd": "United", "Ath": "Athletic", "Res": "Reserves"},
    "club_suffixes": ["Town", "City", "United", "Rovers", "Athletic"]
}"#;

#[cfg(test)]
pub(crate) fn test_lexicon() -> Lexicon {
    Lexicon::from_json_str(TEST_LEXICON_JSON).unwrap()
}

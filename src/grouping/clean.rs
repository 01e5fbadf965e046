// src/grouping/clean.rs - Raw team name cleanup

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexicon::Lexicon;

static FC_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bF\.?C\.?\b").unwrap());
static AFC_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bAFC\b").unwrap());
static TRAILING_PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.,\s]+$").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// Every rule has to be able to fire on the output of the others.
const MAX_CLEAN_PASSES: usize = 8;

/// Expands abbreviations, drops "FC"/"F.C."/"AFC" tokens, strips trailing
/// periods and commas and collapses whitespace.
///
/// The whole transform repeats until the text stops changing, so removing
/// a token or a double space can still expose a multi-word abbreviation:
/// `clean_club_name(&clean_club_name(x, l), l) == clean_club_name(x, l)`
/// for every lexicon that passed validation.
pub fn clean_club_name(name: &str, lexicon: &Lexicon) -> String {
    let mut cleaned = collapse_whitespace(name);
    for _ in 0..MAX_CLEAN_PASSES {
        let next = clean_once(&cleaned, lexicon);
        if next == cleaned {
            break;
        }
        cleaned = next;
    }
    cleaned
}

fn clean_once(name: &str, lexicon: &Lexicon) -> String {
    let mut cleaned = name.to_string();
    for abbreviation in lexicon.abbreviations() {
        cleaned = abbreviation.expand(&cleaned);
    }
    let cleaned = remove_all(&FC_TOKEN, cleaned);
    let cleaned = remove_all(&AFC_TOKEN, cleaned);
    let cleaned = TRAILING_PUNCTUATION.replace(&cleaned, "");
    collapse_whitespace(&cleaned)
}

/// Collapses whitespace runs into single spaces and trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

// Removing one token can expose another ("F.F.C.C."), so repeat until stable.
fn remove_all(pattern: &Regex, mut text: String) -> String {
    while pattern.is_match(&text) {
        text = pattern.replace_all(&text, "").into_owned();
    }
    text
}

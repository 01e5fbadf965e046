// src/grouping/extract.rs - Base club name extraction

use crate::lexicon::vocabulary::{KeywordSet, AGE_TOKEN};

/// Derives the candidate club name from a cleaned team name.
///
/// Only the text before the first dash is considered. Tokens are taken left
/// to right until an age token or a keyword from either set is reached. A
/// trailing club suffix ("Town", "Rovers") is always kept, even when it sits
/// past the stop point. When the very first token stops the scan, that token
/// alone is returned.
///
/// Youth names pass `(youth, combined)` as the stop sets; everything else
/// passes `(combined, combined)`.
pub fn extract_base_club_name(
    cleaned: &str,
    context_keywords: &KeywordSet,
    combined_keywords: &KeywordSet,
    club_suffixes: &KeywordSet,
) -> String {
    let words: Vec<&str> = base_part(cleaned).split_whitespace().collect();

    let mut parts: Vec<&str> = Vec::with_capacity(words.len());
    for &word in &words {
        if AGE_TOKEN.is_match(word)
            || context_keywords.contains_token(word)
            || combined_keywords.contains_token(word)
        {
            break;
        }
        parts.push(word);
    }

    if let Some(&last) = words.last() {
        if club_suffixes.contains_token(last) && !parts.contains(&last) {
            parts.push(last);
        }
    }

    if parts.is_empty() {
        parts.extend(words.first());
    }

    if parts.is_empty() {
        // Nothing but dashes and whitespace.
        return cleaned.trim().to_string();
    }
    parts.join(" ").trim().to_string()
}

/// First dash-delimited segment that has any content.
fn base_part(cleaned: &str) -> &str {
    cleaned
        .split('-')
        .map(str::trim)
        .find(|segment| !segment.is_empty())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::test_lexicon;

    fn extract_adult(cleaned: &str) -> String {
        let lexicon = test_lexicon();
        extract_base_club_name(
            cleaned,
            lexicon.combined_keywords(),
            lexicon.combined_keywords(),
            lexicon.club_suffixes(),
        )
    }

    fn extract_youth(cleaned: &str) -> String {
        let lexicon = test_lexicon();
        extract_base_club_name(
            cleaned,
            lexicon.youth_keywords(),
            lexicon.combined_keywords(),
            lexicon.club_suffixes(),
        )
    }

    #[test]
    fn test_stops_at_first_keyword() {
        assert_eq!(extract_adult("Kings Ladies Blue"), "Kings");
        assert_eq!(extract_adult("Kings United Sunday Vets"), "Kings United");
        assert_eq!(extract_youth("Kings United U12 Blue"), "Kings United");
        assert_eq!(extract_youth("Kings Academy Girls"), "Kings");
    }

    #[test]
    fn test_ignores_text_after_dash() {
        assert_eq!(extract_adult("Kings Town - Division 1"), "Kings Town");
        assert_eq!(extract_adult("Kings-Reserves"), "Kings");
    }

    #[test]
    fn test_trailing_suffix_survives_truncation() {
        assert_eq!(extract_adult("Kings Red Town"), "Kings Town");
        assert_eq!(extract_youth("Kings U14 Rovers"), "Kings Rovers");
        // Already part of the candidate: not appended twice.
        assert_eq!(extract_adult("Kings Town"), "Kings Town");
        assert_eq!(extract_adult("Town"), "Town");
    }

    #[test]
    fn test_falls_back_to_first_token() {
        assert_eq!(extract_youth("Youth"), "Youth");
        assert_eq!(extract_adult("Ladies"), "Ladies");
        assert_eq!(extract_adult("Mens Kings"), "Mens");
        assert_eq!(extract_youth("U12 Kings"), "U12");
    }

    #[test]
    fn test_never_empty_for_non_blank_input() {
        assert_eq!(extract_adult("- Kings"), "Kings");
        assert_eq!(extract_adult("--"), "--");
        assert_eq!(extract_adult("Kings"), "Kings");
    }

    #[test]
    fn test_keyword_checks_ignore_case() {
        assert_eq!(extract_adult("Kings LADIES"), "Kings");
        assert_eq!(extract_youth("Kings u9"), "Kings");
    }
}

// src/grouping/normalize.rs - Merge-key normalization

use once_cell::sync::Lazy;
use regex::Regex;

use super::clean::collapse_whitespace;
use crate::lexicon::vocabulary::split_qualifier;

// J, JC, JF, JFC and "F C" all spell the same club-type suffix.
static FC_VARIANT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(JF?C?|F C)\b").unwrap());

/// Uppercases, removes periods, collapses whitespace and rewrites FC
/// spelling variants to "FC".
pub fn canonical_club_form(name: &str) -> String {
    let upper = name.to_uppercase().replace('.', "");
    let collapsed = collapse_whitespace(&upper);
    FC_VARIANT.replace_all(&collapsed, "FC").into_owned()
}

/// Canonicalizes the main part of a club name and reattaches any trailing
/// qualifier ("Reserves", "U12s Blue") verbatim.
pub fn normalize_club_key(name: &str) -> String {
    match split_qualifier(name) {
        Some(split) => {
            let main = canonical_club_form(split.main.trim());
            format!("{} {}", main, split.qualifier.unwrap_or(""))
                .trim()
                .to_string()
        }
        None => canonical_club_form(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_form() {
        assert_eq!(canonical_club_form("Kings  united"), "KINGS UNITED");
        assert_eq!(canonical_club_form("St. Mary's"), "ST MARY'S");
        assert_eq!(canonical_club_form("kings j.f.c."), "KINGS FC");
        assert_eq!(canonical_club_form("Kings JC"), "KINGS FC");
        assert_eq!(canonical_club_form("Kings f c"), "KINGS FC");
        assert_eq!(canonical_club_form("Jets"), "JETS");
    }

    #[test]
    fn test_qualifier_is_reattached_verbatim() {
        assert_eq!(normalize_club_key("Kings Reserves"), "KINGS Reserves");
        assert_eq!(normalize_club_key("kings utd u12s Blue"), "KINGS UTD u12s Blue");
        assert_eq!(normalize_club_key("Kings J.F.C. Colts"), "KINGS FC Colts");
    }

    #[test]
    fn test_without_qualifier() {
        assert_eq!(normalize_club_key("Kings United"), "KINGS UNITED");
        assert_eq!(normalize_club_key("FC Kings"), "FC KINGS");
        assert_eq!(normalize_club_key(""), "");
    }

    #[test]
    fn test_normalized_keys_are_stable() {
        for name in ["Kings Reserves", "kings j.f.c.", "FC Kings", "Kings U12s Blue"] {
            let once = normalize_club_key(name);
            assert_eq!(normalize_club_key(&once), once);
        }
    }
}

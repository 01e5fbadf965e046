// src/grouping/category.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::lexicon::vocabulary::AGE_TOKEN;
use crate::lexicon::Lexicon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Youth,
    Ladies,
    Mens,
    Disability,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Youth => "Youth",
            Category::Ladies => "Ladies",
            Category::Mens => "Mens",
            Category::Disability => "Disability",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Picks the category of a cleaned name. First match wins:
/// Youth (age token or youth keyword), Ladies, Mens, Disability, then Mens.
pub fn categorize(cleaned: &str, lexicon: &Lexicon) -> Category {
    if AGE_TOKEN.is_match(cleaned) || lexicon.youth_keywords().is_mentioned_in(cleaned) {
        Category::Youth
    } else if lexicon.ladies_keywords().is_mentioned_in(cleaned) {
        Category::Ladies
    } else if lexicon.mens_keywords().is_mentioned_in(cleaned) {
        Category::Mens
    } else if lexicon.disability_keywords().is_mentioned_in(cleaned) {
        Category::Disability
    } else {
        Category::Mens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::test_lexicon;

    #[test]
    fn test_youth_wins_over_everything() {
        let lexicon = test_lexicon();
        assert_eq!(categorize("Kings U12 Mens", &lexicon), Category::Youth);
        assert_eq!(categorize("Kings Girls Ladies", &lexicon), Category::Youth);
        assert_eq!(categorize("Kings u9s Disability", &lexicon), Category::Youth);
        assert_eq!(categorize("kings ACADEMY", &lexicon), Category::Youth);
    }

    #[test]
    fn test_ladies_before_mens_before_disability() {
        let lexicon = test_lexicon();
        assert_eq!(categorize("Kings Ladies Sunday", &lexicon), Category::Ladies);
        assert_eq!(categorize("Kings Mens Disability", &lexicon), Category::Mens);
        assert_eq!(categorize("Kings Disability", &lexicon), Category::Disability);
        assert_eq!(categorize("Kings Pan Disability", &lexicon), Category::Disability);
    }

    #[test]
    fn test_defaults_to_mens() {
        let lexicon = test_lexicon();
        assert_eq!(categorize("Kings United", &lexicon), Category::Mens);
        assert_eq!(categorize("", &lexicon), Category::Mens);
        // Partial words do not count.
        assert_eq!(categorize("Ladiesfield Town", &lexicon), Category::Mens);
        assert_eq!(categorize("Disabilityfirst", &lexicon), Category::Mens);
    }

    #[test]
    fn test_display() {
        assert_eq!(Category::Youth.to_string(), "Youth");
        assert_eq!(format!("{}", Category::Disability), "Disability");
    }
}

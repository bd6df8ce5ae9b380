//! Keyword auto-categorization for harvested works.
//!
//! Rules are checked in order against the lower-cased title, abstract, and
//! keywords; the first match wins and `RBOOK` is the fallback.

use crate::entities::WorkMetadata;
use crate::enums::Category;

const RULES: &[(&[&str], Category)] = &[
    (&["thesis", "dissertation"], Category::Thesis),
    (&["bobp", "bay of bengal"], Category::Bobp),
    (&["map", "cartography"], Category::Map),
    (&["journal", "article"], Category::Jr),
    (&["report", "research paper"], Category::Rpaper),
];

/// Pick a category from the work's text.
#[must_use]
pub fn categorize(metadata: &WorkMetadata) -> Category {
    let text = format!(
        "{} {} {}",
        metadata.title,
        metadata.abstract_text,
        metadata.keywords.join(" ")
    )
    .to_lowercase();

    RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| text.contains(needle)))
        .map_or(Category::Rbook, |(_, category)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn work(title: &str, abstract_text: &str, keywords: &[&str]) -> WorkMetadata {
        WorkMetadata {
            title: title.into(),
            author: "Unknown Author".into(),
            publisher: "CORE".into(),
            publication_year: 2020,
            abstract_text: abstract_text.into(),
            language: "English".into(),
            keywords: keywords.iter().map(ToString::to_string).collect(),
            doi: None,
            source_url: None,
        }
    }

    #[rstest]
    #[case("A PhD Thesis on Tuna", "", &[], Category::Thesis)]
    #[case("Shrimp trawling", "Bay of Bengal programme", &[], Category::Bobp)]
    #[case("Coastal cartography", "", &[], Category::Map)]
    #[case("Fisheries", "", &["Journal"], Category::Jr)]
    #[case("Annual Report 2019", "", &[], Category::Rpaper)]
    #[case("Seaweeds of Sri Lanka", "", &[], Category::Rbook)]
    fn categorizes_by_first_matching_rule(
        #[case] title: &str,
        #[case] abstract_text: &str,
        #[case] keywords: &[&str],
        #[case] expected: Category,
    ) {
        assert_eq!(categorize(&work(title, abstract_text, keywords)), expected);
    }

    #[test]
    fn earlier_rule_wins_over_later() {
        let meta = work("Dissertation report on BOBP", "", &[]);
        assert_eq!(categorize(&meta), Category::Thesis);
    }
}

//! Entity linking: find which entries a block of text refers to.
//!
//! Matching is literal, case-insensitive and whole-word. A title matches only
//! where it is not directly preceded or followed by a letter or digit, so
//! "Ann" never matches inside "Anna". Titles are regex-escaped before
//! compiling, so punctuation such as "Dr. Smith" is matched literally.

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};

use crate::models::Entry;

/// Anything that is not a letter or digit, or the edge of the text.
const LEFT_BOUNDARY: &str = r"(?:^|[^\p{Alphabetic}\p{N}])";
const RIGHT_BOUNDARY: &str = r"(?:[^\p{Alphabetic}\p{N}]|$)";

/// Service trait for entity linking.
///
/// Implementations must keep the contract of [`find_referenced_entries`]:
/// whole-word, case-insensitive, each entry at most once, in the order first
/// matched.
pub trait EntityLinker: Send + Sync {
    fn find_referenced<'a>(&self, text: &str, entries: &'a [Entry]) -> Vec<&'a Entry>;
}

/// Linker compiling one regex per candidate title.
///
/// Adequate for tens to a few hundred entries; the cost is
/// O(entries x text length) per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexEntityLinker;

impl RegexEntityLinker {
    pub fn new() -> Self {
        Self
    }
}

impl EntityLinker for RegexEntityLinker {
    fn find_referenced<'a>(&self, text: &str, entries: &'a [Entry]) -> Vec<&'a Entry> {
        if text.is_empty() || entries.is_empty() {
            return Vec::new();
        }

        let candidates = candidate_titles(entries);
        let mut matched = Vec::new();

        for (title, entry) in candidates {
            match title_pattern(title) {
                Ok(pattern) => {
                    if pattern.is_match(text) {
                        matched.push(entry);
                    }
                }
                Err(e) => {
                    tracing::warn!("Skipping entry '{}': pattern failed to compile: {}", title, e);
                }
            }
        }

        tracing::debug!(
            "Linked {} of {} entries against {} chars of text",
            matched.len(),
            entries.len(),
            text.len()
        );
        matched
    }
}

/// Find the entries whose title occurs as a whole word in `text`.
pub fn find_referenced_entries<'a>(text: &str, entries: &'a [Entry]) -> Vec<&'a Entry> {
    RegexEntityLinker.find_referenced(text, entries)
}

/// Distinct titles (case-insensitive, first entry wins), longest first with
/// ties kept in store order.
fn candidate_titles(entries: &[Entry]) -> Vec<(&str, &Entry)> {
    let mut seen = HashSet::new();
    let mut candidates: Vec<(&str, &Entry)> = entries
        .iter()
        .filter_map(|entry| {
            let title = entry.title.trim();
            if title.is_empty() || !seen.insert(title.to_lowercase()) {
                return None;
            }
            Some((title, entry))
        })
        .collect();

    // Stable sort keeps store order among equal lengths.
    candidates.sort_by(|(a, _), (b, _)| b.chars().count().cmp(&a.chars().count()));
    candidates
}

fn title_pattern(title: &str) -> Result<Regex, regex::Error> {
    let pattern = format!(
        "{}{}{}",
        LEFT_BOUNDARY,
        regex::escape(title),
        RIGHT_BOUNDARY
    );
    RegexBuilder::new(&pattern).case_insensitive(true).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str) -> Entry {
        Entry::new(title, "Character")
    }

    fn titles<'a>(found: &[&'a Entry]) -> Vec<&'a str> {
        found.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_empty_inputs() {
        assert!(find_referenced_entries("", &[entry("Mira")]).is_empty());
        assert!(find_referenced_entries("Mira walks", &[]).is_empty());
    }

    #[test]
    fn test_whole_word_only() {
        let entries = vec![entry("Ann"), entry("Anna")];
        let found = find_referenced_entries("Anna is here", &entries);
        assert_eq!(titles(&found), vec!["Anna"]);
    }

    #[test]
    fn test_case_insensitive() {
        let entries = vec![entry("Mira")];
        assert_eq!(find_referenced_entries("MIRA laughed", &entries).len(), 1);
        assert_eq!(find_referenced_entries("mira laughed", &entries).len(), 1);
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let entries = vec![entry("Dr. Smith"), entry("C++"), entry("(The) Order")];
        let found = find_referenced_entries("Dr. Smith arrived", &entries);
        assert_eq!(titles(&found), vec!["Dr. Smith"]);

        // "." must not act as a wildcard
        assert!(find_referenced_entries("Drx Smith arrived", &entries).is_empty());

        let found = find_referenced_entries("She studied C++ and (the) order", &entries);
        assert_eq!(titles(&found), vec!["(The) Order", "C++"]);
    }

    #[test]
    fn test_punctuation_counts_as_boundary() {
        let entries = vec![entry("Mira")];
        assert_eq!(find_referenced_entries("\"Mira!\" he called.", &entries).len(), 1);
        assert_eq!(find_referenced_entries("Mira's cloak", &entries).len(), 1);
        assert!(find_referenced_entries("Miramar", &entries).is_empty());
        assert!(find_referenced_entries("Mira2", &entries).is_empty());
    }

    #[test]
    fn test_underscore_is_a_boundary() {
        // Only letters and digits block a match.
        let entries = vec![entry("Mira")];
        assert_eq!(find_referenced_entries("_Mira_", &entries).len(), 1);
    }

    #[test]
    fn test_non_ascii_letters_block_match() {
        let entries = vec![entry("Ren")];
        assert!(find_referenced_entries("Renée smiled", &entries).is_empty());
        assert_eq!(find_referenced_entries("Ren smiled", &entries).len(), 1);
    }

    #[test]
    fn test_overlapping_occurrence_still_found() {
        // First occurrence of "x-x" is glued to a letter; the overlapping
        // second one is valid.
        let entries = vec![entry("x-x")];
        assert_eq!(find_referenced_entries("xx-x-x", &entries).len(), 1);
    }

    #[test]
    fn test_each_entry_once_in_match_order() {
        let entries = vec![entry("Ash"), entry("Mira"), entry("The Old Forest")];
        let found = find_referenced_entries("Mira and Ash. Mira again in The Old Forest.", &entries);
        assert_eq!(titles(&found), vec!["The Old Forest", "Mira", "Ash"]);
    }

    #[test]
    fn test_duplicate_titles_first_wins() {
        let first = Entry::new("Mira", "Character").with_description("first");
        let second = Entry::new("MIRA", "Character").with_description("second");
        let entries = vec![first, second];
        let found = find_referenced_entries("mira", &entries);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].description, "first");
    }

    #[test]
    fn test_blank_titles_never_match() {
        let entries = vec![entry(""), entry("   ")];
        assert!(find_referenced_entries("anything at all", &entries).is_empty());
    }

    #[test]
    fn test_title_with_surrounding_whitespace() {
        let entries = vec![entry(" Mira ")];
        assert_eq!(find_referenced_entries("Mira waits", &entries).len(), 1);
    }

    // -- Property-based tests --

    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        fn is_whole_word_in(title: &str, text: &str) -> bool {
            let text_lower = text.to_lowercase();
            let title_lower = title.trim().to_lowercase();
            text_lower.match_indices(&title_lower).any(|(start, m)| {
                let before = text_lower[..start].chars().next_back();
                let after = text_lower[start + m.len()..].chars().next();
                !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
            })
        }

        proptest! {
            #[test]
            fn prop_no_duplicates(
                titles in proptest::collection::vec("[A-Za-z]{1,6}", 0..10),
                text in "[A-Za-z .,]{0,80}",
            ) {
                let entries: Vec<Entry> = titles.iter().map(|t| Entry::new(t.as_str(), "Lore")).collect();
                let found = find_referenced_entries(&text, &entries);
                let mut seen = HashSet::new();
                for e in &found {
                    prop_assert!(seen.insert(e.title.to_lowercase()), "duplicate {}", e.title);
                }
            }

            #[test]
            fn prop_every_match_is_whole_word(
                titles in proptest::collection::vec("[a-c]{1,3}", 0..10),
                text in "[a-c ]{0,40}",
            ) {
                let entries: Vec<Entry> = titles.iter().map(|t| Entry::new(t.as_str(), "Lore")).collect();
                for e in find_referenced_entries(&text, &entries) {
                    prop_assert!(is_whole_word_in(&e.title, &text), "{} not a word in {:?}", e.title, text);
                }
            }

            #[test]
            fn prop_arbitrary_titles_never_panic(
                title in "\\PC{0,12}",
                text in "\\PC{0,40}",
            ) {
                let entries = vec![Entry::new(title, "Lore")];
                let _ = find_referenced_entries(&text, &entries);
            }

            #[test]
            fn prop_embedded_word_is_found(
                title in "[A-Z][a-z]{2,8}",
                prefix in "[a-z ]{0,10}",
                suffix in "[a-z ]{0,10}",
            ) {
                let text = format!("{} {} {}", prefix, title, suffix);
                let entries = vec![Entry::new(title.as_str(), "Character")];
                prop_assert_eq!(find_referenced_entries(&text, &entries).len(), 1);
            }
        }
    }
}

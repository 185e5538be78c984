//! Integration tests for entity linking against realistic entry sets.

mod common;

use common::builders::EntryBuilder;

use lorebook::models::Entry;
use lorebook::services::{find_referenced_entries, EntityLinker, RegexEntityLinker};
use pretty_assertions::assert_eq;

fn titles<'a>(entries: &[&'a Entry]) -> Vec<&'a str> {
    entries.iter().map(|e| e.title.as_str()).collect()
}

fn cast() -> Vec<Entry> {
    vec![
        EntryBuilder::new("Ann").build(),
        EntryBuilder::new("Anna").build(),
        EntryBuilder::new("Dr. Smith").build(),
        EntryBuilder::new("The Old Forest")
            .entry_type("Location")
            .build(),
        EntryBuilder::new("C++").entry_type("Lore").build(),
    ]
}

#[test]
fn test_whole_word_and_case_insensitive() {
    let entries = cast();

    assert_eq!(
        titles(&find_referenced_entries("ANNA waved.", &entries)),
        vec!["Anna"]
    );
    assert_eq!(
        titles(&find_referenced_entries("Joanna and Annabel", &entries)),
        Vec::<&str>::new()
    );
}

#[test]
fn test_metacharacters_are_literal() {
    let entries = cast();

    assert_eq!(
        titles(&find_referenced_entries("Dr. Smith arrived", &entries)),
        vec!["Dr. Smith"]
    );
    assert!(find_referenced_entries("Dr- Smith arrived", &entries).is_empty());
    assert_eq!(
        titles(&find_referenced_entries("written in C++ today", &entries)),
        vec!["C++"]
    );
}

#[test]
fn test_longest_titles_first_and_deduplicated() {
    let entries = cast();
    let text = "Ann met Anna at the edge of the old forest. Anna left.";

    assert_eq!(
        titles(&find_referenced_entries(text, &entries)),
        vec!["The Old Forest", "Anna", "Ann"]
    );
}

#[test]
fn test_empty_inputs() {
    let entries = cast();
    assert!(find_referenced_entries("", &entries).is_empty());
    assert!(find_referenced_entries("Anna", &[]).is_empty());
}

#[test]
fn test_trait_object_matches_free_function() {
    let entries = cast();
    let linker: Box<dyn EntityLinker> = Box::new(RegexEntityLinker::new());
    let text = "Dr. Smith read about C++ with Ann.";

    assert_eq!(
        titles(&linker.find_referenced(text, &entries)),
        titles(&find_referenced_entries(text, &entries))
    );
}

//! Entry title resolution and "did you mean" suggestions.

use anyhow::Result;
use rapidfuzz::distance::levenshtein;

use crate::models::{Entry, EntryStore};

/// Minimum normalized similarity for a title to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.6;
const MAX_SUGGESTIONS: usize = 3;

/// Titles similar to `input`, most similar first.
pub fn suggest_titles(input: &str, entries: &EntryStore) -> Vec<String> {
    let input_lower = input.trim().to_lowercase();
    let mut scored: Vec<(f64, &str)> = entries
        .iter()
        .map(|e| {
            let title_lower = e.title.to_lowercase();
            let score =
                levenshtein::normalized_similarity(input_lower.chars(), title_lower.chars());
            (score, e.title.as_str())
        })
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, title)| title.to_string())
        .collect()
}

fn not_found(title: &str, entries: &EntryStore) -> anyhow::Error {
    let suggestions = suggest_titles(title, entries);
    if suggestions.is_empty() {
        anyhow::anyhow!("No entry titled '{}'", title)
    } else {
        anyhow::anyhow!(
            "No entry titled '{}'. Did you mean: {}?",
            title,
            suggestions.join(", ")
        )
    }
}

/// Look up an entry by case-insensitive title, with suggestions on failure.
pub fn resolve_entry<'a>(title: &str, entries: &'a EntryStore) -> Result<&'a Entry> {
    entries.get(title).ok_or_else(|| not_found(title, entries))
}

pub fn resolve_entry_mut<'a>(title: &str, entries: &'a mut EntryStore) -> Result<&'a mut Entry> {
    if entries.get(title).is_none() {
        return Err(not_found(title, entries));
    }
    entries
        .get_mut(title)
        .ok_or_else(|| anyhow::anyhow!("No entry titled '{}'", title))
}

//! World-building entries and their free-text details.
//!
//! An entry is a titled fact record (a character, a location, a piece of lore).
//! Titles are unique under case-insensitive comparison across an `EntryStore`;
//! the store enforces this on insert and rename.

use serde::{Deserialize, Serialize};

use crate::LorebookError;

/// Entry types offered as suggestions. `Entry::entry_type` is free-form and
/// not restricted to this list.
pub const ENTRY_TYPE_SUGGESTIONS: &[&str] = &["Character", "Location", "Lore", "Object", "Subplot"];

/// A free-text attribute attached to an entry (e.g. "Eye Color" = "Green").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
    pub title: String,
    pub value: String,
}

impl Detail {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
        }
    }
}

impl std::fmt::Display for Detail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.value)
    }
}

/// A world-building fact record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub title: String,
    #[serde(rename = "type", default)]
    pub entry_type: String,
    /// Always included in compiled prompts, whether referenced or not.
    #[serde(default)]
    pub is_global: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub details: Vec<Detail>,
}

impl Entry {
    pub fn new(title: impl Into<String>, entry_type: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entry_type: entry_type.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_detail(mut self, title: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.push(Detail::new(title, value));
        self
    }

    pub fn global(mut self, is_global: bool) -> Self {
        self.is_global = is_global;
        self
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_type(&mut self, entry_type: impl Into<String>) {
        self.entry_type = entry_type.into();
    }

    pub fn set_global(&mut self, is_global: bool) {
        self.is_global = is_global;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_details(&mut self, details: Vec<Detail>) {
        self.details = details;
    }

    /// Set a detail value, updating the first detail with the same title or
    /// appending a new one. Titles are compared and stored trimmed.
    pub fn set_detail(&mut self, title: &str, value: impl Into<String>) {
        let title = title.trim();
        let value = value.into();
        match self.details.iter_mut().find(|d| d.title.trim() == title) {
            Some(detail) => {
                detail.title = title.to_string();
                detail.value = value;
            }
            None => self.details.push(Detail::new(title, value)),
        }
    }

    /// Remove every detail with the given title. Returns how many were removed.
    pub fn remove_detail(&mut self, title: &str) -> usize {
        let before = self.details.len();
        let title = title.trim();
        self.details.retain(|d| d.title.trim() != title);
        before - self.details.len()
    }

    pub fn detail(&self, title: &str) -> Option<&Detail> {
        let title = title.trim();
        self.details.iter().find(|d| d.title.trim() == title)
    }

    /// Case-insensitive title comparison, the identity rule for entries.
    pub fn has_title(&self, title: &str) -> bool {
        self.title.trim().to_lowercase() == title.trim().to_lowercase()
    }
}

/// Ordered collection of entries with case-insensitive unique titles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryStore {
    entries: Vec<Entry>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. Fails on a blank title or a case-insensitive duplicate.
    pub fn add(&mut self, entry: Entry) -> Result<usize, LorebookError> {
        if entry.title.trim().is_empty() {
            return Err(LorebookError::Validation(
                "Entry title must not be empty".to_string(),
            ));
        }
        if self.get(&entry.title).is_some() {
            return Err(LorebookError::Conflict(format!(
                "An entry titled '{}' already exists",
                entry.title
            )));
        }
        self.entries.push(entry);
        Ok(self.entries.len() - 1)
    }

    pub fn get(&self, title: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.has_title(title))
    }

    pub fn get_mut(&mut self, title: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.has_title(title))
    }

    /// Rename an entry, keeping titles unique. Renaming to a different casing
    /// of the same title is allowed.
    pub fn rename(&mut self, title: &str, new_title: &str) -> Result<(), LorebookError> {
        if new_title.trim().is_empty() {
            return Err(LorebookError::Validation(
                "Entry title must not be empty".to_string(),
            ));
        }
        let index = self
            .position(title)
            .ok_or_else(|| LorebookError::not_found("entry", title))?;
        if let Some(other) = self.position(new_title) {
            if other != index {
                return Err(LorebookError::Conflict(format!(
                    "An entry titled '{}' already exists",
                    new_title
                )));
            }
        }
        self.entries[index].set_title(new_title);
        Ok(())
    }

    pub fn remove(&mut self, title: &str) -> Option<Entry> {
        let index = self.position(title)?;
        Some(self.entries.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Entry] {
        &self.entries
    }

    /// Entries flagged global, in store order.
    pub fn globals(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.is_global)
    }

    pub fn titles(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.title.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.has_title(title))
    }
}

impl From<Vec<Entry>> for EntryStore {
    /// Wraps entries as-is. Duplicate titles are not rejected here; the linker
    /// treats the first one as authoritative.
    fn from(entries: Vec<Entry>) -> Self {
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a EntryStore {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

//! Test data builders for entries and stories.
//!
//! Provides fluent API for creating test data with sensible defaults.

use lorebook::models::{Entry, Story, StyleConfiguration};

/// Builder for creating test entries.
pub struct EntryBuilder {
    title: String,
    entry_type: String,
    description: String,
    is_global: bool,
    details: Vec<(String, String)>,
}

impl EntryBuilder {
    /// Create a new entry builder with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entry_type: "Character".to_string(),
            description: String::new(),
            is_global: false,
            details: Vec::new(),
        }
    }

    pub fn entry_type(mut self, entry_type: impl Into<String>) -> Self {
        self.entry_type = entry_type.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark the entry as always included in prompts.
    pub fn global(mut self) -> Self {
        self.is_global = true;
        self
    }

    pub fn detail(mut self, title: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.push((title.into(), value.into()));
        self
    }

    pub fn build(self) -> Entry {
        let mut entry = Entry::new(self.title, self.entry_type)
            .with_description(self.description)
            .global(self.is_global);
        for (title, value) in self.details {
            entry = entry.with_detail(title, value);
        }
        entry
    }
}

/// Builder for creating test stories chapter by chapter.
#[derive(Default)]
pub struct StoryBuilder {
    chapters: Vec<Vec<(String, String)>>,
}

impl StoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new chapter; following scenes are added to it.
    pub fn chapter(mut self) -> Self {
        self.chapters.push(Vec::new());
        self
    }

    /// Add a scene with only a summary to the current chapter.
    pub fn scene(self, summary: impl Into<String>) -> Self {
        self.scene_with_text(summary, "")
    }

    /// Add a scene with summary and draft text to the current chapter.
    pub fn scene_with_text(mut self, summary: impl Into<String>, text: impl Into<String>) -> Self {
        if self.chapters.is_empty() {
            self.chapters.push(Vec::new());
        }
        if let Some(chapter) = self.chapters.last_mut() {
            chapter.push((summary.into(), text.into()));
        }
        self
    }

    pub fn build(self) -> Story {
        let mut story = Story::new();
        for scenes in self.chapters {
            let chapter = story.add_chapter();
            for (summary, text) in scenes {
                story
                    .add_scene(chapter, text, summary)
                    .expect("chapter was just added");
            }
        }
        story
    }
}

/// Style with every field set, for full-document snapshots.
pub fn full_style() -> StyleConfiguration {
    StyleConfiguration {
        system_prompt: "You are a novelist.".to_string(),
        style_guide: "Short sentences.".to_string(),
        genre: "Fantasy".to_string(),
        tense: "Past".to_string(),
        language: "English".to_string(),
        point_of_view: "Third person limited".to_string(),
        character_perspective: "Mira".to_string(),
    }
}

//! Story hierarchy: chapters holding ordered scenes.
//!
//! Chapters and scenes are addressed by position. Removing one shifts the
//! indices of everything after it, so callers must not hold indices across a
//! removal.

use serde::{Deserialize, Serialize};

use crate::LorebookError;

/// 0-based (chapter, scene) position in a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneCoordinate {
    pub chapter: usize,
    pub scene: usize,
}

impl SceneCoordinate {
    pub fn new(chapter: usize, scene: usize) -> Self {
        Self { chapter, scene }
    }

    /// Build from 1-based numbers as shown to the writer. Zero is rejected.
    pub fn from_numbers(chapter: usize, scene: usize) -> Result<Self, LorebookError> {
        match (chapter.checked_sub(1), scene.checked_sub(1)) {
            (Some(c), Some(s)) => Ok(Self::new(c, s)),
            _ => Err(LorebookError::Validation(format!(
                "Chapter and scene numbers start at 1 (got chapter {}, scene {})",
                chapter, scene
            ))),
        }
    }

    fn invalid(self) -> LorebookError {
        LorebookError::InvalidCoordinate {
            chapter: self.chapter,
            scene: self.scene,
        }
    }
}

impl std::fmt::Display for SceneCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "chapter {}, scene {}", self.chapter + 1, self.scene + 1)
    }
}

/// A scene: planning summary plus draft prose.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub summary: String,
}

impl Scene {
    pub fn new(text: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            summary: summary.into(),
        }
    }

    pub fn with_summary(summary: impl Into<String>) -> Self {
        Self::new(String::new(), summary)
    }

    pub fn update(&mut self, text: impl Into<String>, summary: impl Into<String>) {
        self.text = text.into();
        self.summary = summary.into();
    }

    /// Number of whitespace-separated words in the draft text.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    #[serde(default)]
    pub scenes: Vec<Scene>,
}

impl Chapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scene and return its index.
    pub fn add_scene(&mut self, text: impl Into<String>, summary: impl Into<String>) -> usize {
        self.scenes.push(Scene::new(text, summary));
        self.scenes.len() - 1
    }

    pub fn scene(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    pub fn scene_mut(&mut self, index: usize) -> Option<&mut Scene> {
        self.scenes.get_mut(index)
    }

    /// Replace a scene's text and summary. Returns false if the index is out of range.
    pub fn update_scene(
        &mut self,
        index: usize,
        text: impl Into<String>,
        summary: impl Into<String>,
    ) -> bool {
        match self.scenes.get_mut(index) {
            Some(scene) => {
                scene.update(text, summary);
                true
            }
            None => false,
        }
    }

    pub fn remove_scene(&mut self, index: usize) -> Option<Scene> {
        (index < self.scenes.len()).then(|| self.scenes.remove(index))
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Scene summaries joined by a single space.
    pub fn summary(&self) -> String {
        self.scenes
            .iter()
            .map(|s| s.summary.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Aggregate counts over a story.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryStats {
    pub chapters: usize,
    pub scenes: usize,
    pub words: usize,
}

/// One line of a story outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterOutline {
    /// 1-based chapter number.
    pub chapter: usize,
    pub scene_count: usize,
    pub summary: String,
}

/// Root of the narrative hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl Story {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty chapter and return its index.
    pub fn add_chapter(&mut self) -> usize {
        self.chapters.push(Chapter::new());
        self.chapters.len() - 1
    }

    pub fn chapter(&self, index: usize) -> Option<&Chapter> {
        self.chapters.get(index)
    }

    pub fn chapter_mut(&mut self, index: usize) -> Option<&mut Chapter> {
        self.chapters.get_mut(index)
    }

    pub fn remove_chapter(&mut self, index: usize) -> Option<Chapter> {
        (index < self.chapters.len()).then(|| self.chapters.remove(index))
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    /// Append a scene to a chapter and return the scene index.
    pub fn add_scene(
        &mut self,
        chapter: usize,
        text: impl Into<String>,
        summary: impl Into<String>,
    ) -> Result<usize, LorebookError> {
        let count = self.chapters.len();
        self.chapters
            .get_mut(chapter)
            .map(|c| c.add_scene(text, summary))
            .ok_or(LorebookError::InvalidCoordinate {
                chapter,
                scene: count,
            })
    }

    /// Look up a scene, failing with `InvalidCoordinate` if either index is out of range.
    pub fn scene(&self, coord: SceneCoordinate) -> Result<&Scene, LorebookError> {
        self.chapters
            .get(coord.chapter)
            .and_then(|c| c.scene(coord.scene))
            .ok_or_else(|| coord.invalid())
    }

    pub fn scene_mut(&mut self, coord: SceneCoordinate) -> Result<&mut Scene, LorebookError> {
        self.chapters
            .get_mut(coord.chapter)
            .and_then(|c| c.scene_mut(coord.scene))
            .ok_or_else(|| coord.invalid())
    }

    pub fn remove_scene(&mut self, coord: SceneCoordinate) -> Result<Scene, LorebookError> {
        self.chapters
            .get_mut(coord.chapter)
            .and_then(|c| c.remove_scene(coord.scene))
            .ok_or_else(|| coord.invalid())
    }

    /// Every scene in reading order with its coordinate.
    pub fn scenes(&self) -> impl Iterator<Item = (SceneCoordinate, &Scene)> {
        self.chapters.iter().enumerate().flat_map(|(c, chapter)| {
            chapter
                .scenes
                .iter()
                .enumerate()
                .map(move |(s, scene)| (SceneCoordinate::new(c, s), scene))
        })
    }

    pub fn stats(&self) -> StoryStats {
        StoryStats {
            chapters: self.chapters.len(),
            scenes: self.chapters.iter().map(Chapter::scene_count).sum(),
            words: self.scenes().map(|(_, s)| s.word_count()).sum(),
        }
    }

    pub fn outline(&self) -> Vec<ChapterOutline> {
        self.chapters
            .iter()
            .enumerate()
            .map(|(i, chapter)| ChapterOutline {
                chapter: i + 1,
                scene_count: chapter.scene_count(),
                summary: chapter.summary(),
            })
            .collect()
    }
}

//! Author-supplied style configuration, one per project.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::LorebookError;

/// Field names accepted by [`StyleConfiguration::set_field`], in document order.
pub const STYLE_FIELDS: &[&str] = &[
    "system_prompt",
    "style_guide",
    "genre",
    "tense",
    "language",
    "point_of_view",
    "character_perspective",
];

/// Style settings rendered into compiled prompts. Every field is optional;
/// an empty field produces no block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfiguration {
    pub system_prompt: String,
    pub style_guide: String,
    pub genre: String,
    pub tense: String,
    pub language: String,
    pub point_of_view: String,
    pub character_perspective: String,
}

impl StyleConfiguration {
    /// All fields as `(name, value)` pairs in document order.
    pub fn fields(&self) -> [(&'static str, &str); 7] {
        [
            ("system_prompt", self.system_prompt.as_str()),
            ("style_guide", self.style_guide.as_str()),
            ("genre", self.genre.as_str()),
            ("tense", self.tense.as_str()),
            ("language", self.language.as_str()),
            ("point_of_view", self.point_of_view.as_str()),
            ("character_perspective", self.character_perspective.as_str()),
        ]
    }

    pub fn get_field(&self, name: &str) -> Option<&str> {
        self.fields()
            .into_iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    /// Set a field by its snake_case name.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), LorebookError> {
        let slot = match name {
            "system_prompt" => &mut self.system_prompt,
            "style_guide" => &mut self.style_guide,
            "genre" => &mut self.genre,
            "tense" => &mut self.tense,
            "language" => &mut self.language,
            "point_of_view" => &mut self.point_of_view,
            "character_perspective" => &mut self.character_perspective,
            other => {
                return Err(LorebookError::Validation(format!(
                    "Unknown style field '{}'. Expected one of: {}",
                    other,
                    STYLE_FIELDS.join(", ")
                )))
            }
        };
        *slot = value.into();
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, v)| v.trim().is_empty())
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, LorebookError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml_string(&self) -> Result<String, LorebookError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load_toml(path: &Path) -> Result<Self, LorebookError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            LorebookError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let style = Self::from_toml_str(&contents)?;
        tracing::info!("Loaded style configuration from {}", path.display());
        Ok(style)
    }

    pub fn save_toml(&self, path: &Path) -> Result<(), LorebookError> {
        std::fs::write(path, self.to_toml_string()?).map_err(|e| {
            LorebookError::Io(format!("Failed to write {}: {}", path.display(), e))
        })
    }
}

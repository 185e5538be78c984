use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::LorebookError;
use crate::models::{DetailRegistry, EntryStore, Story, StyleConfiguration};

/// Everything a writer works on in one project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub entries: EntryStore,
    pub story: Story,
    pub style: StyleConfiguration,
    /// Detail titles and known values learned from entries
    pub details: DetailRegistry,
}

/// Manages project persistence to a JSON file.
pub struct ProjectFile {
    /// Path to the project JSON file
    path: PathBuf,
    /// Current project contents
    pub project: Project,
}

impl ProjectFile {
    /// Wrap a project that will be written to `path` on the next save.
    pub fn new(path: &Path, project: Project) -> Self {
        Self {
            path: path.to_path_buf(),
            project,
        }
    }

    /// Load a project from disk, failing if the file does not exist.
    pub fn load(path: &Path) -> Result<Self, LorebookError> {
        if !path.exists() {
            return Err(LorebookError::Io(format!(
                "Project file {} does not exist (run `lorebook init` first)",
                path.display()
            )));
        }
        Self::load_or_create(path)
    }

    /// Load a project from disk or start an empty one.
    pub fn load_or_create(path: &Path) -> Result<Self, LorebookError> {
        let project = if path.exists() {
            let json = std::fs::read_to_string(path).map_err(|e| {
                LorebookError::Io(format!("Failed to read project {}: {}", path.display(), e))
            })?;

            serde_json::from_str(&json).map_err(|e| {
                LorebookError::Serialization(format!(
                    "Failed to parse project {}: {}",
                    path.display(),
                    e
                ))
            })?
        } else {
            tracing::info!("Starting new project at {}", path.display());
            Project::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            project,
        })
    }

    /// Persist the current project to disk.
    pub fn save(&self) -> Result<(), LorebookError> {
        let json = serde_json::to_string_pretty(&self.project).map_err(|e| {
            LorebookError::Serialization(format!("Failed to serialize project: {}", e))
        })?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    LorebookError::Io(format!("Failed to create project directory: {}", e))
                })?;
            }
        }

        std::fs::write(&self.path, json).map_err(|e| {
            LorebookError::Io(format!(
                "Failed to write project {}: {}",
                self.path.display(),
                e
            ))
        })?;

        tracing::debug!("Saved project to {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

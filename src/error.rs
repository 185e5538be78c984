use thiserror::Error;

/// Custom error type for lorebook operations.
#[derive(Debug, Error)]
pub enum LorebookError {
    /// Chapter or scene index does not exist in the story (0-based indices).
    #[error("Invalid coordinate: chapter index {chapter}, scene index {scene} does not exist")]
    InvalidCoordinate { chapter: usize, scene: usize },

    /// Requested record was not found.
    #[error("Not found: {kind} '{name}'")]
    NotFound { kind: String, name: String },

    /// Input validation failed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict detected (e.g., duplicate entry titles).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// Encoding or decoding a project, style or export document failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl LorebookError {
    pub fn not_found(kind: &str, name: &str) -> Self {
        LorebookError::NotFound {
            kind: kind.to_string(),
            name: name.to_string(),
        }
    }
}

impl From<std::io::Error> for LorebookError {
    fn from(err: std::io::Error) -> Self {
        LorebookError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LorebookError {
    fn from(err: serde_json::Error) -> Self {
        LorebookError::Serialization(format!("JSON: {}", err))
    }
}

impl From<toml::de::Error> for LorebookError {
    fn from(err: toml::de::Error) -> Self {
        LorebookError::Serialization(format!("TOML: {}", err))
    }
}

impl From<toml::ser::Error> for LorebookError {
    fn from(err: toml::ser::Error) -> Self {
        LorebookError::Serialization(format!("TOML: {}", err))
    }
}

impl From<serde_yaml_ng::Error> for LorebookError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        LorebookError::Serialization(format!("YAML: {}", err))
    }
}

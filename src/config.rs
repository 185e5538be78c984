//! User configuration loaded from `{config_dir}/lorebook/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Settings that apply across projects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LorebookConfig {
    /// Project file used when neither `--project` nor `LOREBOOK_PROJECT` is given.
    pub default_project: Option<PathBuf>,
}

/// Default location of the config file, if the platform has a config directory.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lorebook").join("config.toml"))
}

/// Load config from `path`. A missing or unreadable file yields the default
/// config; parse failures are logged and ignored.
pub fn load_config(path: &Path) -> LorebookConfig {
    if !path.exists() {
        return LorebookConfig::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<LorebookConfig>(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}. Using default.", path.display(), e);
                LorebookConfig::default()
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read {}: {}. Using default.", path.display(), e);
            LorebookConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_default() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            load_config(&dir.path().join("config.toml")),
            LorebookConfig::default()
        );
    }

    #[test]
    fn test_default_project_is_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_project = \"/stories/saga.json\"\n").unwrap();
        assert_eq!(
            load_config(&path).default_project,
            Some(PathBuf::from("/stories/saga.json"))
        );
    }

    #[test]
    fn test_malformed_config_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_project = [").unwrap();
        assert_eq!(load_config(&path), LorebookConfig::default());
    }
}

//! Shared initialization logic for CLI commands.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::{config_path, load_config, LorebookConfig};
use crate::project::ProjectFile;
use crate::services::PromptCompiler;

/// File name looked up in the working directory.
pub const LOCAL_PROJECT_FILE: &str = "lorebook.json";

/// Application context holding the open project and the compiler.
pub struct AppContext {
    pub project_file: ProjectFile,
    pub compiler: PromptCompiler,
}

impl AppContext {
    /// Open the project, creating an empty one in memory if the file is missing.
    pub fn open(explicit_path: Option<PathBuf>) -> Result<Self> {
        let path = resolve_project_path(explicit_path, &load_user_config());
        tracing::info!("Using project: {}", path.display());

        Ok(Self {
            project_file: ProjectFile::load_or_create(&path)?,
            compiler: PromptCompiler::default(),
        })
    }

    pub fn save(&self) -> Result<()> {
        self.project_file.save()?;
        Ok(())
    }
}

fn load_user_config() -> LorebookConfig {
    config_path()
        .map(|p| load_config(&p))
        .unwrap_or_default()
}

/// Project path priority: explicit path (flag or LOREBOOK_PROJECT env) >
/// config `default_project` > ./lorebook.json (if exists) > ~/.lorebook/project.json
pub fn resolve_project_path(explicit_path: Option<PathBuf>, config: &LorebookConfig) -> PathBuf {
    explicit_path
        .or_else(|| config.default_project.clone())
        .or_else(|| {
            let local_path = Path::new(LOCAL_PROJECT_FILE);
            if local_path.is_file() {
                Some(local_path.to_path_buf())
            } else {
                None
            }
        })
        .unwrap_or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(".lorebook").join("project.json"))
                .unwrap_or_else(|| PathBuf::from(LOCAL_PROJECT_FILE))
        })
}

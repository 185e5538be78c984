//! Project-level command handlers: init and export.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::cli::output::{output_json, print_hint, print_success, OutputMode};
use crate::init::{AppContext, LOCAL_PROJECT_FILE};
use crate::project::{Project, ProjectFile};
use crate::services::ExportService;

// =============================================================================
// Init
// =============================================================================

pub fn handle_init(path: Option<&Path>, force: bool) -> Result<()> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(LOCAL_PROJECT_FILE));

    if path.exists() && !force {
        anyhow::bail!(
            "Project file {} already exists (use --force to overwrite)",
            path.display()
        );
    }

    ProjectFile::new(&path, Project::default()).save()?;
    print_success(&format!("Created project {}", path.display()));
    print_hint("Next: lorebook entry add <TITLE>, lorebook story add-chapter");
    Ok(())
}

// =============================================================================
// Export
// =============================================================================

pub fn handle_export(ctx: &AppContext, output: Option<&Path>, mode: OutputMode) -> Result<()> {
    let export = ExportService::export_world(&ctx.project_file.project);

    let Some(output_path) = output else {
        if mode == OutputMode::Json {
            output_json(&export);
        } else {
            print!("{}", ExportService::to_yaml(&export)?);
        }
        return Ok(());
    };

    std::fs::write(output_path, ExportService::to_yaml(&export)?)?;

    if mode == OutputMode::Json {
        output_json(&serde_json::json!({
            "output_path": output_path.display().to_string(),
            "entries": export.entries.len(),
            "scenes": export.scenes.len(),
            "style_fields": export.style.len(),
            "detail_types": export.details.len(),
        }));
    } else {
        print_success(&format!("Exported world data to {}", output_path.display()));
        println!("  Entries:      {}", export.entries.len());
        println!("  Scenes:       {}", export.scenes.len());
        println!("  Style fields: {}", export.style.len());
        println!("  Detail types: {}", export.details.len());
    }

    Ok(())
}

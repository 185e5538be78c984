//! Style command handlers.

use std::path::Path;

use anyhow::Result;

use crate::cli::output::{output_json, print_header, print_kv, print_rows, print_success, OutputMode};
use crate::init::AppContext;
use crate::models::StyleConfiguration;

pub fn handle_show(ctx: &AppContext, mode: OutputMode) -> Result<()> {
    let style = &ctx.project_file.project.style;

    match mode {
        OutputMode::Json => output_json(style),
        OutputMode::Markdown => {
            let rows = style
                .fields()
                .iter()
                .map(|(name, value)| vec![name.to_string(), value.to_string()])
                .collect();
            print_rows(mode, &["Field", "Value"], rows);
        }
        OutputMode::Human => {
            print_header("Style");
            for (name, value) in style.fields() {
                print_kv(name, if value.is_empty() { "(unset)" } else { value });
            }
        }
    }
    Ok(())
}

pub fn handle_set(ctx: &mut AppContext, field: &str, value: &str, mode: OutputMode) -> Result<()> {
    ctx.project_file.project.style.set_field(field, value)?;
    ctx.save()?;

    if mode == OutputMode::Json {
        output_json(&serde_json::json!({ "field": field, "value": value }));
    } else {
        print_success(&format!("Set {}", field));
    }
    Ok(())
}

pub fn handle_load(ctx: &mut AppContext, path: &Path, mode: OutputMode) -> Result<()> {
    ctx.project_file.project.style = StyleConfiguration::load_toml(path)?;
    ctx.save()?;

    if mode == OutputMode::Json {
        output_json(&ctx.project_file.project.style);
    } else {
        print_success(&format!("Loaded style from {}", path.display()));
    }
    Ok(())
}

pub fn handle_save(ctx: &AppContext, path: &Path, mode: OutputMode) -> Result<()> {
    ctx.project_file.project.style.save_toml(path)?;

    if mode == OutputMode::Json {
        output_json(&serde_json::json!({ "output_path": path.display().to_string() }));
    } else {
        print_success(&format!("Saved style to {}", path.display()));
    }
    Ok(())
}

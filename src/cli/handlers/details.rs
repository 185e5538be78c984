//! Detail registry command handlers.

use anyhow::Result;

use crate::cli::output::{output_json, print_hint, print_rows, print_success, truncate, OutputMode};
use crate::init::AppContext;
use crate::models::DetailKind;

pub fn handle_list(ctx: &AppContext, mode: OutputMode) -> Result<()> {
    let registry = &ctx.project_file.project.details;

    if mode == OutputMode::Json {
        output_json(&registry.export());
        return Ok(());
    }
    if registry.is_empty() {
        print_hint("No detail types yet. Add details to entries or run: lorebook details learn");
        return Ok(());
    }

    let rows = registry
        .iter()
        .map(|t| {
            let values: Vec<&str> = t.known_values.iter().map(String::as_str).collect();
            vec![
                t.title.clone(),
                t.kind.to_string(),
                truncate(&values.join(", "), 60),
            ]
        })
        .collect();
    print_rows(mode, &["Title", "Kind", "Known values"], rows);
    Ok(())
}

pub fn handle_values(ctx: &AppContext, title: &str, mode: OutputMode) -> Result<()> {
    let registry = &ctx.project_file.project.details;
    if registry.get(title).is_none() {
        anyhow::bail!("No detail type titled '{}'", title.trim());
    }
    let values = registry.values_for(title);

    match mode {
        OutputMode::Json => output_json(&values),
        _ if values.is_empty() => print_hint("No known values."),
        _ => {
            for value in values {
                println!("{}", value);
            }
        }
    }
    Ok(())
}

pub fn handle_kind(ctx: &mut AppContext, title: &str, kind: &str, mode: OutputMode) -> Result<()> {
    let kind: DetailKind = kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let registry = &mut ctx.project_file.project.details;
    registry.register_type(title, kind);

    let actual = registry.kind_of(title);
    if actual != Some(kind) {
        let count = registry.values_for(title).len();
        anyhow::bail!(
            "'{}' stays enumerated: it has {} known value{}",
            title.trim(),
            count,
            if count == 1 { "" } else { "s" }
        );
    }
    ctx.save()?;

    if mode == OutputMode::Json {
        output_json(&serde_json::json!({ "title": title.trim(), "kind": kind }));
    } else {
        print_success(&format!("'{}' is now {}", title.trim(), kind));
    }
    Ok(())
}

pub fn handle_learn(ctx: &mut AppContext, mode: OutputMode) -> Result<()> {
    let project = &mut ctx.project_file.project;
    let before = project.details.len();
    project.details.learn_from_entries(project.entries.iter());
    let added = project.details.len() - before;
    let total = project.details.len();
    ctx.save()?;

    if mode == OutputMode::Json {
        output_json(&serde_json::json!({ "added": added, "total": total }));
    } else {
        print_success(&format!(
            "Learned {} new detail type{} ({} total)",
            added,
            if added == 1 { "" } else { "s" },
            total
        ));
    }
    Ok(())
}

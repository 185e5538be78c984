//! Entry command handlers: list, show, add, remove, update and details.

use anyhow::Result;
use colored::Colorize;

use crate::cli::output::{
    output_json, print_header, print_hint, print_kv, print_rows, print_success, truncate,
    OutputMode,
};
use crate::cli::resolve::{resolve_entry, resolve_entry_mut};
use crate::init::AppContext;
use crate::models::{DetailKind, DetailRegistry, Entry, ENTRY_TYPE_SUGGESTIONS};

/// Register a detail title (freeform if new) and remember its value.
fn note_detail(registry: &mut DetailRegistry, title: &str, value: &str) {
    if registry.get(title).is_none() {
        registry.register_type(title, DetailKind::Freeform);
    }
    registry.record_value(title, value);
}

pub fn handle_list(
    ctx: &AppContext,
    entry_type: Option<&str>,
    global_only: bool,
    mode: OutputMode,
) -> Result<()> {
    let entries: Vec<&Entry> = ctx
        .project_file
        .project
        .entries
        .iter()
        .filter(|e| entry_type.map_or(true, |t| e.entry_type.eq_ignore_ascii_case(t)))
        .filter(|e| !global_only || e.is_global)
        .collect();

    if mode == OutputMode::Json {
        output_json(&entries);
        return Ok(());
    }

    let rows = entries
        .iter()
        .map(|e| {
            vec![
                e.title.clone(),
                e.entry_type.clone(),
                if e.is_global { "yes" } else { "" }.to_string(),
                e.details.len().to_string(),
                truncate(&e.description, 50),
            ]
        })
        .collect();
    print_rows(
        mode,
        &["Title", "Type", "Global", "Details", "Description"],
        rows,
    );
    Ok(())
}

pub fn handle_show(ctx: &AppContext, title: &str, mode: OutputMode) -> Result<()> {
    let entry = resolve_entry(title, &ctx.project_file.project.entries)?;

    match mode {
        OutputMode::Json => output_json(entry),
        OutputMode::Markdown => {
            println!("# {}\n", entry.title);
            println!("**Type:** {}", entry.entry_type);
            if entry.is_global {
                println!("**Global:** yes");
            }
            if !entry.description.is_empty() {
                println!("\n{}", entry.description);
            }
            if !entry.details.is_empty() {
                println!("\n## Details\n");
                for detail in &entry.details {
                    println!("- **{}:** {}", detail.title, detail.value);
                }
            }
        }
        OutputMode::Human => {
            print_header(&entry.title);
            print_kv("Type", &entry.entry_type);
            print_kv("Global", if entry.is_global { "yes" } else { "no" });
            if !entry.description.is_empty() {
                print_kv("Description", &entry.description);
            }
            for detail in &entry.details {
                print_kv(&detail.title, &detail.value);
            }
        }
    }
    Ok(())
}

pub fn handle_add(
    ctx: &mut AppContext,
    title: &str,
    entry_type: &str,
    description: Option<&str>,
    global: bool,
    details: &[(String, String)],
    mode: OutputMode,
) -> Result<()> {
    let mut entry = Entry::new(title.trim(), entry_type.trim()).global(global);
    if let Some(description) = description {
        entry = entry.with_description(description);
    }
    for (detail_title, value) in details {
        if detail_title.trim().is_empty() {
            anyhow::bail!("Detail title must not be empty (got '={}')", value);
        }
        entry.set_detail(detail_title, value.as_str());
    }

    let project = &mut ctx.project_file.project;
    for detail in &entry.details {
        note_detail(&mut project.details, &detail.title, &detail.value);
    }
    let title = entry.title.clone();
    let kind = entry.entry_type.clone();
    project.entries.add(entry)?;
    ctx.save()?;

    if mode == OutputMode::Json {
        output_json(&serde_json::json!({ "added": title }));
    } else {
        print_success(&format!("Added {} '{}'", kind, title));
        if !ENTRY_TYPE_SUGGESTIONS
            .iter()
            .any(|t| t.eq_ignore_ascii_case(&kind))
        {
            print_hint(&format!(
                "Custom type '{}'. Common types: {}",
                kind,
                ENTRY_TYPE_SUGGESTIONS.join(", ")
            ));
        }
    }
    Ok(())
}

pub fn handle_remove(ctx: &mut AppContext, title: &str, mode: OutputMode) -> Result<()> {
    let removed = resolve_entry(title, &ctx.project_file.project.entries)?
        .title
        .clone();
    ctx.project_file.project.entries.remove(&removed);
    ctx.save()?;

    if mode == OutputMode::Json {
        output_json(&serde_json::json!({ "removed": removed }));
    } else {
        print_success(&format!("Removed '{}'", removed));
    }
    Ok(())
}

/// Field changes for `entry update`. `None` leaves a field untouched.
pub struct EntryUpdate<'a> {
    pub rename: Option<&'a str>,
    pub entry_type: Option<&'a str>,
    pub description: Option<&'a str>,
    pub global: Option<bool>,
}

pub fn handle_update(
    ctx: &mut AppContext,
    title: &str,
    update: EntryUpdate<'_>,
    mode: OutputMode,
) -> Result<()> {
    let entries = &mut ctx.project_file.project.entries;
    let mut current = resolve_entry(title, entries)?.title.clone();

    if let Some(new_title) = update.rename {
        entries.rename(&current, new_title)?;
        current = new_title.trim().to_string();
    }

    let entry = resolve_entry_mut(&current, entries)?;
    if let Some(entry_type) = update.entry_type {
        entry.set_type(entry_type.trim());
    }
    if let Some(description) = update.description {
        entry.set_description(description);
    }
    if let Some(global) = update.global {
        entry.set_global(global);
    }
    ctx.save()?;

    if mode == OutputMode::Json {
        output_json(&serde_json::json!({ "updated": current }));
    } else {
        print_success(&format!("Updated '{}'", current));
    }
    Ok(())
}

pub fn handle_set_detail(
    ctx: &mut AppContext,
    title: &str,
    detail: &str,
    value: &str,
    mode: OutputMode,
) -> Result<()> {
    let detail = detail.trim();
    if detail.is_empty() {
        anyhow::bail!("Detail title must not be empty");
    }

    let project = &mut ctx.project_file.project;
    let entry = resolve_entry_mut(title, &mut project.entries)?;
    entry.set_detail(detail, value);
    let entry_title = entry.title.clone();
    note_detail(&mut project.details, detail, value);
    ctx.save()?;

    if mode == OutputMode::Json {
        output_json(&serde_json::json!({
            "entry": entry_title,
            "detail": detail,
            "value": value,
        }));
    } else {
        print_success(&format!("Set {} on '{}'", detail.bold(), entry_title));
    }
    Ok(())
}

pub fn handle_remove_detail(
    ctx: &mut AppContext,
    title: &str,
    detail: &str,
    mode: OutputMode,
) -> Result<()> {
    let entry = resolve_entry_mut(title, &mut ctx.project_file.project.entries)?;
    let removed = entry.remove_detail(detail);
    let entry_title = entry.title.clone();
    if removed == 0 {
        anyhow::bail!("'{}' has no detail titled '{}'", entry_title, detail);
    }
    ctx.save()?;

    if mode == OutputMode::Json {
        output_json(&serde_json::json!({ "entry": entry_title, "removed": removed }));
    } else {
        print_success(&format!("Removed {} from '{}'", detail, entry_title));
    }
    Ok(())
}

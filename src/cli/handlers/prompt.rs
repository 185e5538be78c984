//! Prompt command handlers: write, idea and link.

use std::path::Path;

use anyhow::Result;

use crate::cli::output::{output_json, print_hint, print_rows, print_success, truncate, OutputMode};
use crate::init::AppContext;
use crate::models::SceneCoordinate;

#[derive(Clone, Copy)]
enum PromptKind {
    Writing,
    Idea,
}

impl PromptKind {
    fn label(self) -> &'static str {
        match self {
            PromptKind::Writing => "writing",
            PromptKind::Idea => "idea",
        }
    }
}

pub fn handle_write(
    ctx: &AppContext,
    chapter: usize,
    scene: usize,
    output: Option<&Path>,
    mode: OutputMode,
) -> Result<()> {
    emit_prompt(ctx, PromptKind::Writing, chapter, scene, output, mode)
}

pub fn handle_idea(
    ctx: &AppContext,
    chapter: usize,
    scene: usize,
    output: Option<&Path>,
    mode: OutputMode,
) -> Result<()> {
    emit_prompt(ctx, PromptKind::Idea, chapter, scene, output, mode)
}

fn emit_prompt(
    ctx: &AppContext,
    kind: PromptKind,
    chapter: usize,
    scene: usize,
    output: Option<&Path>,
    mode: OutputMode,
) -> Result<()> {
    let coordinate = SceneCoordinate::from_numbers(chapter, scene)?;
    let project = &ctx.project_file.project;
    let entries = project.entries.as_slice();

    let prompt = match kind {
        PromptKind::Writing => {
            ctx.compiler
                .compile_writing_prompt(coordinate, &project.story, entries, &project.style)?
        }
        PromptKind::Idea => {
            ctx.compiler
                .compile_idea_prompt(coordinate, &project.story, entries, &project.style)?
        }
    };

    if let Some(path) = output {
        std::fs::write(path, &prompt)?;
        if mode == OutputMode::Json {
            output_json(&serde_json::json!({
                "kind": kind.label(),
                "chapter": chapter,
                "scene": scene,
                "output_path": path.display().to_string(),
                "chars": prompt.chars().count(),
            }));
        } else {
            print_success(&format!(
                "Wrote {} prompt for {} to {}",
                kind.label(),
                coordinate,
                path.display()
            ));
        }
        return Ok(());
    }

    match mode {
        OutputMode::Json => output_json(&serde_json::json!({
            "kind": kind.label(),
            "chapter": chapter,
            "scene": scene,
            "prompt": prompt,
        })),
        OutputMode::Markdown => println!("```xml\n{}\n```", prompt),
        OutputMode::Human => println!("{}", prompt),
    }

    Ok(())
}

pub fn handle_link(ctx: &AppContext, text: &str, mode: OutputMode) -> Result<()> {
    let entries = ctx.project_file.project.entries.as_slice();
    let linked = ctx.compiler.linker().find_referenced(text, entries);

    if mode == OutputMode::Json {
        let titles: Vec<&str> = linked.iter().map(|e| e.title.as_str()).collect();
        output_json(&titles);
        return Ok(());
    }

    if linked.is_empty() {
        print_hint("No entries referenced.");
        return Ok(());
    }

    let rows = linked
        .iter()
        .map(|e| {
            vec![
                e.title.clone(),
                e.entry_type.clone(),
                truncate(&e.description, 60),
            ]
        })
        .collect();
    print_rows(mode, &["Title", "Type", "Description"], rows);
    Ok(())
}

//! Story command handlers: outline, stats, chapters and scenes.
//!
//! Chapter and scene numbers on the command line are 1-based.

use anyhow::Result;

use crate::cli::output::{
    output_json, print_header, print_hint, print_kv, print_rows, print_success, truncate,
    OutputMode,
};
use crate::init::AppContext;
use crate::models::SceneCoordinate;

/// 0-based chapter index from a 1-based number that must exist.
fn chapter_index(ctx: &AppContext, chapter: usize) -> Result<usize> {
    let count = ctx.project_file.project.story.chapter_count();
    match chapter.checked_sub(1) {
        Some(index) if index < count => Ok(index),
        _ => anyhow::bail!(
            "Chapter {} does not exist (story has {} chapter{})",
            chapter,
            count,
            if count == 1 { "" } else { "s" }
        ),
    }
}

pub fn handle_outline(ctx: &AppContext, mode: OutputMode) -> Result<()> {
    let outline = ctx.project_file.project.story.outline();

    if mode == OutputMode::Json {
        output_json(&outline);
        return Ok(());
    }
    if outline.is_empty() {
        print_hint("No chapters yet. Add one with: lorebook story add-chapter");
        return Ok(());
    }

    let rows = outline
        .iter()
        .map(|c| {
            vec![
                c.chapter.to_string(),
                c.scene_count.to_string(),
                truncate(&c.summary, 70),
            ]
        })
        .collect();
    print_rows(mode, &["Chapter", "Scenes", "Summary"], rows);
    Ok(())
}

pub fn handle_stats(ctx: &AppContext, mode: OutputMode) -> Result<()> {
    let stats = ctx.project_file.project.story.stats();

    if mode == OutputMode::Json {
        output_json(&stats);
        return Ok(());
    }

    print_header("Story");
    print_kv("Chapters", &stats.chapters.to_string());
    print_kv("Scenes", &stats.scenes.to_string());
    print_kv("Words", &stats.words.to_string());
    Ok(())
}

pub fn handle_show_scene(
    ctx: &AppContext,
    chapter: usize,
    scene: usize,
    mode: OutputMode,
) -> Result<()> {
    let coordinate = SceneCoordinate::from_numbers(chapter, scene)?;
    let found = ctx.project_file.project.story.scene(coordinate)?;

    match mode {
        OutputMode::Json => output_json(found),
        OutputMode::Markdown => {
            println!("# Chapter {}, scene {}\n", chapter, scene);
            println!("**Summary:** {}\n", found.summary);
            println!("{}", found.text);
        }
        OutputMode::Human => {
            print_header(&format!("Chapter {}, scene {}", chapter, scene));
            print_kv("Summary", &found.summary);
            print_kv("Words", &found.word_count().to_string());
            if !found.text.is_empty() {
                println!("\n{}", found.text);
            }
        }
    }
    Ok(())
}

pub fn handle_add_chapter(ctx: &mut AppContext, mode: OutputMode) -> Result<()> {
    let number = ctx.project_file.project.story.add_chapter() + 1;
    ctx.save()?;

    if mode == OutputMode::Json {
        output_json(&serde_json::json!({ "chapter": number }));
    } else {
        print_success(&format!("Added chapter {}", number));
    }
    Ok(())
}

pub fn handle_remove_chapter(ctx: &mut AppContext, chapter: usize, mode: OutputMode) -> Result<()> {
    let index = chapter_index(ctx, chapter)?;
    let removed = ctx
        .project_file
        .project
        .story
        .remove_chapter(index)
        .map(|c| c.scene_count())
        .unwrap_or_default();
    ctx.save()?;

    if mode == OutputMode::Json {
        output_json(&serde_json::json!({ "chapter": chapter, "scenes_removed": removed }));
    } else {
        print_success(&format!(
            "Removed chapter {} ({} scene{})",
            chapter,
            removed,
            if removed == 1 { "" } else { "s" }
        ));
        print_hint("Later chapters were renumbered.");
    }
    Ok(())
}

pub fn handle_add_scene(
    ctx: &mut AppContext,
    chapter: usize,
    summary: &str,
    text: &str,
    mode: OutputMode,
) -> Result<()> {
    let index = chapter_index(ctx, chapter)?;
    let scene = ctx
        .project_file
        .project
        .story
        .add_scene(index, text, summary)?
        + 1;
    ctx.save()?;

    if mode == OutputMode::Json {
        output_json(&serde_json::json!({ "chapter": chapter, "scene": scene }));
    } else {
        print_success(&format!("Added scene {} to chapter {}", scene, chapter));
    }
    Ok(())
}

pub fn handle_set_scene(
    ctx: &mut AppContext,
    chapter: usize,
    scene: usize,
    summary: Option<&str>,
    text: Option<&str>,
    mode: OutputMode,
) -> Result<()> {
    if summary.is_none() && text.is_none() {
        anyhow::bail!("Nothing to change: pass --summary and/or --text");
    }

    let coordinate = SceneCoordinate::from_numbers(chapter, scene)?;
    let target = ctx.project_file.project.story.scene_mut(coordinate)?;
    let new_summary = summary.map_or_else(|| target.summary.clone(), str::to_string);
    let new_text = text.map_or_else(|| target.text.clone(), str::to_string);
    target.update(new_text, new_summary);
    ctx.save()?;

    if mode == OutputMode::Json {
        output_json(&serde_json::json!({ "chapter": chapter, "scene": scene, "updated": true }));
    } else {
        print_success(&format!("Updated {}", coordinate));
    }
    Ok(())
}

pub fn handle_remove_scene(
    ctx: &mut AppContext,
    chapter: usize,
    scene: usize,
    mode: OutputMode,
) -> Result<()> {
    let coordinate = SceneCoordinate::from_numbers(chapter, scene)?;
    ctx.project_file.project.story.remove_scene(coordinate)?;
    ctx.save()?;

    if mode == OutputMode::Json {
        output_json(&serde_json::json!({ "chapter": chapter, "scene": scene, "removed": true }));
    } else {
        print_success(&format!("Removed {}", coordinate));
    }
    Ok(())
}

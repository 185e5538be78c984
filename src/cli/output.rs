//! Output formatting for CLI commands: JSON, comfy-table tables for the
//! terminal, and pipe tables for Markdown.

use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use serde::Serialize;

/// Output mode for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Markdown,
}

impl OutputMode {
    /// `--json` wins over `--md`.
    pub fn from_flags(json: bool, md: bool) -> Self {
        match (json, md) {
            (true, _) => OutputMode::Json,
            (false, true) => OutputMode::Markdown,
            (false, false) => OutputMode::Human,
        }
    }
}

/// Print any serializable value as pretty JSON on stdout.
pub fn output_json<T: Serialize + ?Sized>(item: &T) {
    match serde_json::to_string_pretty(item) {
        Ok(json) => println!("{json}"),
        Err(e) => print_error(&format!("Failed to serialize to JSON: {e}")),
    }
}

fn terminal_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(headers.to_vec())
        .add_rows(rows);
    table
}

fn markdown_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let line = |cells: Vec<String>| format!("| {} |", cells.join(" | "));

    let mut lines = vec![
        line(headers.iter().map(|h| h.to_string()).collect()),
        format!("|{}", "---|".repeat(headers.len())),
    ];
    lines.extend(
        rows.iter()
            .map(|row| line(row.iter().map(|c| c.replace('|', "\\|")).collect())),
    );
    lines.join("\n")
}

/// Print rows as a Markdown pipe table or a terminal table. JSON output is
/// handled by callers, which serialize their own records.
pub fn print_rows(mode: OutputMode, headers: &[&str], rows: Vec<Vec<String>>) {
    if rows.is_empty() {
        print_hint("No results found.");
        return;
    }
    match mode {
        OutputMode::Markdown => println!("{}", markdown_table(headers, &rows)),
        OutputMode::Human | OutputMode::Json => println!("{}", terminal_table(headers, rows)),
    }
}

pub fn print_success(msg: &str) {
    println!("{} {msg}", "OK".green().bold());
}

/// Errors go to stderr so stdout stays parseable.
pub fn print_error(msg: &str) {
    eprintln!("{} {msg}", "Error:".red().bold());
}

pub fn print_header(title: &str) {
    println!("\n{}\n", title.bold());
}

pub fn print_kv(key: &str, value: &str) {
    println!("  {}: {value}", key.dimmed());
}

pub fn print_hint(msg: &str) {
    println!("{}", msg.dimmed());
}

/// Single-line cell text of at most `max` characters, with an ellipsis when cut.
pub fn truncate(text: &str, max: usize) -> String {
    let flat = text.replace('\n', " ");
    match flat.char_indices().nth(max) {
        None => flat,
        Some(_) => {
            let kept: String = flat.chars().take(max.saturating_sub(1)).collect();
            kept + "…"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_mode_flags() {
        assert_eq!(OutputMode::from_flags(false, false), OutputMode::Human);
        assert_eq!(OutputMode::from_flags(true, true), OutputMode::Json);
        assert_eq!(OutputMode::from_flags(false, true), OutputMode::Markdown);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exact", 5), "exact");
        assert_eq!(truncate("line one\nline two", 100), "line one line two");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn test_markdown_table_escapes_pipes() {
        let rendered = markdown_table(
            &["Title", "Type"],
            &[vec!["Mira".to_string(), "Character|Healer".to_string()]],
        );
        assert_eq!(
            rendered,
            "| Title | Type |\n|---|---|\n| Mira | Character\\|Healer |"
        );
    }

    #[test]
    fn test_terminal_table_contains_cells() {
        let table = terminal_table(&["Title"], vec![vec!["Mira".to_string()]]);
        let rendered = table.to_string();
        assert!(rendered.contains("Title"));
        assert!(rendered.contains("Mira"));
    }
}

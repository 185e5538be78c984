//! CLI interface for Lorebook.

pub mod handlers;
pub mod output;
pub mod resolve;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use output::OutputMode;

/// Lorebook - link world-building entries to scenes and compile writing prompts
#[derive(Parser)]
#[command(name = "lorebook", version, about, long_about = None)]
pub struct Cli {
    /// Project file (default: config default_project, ./lorebook.json, ~/.lorebook/project.json)
    #[arg(long, env = "LOREBOOK_PROJECT", global = true)]
    pub project: Option<PathBuf>,

    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    pub json: bool,

    /// Output as Markdown
    #[arg(long, global = true)]
    pub md: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty project file
    Init {
        /// Where to create it (default: ./lorebook.json)
        path: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Compile a prompt for a scene
    #[command(subcommand)]
    Prompt(PromptCommands),

    /// Show which entries a piece of text references
    Link {
        /// Text to scan for entry titles
        text: String,
    },

    /// Manage lorebook entries
    #[command(subcommand)]
    Entry(EntryCommands),

    /// Manage chapters and scenes
    #[command(subcommand)]
    Story(StoryCommands),

    /// Manage the style configuration
    #[command(subcommand)]
    Style(StyleCommands),

    /// Inspect and adjust the detail registry
    #[command(subcommand)]
    Details(DetailsCommands),

    /// Export entries, scene summaries, style and details as YAML
    Export {
        /// Output file path (default: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, elvish, powershell)
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum PromptCommands {
    /// Prompt asking a model to write the scene
    Write {
        /// Chapter number (1-based)
        #[arg(long)]
        chapter: usize,
        /// Scene number within the chapter (1-based)
        #[arg(long)]
        scene: usize,
        /// Write the prompt to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Prompt asking a model to brainstorm the scene
    Idea {
        /// Chapter number (1-based)
        #[arg(long)]
        chapter: usize,
        /// Scene number within the chapter (1-based)
        #[arg(long)]
        scene: usize,
        /// Write the prompt to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum EntryCommands {
    /// List entries
    List {
        /// Only entries of this type
        #[arg(long = "type")]
        entry_type: Option<String>,
        /// Only global entries
        #[arg(long)]
        global: bool,
    },
    /// Show one entry
    Show { title: String },
    /// Add an entry
    Add {
        title: String,
        /// Entry type (Character, Location, Lore, Object, Subplot, or any other)
        #[arg(long = "type", default_value = "Character")]
        entry_type: String,
        #[arg(long, short)]
        description: Option<String>,
        /// Always include in prompts
        #[arg(long)]
        global: bool,
        /// Details as title=value (repeatable)
        #[arg(long = "detail", value_parser = parse_key_val, action = clap::ArgAction::Append)]
        details: Vec<(String, String)>,
    },
    /// Remove an entry
    Remove { title: String },
    /// Change an entry's fields
    Update {
        title: String,
        /// New title
        #[arg(long)]
        rename: Option<String>,
        #[arg(long = "type")]
        entry_type: Option<String>,
        #[arg(long, short)]
        description: Option<String>,
        /// Set whether the entry is always included
        #[arg(long)]
        global: Option<bool>,
    },
    /// Set a detail on an entry (replaces an existing detail with the same title)
    Detail {
        title: String,
        /// Detail title, e.g. "Eye Color"
        detail: String,
        value: String,
    },
    /// Remove a detail from an entry
    Undetail { title: String, detail: String },
}

#[derive(Subcommand)]
pub enum StoryCommands {
    /// Chapters with scene counts and summaries
    Outline,
    /// Chapter, scene and word counts
    Stats,
    /// Show one scene
    Show {
        #[arg(long)]
        chapter: usize,
        #[arg(long)]
        scene: usize,
    },
    /// Append an empty chapter
    AddChapter,
    /// Remove a chapter and its scenes
    RemoveChapter {
        #[arg(long)]
        chapter: usize,
    },
    /// Append a scene to a chapter
    AddScene {
        #[arg(long)]
        chapter: usize,
        #[arg(long, short)]
        summary: String,
        #[arg(long, default_value = "")]
        text: String,
    },
    /// Change a scene's summary and/or text
    SetScene {
        #[arg(long)]
        chapter: usize,
        #[arg(long)]
        scene: usize,
        #[arg(long, short)]
        summary: Option<String>,
        #[arg(long)]
        text: Option<String>,
    },
    /// Remove a scene
    RemoveScene {
        #[arg(long)]
        chapter: usize,
        #[arg(long)]
        scene: usize,
    },
}

#[derive(Subcommand)]
pub enum StyleCommands {
    /// Show all style fields
    Show,
    /// Set one style field (system_prompt, style_guide, genre, tense, language,
    /// point_of_view, character_perspective)
    Set { field: String, value: String },
    /// Replace the style with the contents of a TOML file
    Load { path: PathBuf },
    /// Write the style to a TOML file
    Save { path: PathBuf },
}

#[derive(Subcommand)]
pub enum DetailsCommands {
    /// List detail types
    List,
    /// Known values for one detail type
    Values { title: String },
    /// Set the kind of a detail type (freeform or enumerated)
    Kind { title: String, kind: String },
    /// Register every detail used by existing entries
    Learn,
}

/// Parse a `title=value` pair. Both halves are trimmed; the title must not be blank.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (title, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid title=value: no '=' found in '{}'", s))?;
    let title = title.trim();
    if title.is_empty() {
        return Err(format!("invalid title=value: empty title in '{}'", s));
    }
    Ok((title.to_string(), value.trim().to_string()))
}

/// Commands that do not need an open project. Returns `false` for everything else.
pub fn execute_standalone(cli: &Cli) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::Init { path, force } => {
            let target = path.as_deref().or(cli.project.as_deref());
            handlers::world::handle_init(target, *force)?;
            Ok(true)
        }
        Commands::Completions { shell } => {
            clap_complete::generate(
                *shell,
                &mut Cli::command(),
                "lorebook",
                &mut std::io::stdout(),
            );
            Ok(true)
        }
        _ => Ok(false),
    }
}

pub fn execute(
    command: &Commands,
    ctx: &mut crate::init::AppContext,
    mode: OutputMode,
) -> anyhow::Result<()> {
    match command {
        Commands::Init { .. } | Commands::Completions { .. } => {
            unreachable!("handled before the project is opened")
        }

        Commands::Prompt(cmd) => match cmd {
            PromptCommands::Write {
                chapter,
                scene,
                output,
            } => handlers::prompt::handle_write(ctx, *chapter, *scene, output.as_deref(), mode)?,
            PromptCommands::Idea {
                chapter,
                scene,
                output,
            } => handlers::prompt::handle_idea(ctx, *chapter, *scene, output.as_deref(), mode)?,
        },

        Commands::Link { text } => handlers::prompt::handle_link(ctx, text, mode)?,

        Commands::Entry(cmd) => match cmd {
            EntryCommands::List { entry_type, global } => {
                handlers::entry::handle_list(ctx, entry_type.as_deref(), *global, mode)?
            }
            EntryCommands::Show { title } => handlers::entry::handle_show(ctx, title, mode)?,
            EntryCommands::Add {
                title,
                entry_type,
                description,
                global,
                details,
            } => handlers::entry::handle_add(
                ctx,
                title,
                entry_type,
                description.as_deref(),
                *global,
                details,
                mode,
            )?,
            EntryCommands::Remove { title } => handlers::entry::handle_remove(ctx, title, mode)?,
            EntryCommands::Update {
                title,
                rename,
                entry_type,
                description,
                global,
            } => handlers::entry::handle_update(
                ctx,
                title,
                handlers::entry::EntryUpdate {
                    rename: rename.as_deref(),
                    entry_type: entry_type.as_deref(),
                    description: description.as_deref(),
                    global: *global,
                },
                mode,
            )?,
            EntryCommands::Detail {
                title,
                detail,
                value,
            } => handlers::entry::handle_set_detail(ctx, title, detail, value, mode)?,
            EntryCommands::Undetail { title, detail } => {
                handlers::entry::handle_remove_detail(ctx, title, detail, mode)?
            }
        },

        Commands::Story(cmd) => match cmd {
            StoryCommands::Outline => handlers::story::handle_outline(ctx, mode)?,
            StoryCommands::Stats => handlers::story::handle_stats(ctx, mode)?,
            StoryCommands::Show { chapter, scene } => {
                handlers::story::handle_show_scene(ctx, *chapter, *scene, mode)?
            }
            StoryCommands::AddChapter => handlers::story::handle_add_chapter(ctx, mode)?,
            StoryCommands::RemoveChapter { chapter } => {
                handlers::story::handle_remove_chapter(ctx, *chapter, mode)?
            }
            StoryCommands::AddScene {
                chapter,
                summary,
                text,
            } => handlers::story::handle_add_scene(ctx, *chapter, summary, text, mode)?,
            StoryCommands::SetScene {
                chapter,
                scene,
                summary,
                text,
            } => handlers::story::handle_set_scene(
                ctx,
                *chapter,
                *scene,
                summary.as_deref(),
                text.as_deref(),
                mode,
            )?,
            StoryCommands::RemoveScene { chapter, scene } => {
                handlers::story::handle_remove_scene(ctx, *chapter, *scene, mode)?
            }
        },

        Commands::Style(cmd) => match cmd {
            StyleCommands::Show => handlers::style::handle_show(ctx, mode)?,
            StyleCommands::Set { field, value } => {
                handlers::style::handle_set(ctx, field, value, mode)?
            }
            StyleCommands::Load { path } => handlers::style::handle_load(ctx, path, mode)?,
            StyleCommands::Save { path } => handlers::style::handle_save(ctx, path, mode)?,
        },

        Commands::Details(cmd) => match cmd {
            DetailsCommands::List => handlers::details::handle_list(ctx, mode)?,
            DetailsCommands::Values { title } => {
                handlers::details::handle_values(ctx, title, mode)?
            }
            DetailsCommands::Kind { title, kind } => {
                handlers::details::handle_kind(ctx, title, kind, mode)?
            }
            DetailsCommands::Learn => handlers::details::handle_learn(ctx, mode)?,
        },

        Commands::Export { output } => {
            handlers::world::handle_export(ctx, output.as_deref(), mode)?
        }
    }

    Ok(())
}

//! Prompt compilation: turn a scene coordinate into a tagged text document.
//!
//! Both document variants share one context-gathering pass:
//! 1. Collect the previous scenes (every scene before the target, in reading order)
//! 2. Link entries against the previous summaries plus the target summary
//! 3. Append global entries that were not linked
//!
//! Documents are a sequence of `<tag>\n...\n</tag>` blocks separated by a
//! blank line. Blocks with no content are left out, and block order is fixed:
//! downstream models are sensitive to section ordering.

use std::collections::HashSet;
use std::sync::Arc;

use crate::models::{Entry, Scene, SceneCoordinate, Story, StyleConfiguration};
use crate::services::linker::{EntityLinker, RegexEntityLinker};
use crate::LorebookError;

const WORLD_INFO_TAG: &str = "world_info";
const PREVIOUS_SCENES_TAG: &str = "previous_scenes";
const SCENE_TO_WRITE_TAG: &str = "scene_to_write";
const CURRENT_SCENE_DRAFT_TAG: &str = "current_scene_draft";
const BRAINSTORMING_REQUEST_TAG: &str = "brainstorming_request";

/// Style fields rendered in the header of an idea prompt.
const IDEA_STYLE_FIELDS: &[&str] = &["genre", "point_of_view", "character_perspective"];

/// Fixed closing instructions of an idea prompt.
pub const BRAINSTORMING_REQUEST: &str = "\
Using the world info, the previous scenes and the current scene draft above, brainstorm ways to develop the current scene. Offer several options in each of these directions:
1. Scene ideas: concrete events or situations that could take place in this scene.
2. Conflict options: obstacles, disagreements or dangers that would raise the stakes.
3. Character moments: choices, reactions or revelations that show who the characters are.
4. Plot advancement: ways this scene could move the larger story forward.
5. Emotional beats: the feelings this scene could evoke and how they shift from start to end.";

/// A scene that precedes the target scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviousScene<'a> {
    pub coordinate: SceneCoordinate,
    pub summary: &'a str,
}

/// Everything a document variant needs, gathered once per compile call.
#[derive(Debug, Clone)]
pub struct PromptContext<'a> {
    pub coordinate: SceneCoordinate,
    pub target: &'a Scene,
    pub previous_scenes: Vec<PreviousScene<'a>>,
    /// Linked entries in match order, then unlinked global entries in store order.
    pub entries: Vec<&'a Entry>,
}

/// Compiles writing and idea prompts. Holds no state besides the linker.
#[derive(Clone)]
pub struct PromptCompiler {
    linker: Arc<dyn EntityLinker>,
}

impl Default for PromptCompiler {
    fn default() -> Self {
        Self::new(Arc::new(RegexEntityLinker::new()))
    }
}

impl PromptCompiler {
    pub fn new(linker: Arc<dyn EntityLinker>) -> Self {
        Self { linker }
    }

    pub fn linker(&self) -> &dyn EntityLinker {
        self.linker.as_ref()
    }

    /// Collect previous scenes and relevant entries for a coordinate.
    ///
    /// Fails with `InvalidCoordinate` if the chapter or scene does not exist.
    pub fn gather_context<'a>(
        &self,
        coordinate: SceneCoordinate,
        story: &'a Story,
        entries: &'a [Entry],
    ) -> Result<PromptContext<'a>, LorebookError> {
        let target = story.scene(coordinate)?;

        let previous_scenes: Vec<PreviousScene<'a>> = story
            .scenes()
            .take_while(|(c, _)| *c != coordinate)
            .map(|(c, scene)| PreviousScene {
                coordinate: c,
                summary: scene.summary.as_str(),
            })
            .collect();

        let link_text = previous_scenes
            .iter()
            .map(|p| p.summary)
            .chain(std::iter::once(target.summary.as_str()))
            .collect::<Vec<_>>()
            .join("\n");

        let linked = self.linker.find_referenced(&link_text, entries);
        let linked_count = linked.len();

        let mut seen: HashSet<String> = linked.iter().map(|e| title_key(e)).collect();
        let mut context_entries = linked;
        for entry in entries.iter().filter(|e| e.is_global) {
            if seen.insert(title_key(entry)) {
                context_entries.push(entry);
            }
        }

        tracing::debug!(
            "Context for {}: {} previous scenes, {} linked entries, {} global entries",
            coordinate,
            previous_scenes.len(),
            linked_count,
            context_entries.len() - linked_count
        );

        Ok(PromptContext {
            coordinate,
            target,
            previous_scenes,
            entries: context_entries,
        })
    }

    /// Compile the document asking a model to write the target scene.
    pub fn compile_writing_prompt(
        &self,
        coordinate: SceneCoordinate,
        story: &Story,
        entries: &[Entry],
        style: &StyleConfiguration,
    ) -> Result<String, LorebookError> {
        let context = self.gather_context(coordinate, story, entries)?;

        let mut doc = PromptDocument::new();
        for (tag, value) in style.fields() {
            doc.push_block(tag, value);
        }
        doc.push_block(WORLD_INFO_TAG, &render_world_info(&context.entries));
        doc.push_block(
            PREVIOUS_SCENES_TAG,
            &render_previous_scenes(&context.previous_scenes),
        );
        doc.push_block(SCENE_TO_WRITE_TAG, &context.target.summary);

        Ok(doc.render())
    }

    /// Compile the document asking a model to brainstorm the target scene.
    pub fn compile_idea_prompt(
        &self,
        coordinate: SceneCoordinate,
        story: &Story,
        entries: &[Entry],
        style: &StyleConfiguration,
    ) -> Result<String, LorebookError> {
        let context = self.gather_context(coordinate, story, entries)?;

        let mut doc = PromptDocument::new();
        for (tag, value) in style.fields() {
            if IDEA_STYLE_FIELDS.contains(&tag) {
                doc.push_block(tag, value);
            }
        }
        doc.push_block(WORLD_INFO_TAG, &render_world_info(&context.entries));
        doc.push_block(
            PREVIOUS_SCENES_TAG,
            &render_previous_scenes(&context.previous_scenes),
        );
        doc.push_block(CURRENT_SCENE_DRAFT_TAG, &context.target.summary);
        doc.push_block(BRAINSTORMING_REQUEST_TAG, BRAINSTORMING_REQUEST);

        Ok(doc.render())
    }
}

/// Compile a writing prompt with the default linker.
pub fn compile_writing_prompt(
    coordinate: SceneCoordinate,
    story: &Story,
    entries: &[Entry],
    style: &StyleConfiguration,
) -> Result<String, LorebookError> {
    PromptCompiler::default().compile_writing_prompt(coordinate, story, entries, style)
}

/// Compile an idea prompt with the default linker.
pub fn compile_idea_prompt(
    coordinate: SceneCoordinate,
    story: &Story,
    entries: &[Entry],
    style: &StyleConfiguration,
) -> Result<String, LorebookError> {
    PromptCompiler::default().compile_idea_prompt(coordinate, story, entries, style)
}

/// Tag name for a detail title: trimmed, lowercased, spaces as underscores.
pub fn detail_tag(title: &str) -> String {
    title.trim().to_lowercase().replace(' ', "_")
}

fn title_key(entry: &Entry) -> String {
    entry.title.trim().to_lowercase()
}

/// Ordered blocks of a document. Blank content never produces a block.
struct PromptDocument {
    blocks: Vec<String>,
}

impl PromptDocument {
    fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    fn push_block(&mut self, tag: &str, content: &str) {
        let content = content.trim();
        if content.is_empty() {
            return;
        }
        self.blocks.push(format!("<{tag}>\n{content}\n</{tag}>"));
    }

    fn render(self) -> String {
        self.blocks.join("\n\n")
    }
}

fn render_world_info(entries: &[&Entry]) -> String {
    entries
        .iter()
        .filter_map(|e| render_entry(e))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_entry(entry: &Entry) -> Option<String> {
    let mut lines = Vec::new();

    let title = entry.title.trim();
    if !title.is_empty() {
        lines.push(format!("<title>{title}</title>"));
    }
    let description = entry.description.trim();
    if !description.is_empty() {
        lines.push(format!("<description>{description}</description>"));
    }
    for detail in &entry.details {
        let tag = detail_tag(&detail.title);
        let value = detail.value.trim();
        if tag.is_empty() || value.is_empty() {
            continue;
        }
        lines.push(format!("<{tag}>{value}</{tag}>"));
    }

    if lines.is_empty() {
        return None;
    }
    Some(format!("<entry>\n{}\n</entry>", lines.join("\n")))
}

fn render_previous_scenes(scenes: &[PreviousScene<'_>]) -> String {
    scenes
        .iter()
        .filter_map(|p| {
            let summary = p.summary.trim();
            if summary.is_empty() {
                return None;
            }
            Some(format!(
                "<scene chapter=\"{}\" number=\"{}\">{}</scene>",
                p.coordinate.chapter + 1,
                p.coordinate.scene + 1,
                summary
            ))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

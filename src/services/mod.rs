pub mod compiler;
pub mod export;
pub mod linker;

pub use compiler::{
    compile_idea_prompt, compile_writing_prompt, detail_tag, PreviousScene, PromptCompiler,
    PromptContext, BRAINSTORMING_REQUEST,
};
pub use export::{ExportService, WorldExport};
pub use linker::{find_referenced_entries, EntityLinker, RegexEntityLinker};

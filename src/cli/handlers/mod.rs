//! CLI command handlers.

pub mod details;
pub mod entry;
pub mod prompt;
pub mod story;
pub mod style;
pub mod world;

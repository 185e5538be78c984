pub mod entry;
pub mod registry;
pub mod story;
pub mod style;

pub use entry::{Detail, Entry, EntryStore, ENTRY_TYPE_SUGGESTIONS};
pub use registry::{DetailKind, DetailRegistry, DetailType, DetailTypeRecord};
pub use story::{Chapter, ChapterOutline, Scene, SceneCoordinate, Story, StoryStats};
pub use style::{StyleConfiguration, STYLE_FIELDS};

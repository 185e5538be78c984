mod file;

pub use file::{Project, ProjectFile};

pub mod json_file;
pub mod memory;

pub use json_file::{IdStrategy, JsonFileBackend};
pub use memory::MemoryBackend;

pub use crate::{BackendError, Note, NoteBackend, NoteDraft, NoteError, Result};

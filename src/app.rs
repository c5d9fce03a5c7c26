use crate::{Note, NoteBackend, NoteDraft, Result};
use log::debug;
use std::sync::Arc;

/// Entry point shared by the menu and the HTTP API.
///
/// Cloning is cheap: every clone talks to the same backend.
#[derive(Clone)]
pub struct NoteService {
    backend: Arc<dyn NoteBackend>,
}

impl NoteService {
    #[must_use]
    pub const fn new(backend: Arc<dyn NoteBackend>) -> Self {
        Self { backend }
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Store a new note and return it with its assigned ID
    ///
    /// # Errors
    ///
    /// Any error from the backend's `create`
    pub fn create_note(&self, title: String, content: String) -> Result<Note> {
        let note = self.backend.create(NoteDraft { title, content })?;
        debug!("Created note #{} in {} backend", note.id, self.backend_name());
        Ok(note)
    }

    /// Retrieve every note
    ///
    /// # Errors
    ///
    /// Any error from the backend's `list`
    pub fn list_notes(&self) -> Result<Vec<Note>> {
        let notes = self.backend.list()?;
        debug!("Listed {} notes", notes.len());
        Ok(notes)
    }

    /// # Errors
    ///
    /// Returns `BackendError::NoteNotFound` if no note has the ID
    pub fn read_note(&self, id: u64) -> Result<Note> {
        self.backend.read(id)
    }

    /// ID stays the same, but title and content is replaced
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NoteNotFound` if no note has the ID
    pub fn update_note(&self, id: u64, title: String, content: String) -> Result<Note> {
        let note = self.backend.update(id, NoteDraft { title, content })?;
        debug!("Updated note #{id}");
        Ok(note)
    }

    /// # Errors
    ///
    /// Returns `BackendError::NoteNotFound` if no note has the ID
    pub fn delete_note(&self, id: u64) -> Result<()> {
        self.backend.delete(id)?;
        debug!("Deleted note #{id}");
        Ok(())
    }
}

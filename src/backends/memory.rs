use super::{BackendError, Note, NoteBackend, NoteDraft, NoteError, Result};
use log::trace;
use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

#[derive(Debug)]
struct MemoryState {
    notes: BTreeMap<u64, Note>,
    next_id: u64,
}

/// Process-local note store. Contents are lost when the backend is dropped.
///
/// All state sits behind one mutex and every operation, including the
/// existence check of `update` and `delete`, runs in a single critical section.
/// IDs come from a counter that only grows, so a deleted ID is never handed out again.
#[derive(Debug)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                notes: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    fn state(&self) -> Result<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| NoteError::Backend(BackendError::LockPoisoned))
    }
}

impl NoteBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn create(&self, draft: NoteDraft) -> Result<Note> {
        let mut state = self.state()?;
        let id = state.next_id;
        state.next_id = id
            .checked_add(1)
            .ok_or(NoteError::Backend(BackendError::IdSpaceExhausted))?;
        let note = draft.into_note(id);
        trace!("Inserting note #{id}");
        state.notes.insert(id, note.clone());
        Ok(note)
    }

    /// Snapshot of all notes. Callers must not depend on the order
    fn list(&self) -> Result<Vec<Note>> {
        Ok(self.state()?.notes.values().cloned().collect())
    }

    fn read(&self, id: u64) -> Result<Note> {
        self.state()?
            .notes
            .get(&id)
            .cloned()
            .ok_or(NoteError::Backend(BackendError::NoteNotFound(id)))
    }

    fn update(&self, id: u64, draft: NoteDraft) -> Result<Note> {
        let mut state = self.state()?;
        let note = state
            .notes
            .get_mut(&id)
            .ok_or(NoteError::Backend(BackendError::NoteNotFound(id)))?;
        note.title = draft.title;
        note.content = draft.content;
        Ok(note.clone())
    }

    fn delete(&self, id: u64) -> Result<()> {
        self.state()?
            .notes
            .remove(&id)
            .map(|_| trace!("Removed note #{id}"))
            .ok_or(NoteError::Backend(BackendError::NoteNotFound(id)))
    }
}

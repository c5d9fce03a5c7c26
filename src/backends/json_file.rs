use super::{BackendError, Note, NoteBackend, NoteDraft, NoteError, Result};
use clap::ValueEnum;
use log::{debug, trace};
use std::{
    fs::File,
    io::{ErrorKind, Read, Write},
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

/// How the file backend picks the ID of a new note
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdStrategy {
    /// One more than the highest ID in the file. Never collides with a live note
    #[default]
    NextAfterMax,
    /// Number of notes in the file plus one. Reuses IDs after a deletion
    CountPlusOne,
}

impl IdStrategy {
    /// Picks the ID for a note appended to `notes`
    ///
    /// # Errors
    ///
    /// Returns `BackendError::IdSpaceExhausted` if the next ID would not fit in a `u64`
    pub fn next_id(self, notes: &[Note]) -> Result<u64> {
        let last = match self {
            Self::NextAfterMax => notes.iter().map(|n| n.id).max().unwrap_or(0),
            Self::CountPlusOne => u64::try_from(notes.len()).unwrap_or(u64::MAX),
        };
        last.checked_add(1)
            .ok_or(NoteError::Backend(BackendError::IdSpaceExhausted))
    }
}

/// Keeps every note in a single JSON array on disk.
///
/// Each mutation loads the whole array, changes it and overwrites the file.
/// The overwrite is not atomic: a crash halfway through `save` can leave a
/// truncated file behind.
#[derive(Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
    id_strategy: IdStrategy,
    // Held for a whole load-mutate-save cycle
    lock: Mutex<()>,
}

impl JsonFileBackend {
    /// Creates a backend for the file at `path`. The file is not touched until the first operation
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, id_strategy: IdStrategy) -> Self {
        Self {
            path: path.into(),
            id_strategy,
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the full collection from the backing file
    ///
    /// A missing file or a file holding only whitespace is an empty collection.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `BackendError::FileOpenError` if the file exists but cannot be opened
    /// - `BackendError::FileReadError` if reading the file fails
    /// - `BackendError::DecodeError` if the file is not a JSON array of notes
    pub fn load(&self) -> Result<Vec<Note>> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!("No notes file at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(NoteError::Backend(BackendError::FileOpenError(e))),
        };

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| NoteError::Backend(BackendError::FileReadError(e)))?;

        if contents.trim().is_empty() {
            trace!("Notes file {} is empty", self.path.display());
            return Ok(Vec::new());
        }

        let notes: Vec<Note> = serde_json::from_str(&contents)
            .map_err(|e| NoteError::Backend(BackendError::DecodeError(e)))?;
        trace!("Loaded {} notes from {}", notes.len(), self.path.display());
        Ok(notes)
    }

    /// Serializes `notes` and overwrites the backing file with them
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `BackendError::EncodeError` if the notes cannot be serialized
    /// - `BackendError::FileCreationError` if the file cannot be created or truncated
    /// - `BackendError::FileWriteError` if writing to the file fails
    pub fn save(&self, notes: &[Note]) -> Result<()> {
        let mut data = serde_json::to_vec(notes)
            .map_err(|e| NoteError::Backend(BackendError::EncodeError(e)))?;
        data.push(b'\n');

        let mut file = File::create(&self.path)
            .map_err(|e| NoteError::Backend(BackendError::FileCreationError(e)))?;
        file.write_all(&data)
            .and_then(|()| file.flush())
            .map_err(|e| NoteError::Backend(BackendError::FileWriteError(e)))?;
        trace!("Wrote {} notes to {}", notes.len(), self.path.display());
        Ok(())
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| NoteError::Backend(BackendError::LockPoisoned))
    }
}

impl NoteBackend for JsonFileBackend {
    fn name(&self) -> &'static str {
        "json-file"
    }

    /// Appends a note with an ID picked by the configured `IdStrategy`
    ///
    /// # Errors
    ///
    /// Any error from `load` or `save`. Nothing is written if loading fails
    fn create(&self, draft: NoteDraft) -> Result<Note> {
        let _guard = self.guard()?;
        let mut notes = self.load()?;

        let id = self.id_strategy.next_id(&notes)?;
        let note = draft.into_note(id);
        notes.push(note.clone());

        self.save(&notes)?;
        debug!("Appended note #{id} to {}", self.path.display());
        Ok(note)
    }

    /// Returns the notes in file order
    ///
    /// # Errors
    ///
    /// Any error from `load`
    fn list(&self) -> Result<Vec<Note>> {
        let _guard = self.guard()?;
        self.load()
    }

    /// # Errors
    ///
    /// Returns `BackendError::NoteNotFound` if no note has the ID, or any error from `load`
    fn read(&self, id: u64) -> Result<Note> {
        let _guard = self.guard()?;
        self.load()?
            .into_iter()
            .find(|n| n.id == id)
            .ok_or(NoteError::Backend(BackendError::NoteNotFound(id)))
    }

    /// Replaces title and content of the first note with a matching ID
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NoteNotFound` without writing if no note has the ID,
    /// or any error from `load` or `save`
    fn update(&self, id: u64, draft: NoteDraft) -> Result<Note> {
        let _guard = self.guard()?;
        let mut notes = self.load()?;

        let note = notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(NoteError::Backend(BackendError::NoteNotFound(id)))?;
        note.title = draft.title;
        note.content = draft.content;
        let updated = note.clone();

        self.save(&notes)?;
        Ok(updated)
    }

    /// Removes the first note with a matching ID
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NoteNotFound` without writing if no note has the ID,
    /// or any error from `load` or `save`
    fn delete(&self, id: u64) -> Result<()> {
        let _guard = self.guard()?;
        let mut notes = self.load()?;

        let index = notes
            .iter()
            .position(|n| n.id == id)
            .ok_or(NoteError::Backend(BackendError::NoteNotFound(id)))?;
        notes.remove(index);

        self.save(&notes)
    }
}
